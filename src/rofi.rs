// src/rofi.rs — 所有 rofi 调用封装

use crate::config::Config;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// 通用 rofi dmenu，返回用户选择的行，Esc 返回 None
///
/// 回车确认空输入时返回 `Some("")`，调用方据此区分"清空"和"取消"
pub async fn dmenu(
    items: &[String],
    prompt: &str,
    cfg: &Config,
    extra: &[&str], // 额外参数，如 -mesg、-a、-password
) -> Option<String> {
    let input = items.join("\n");
    let mut args = vec![
        "-dmenu".to_string(),
        "-p".to_string(),
        prompt.to_string(),
        "-font".to_string(),
        cfg.font.clone(),
        "-location".to_string(),
        cfg.position.to_string(),
        "-yoffset".to_string(),
        cfg.y_offset.to_string(),
        "-xoffset".to_string(),
        cfg.x_offset.to_string(),
    ];
    args.extend(extra.iter().map(|e| e.to_string()));

    let mut child = match Command::new("rofi")
        .args(&args)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "无法启动 rofi");
            return None;
        }
    };

    // 写完候选项后 stdin 在此 drop，rofi 收到 EOF 才会渲染列表
    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(input.as_bytes()).await;
    }

    let out = child.wait_with_output().await.ok()?;
    read_choice(out.status.success(), &out.stdout)
}

/// 解析 rofi 输出：非零退出码是 Esc，零退出码即使输出为空也算确认
fn read_choice(success: bool, stdout: &[u8]) -> Option<String> {
    if !success {
        return None;
    }
    Some(String::from_utf8_lossy(stdout).trim_end_matches('\n').to_string())
}

/// 单行密码输入（显示为圆点）
pub async fn password_prompt(prompt: &str, cfg: &Config) -> Option<String> {
    dmenu(&[], &format!("🔒 {prompt}: "), cfg, &["-password", "-lines", "0"]).await
}

/// 单行文本输入，可预填当前值
pub async fn input_prompt(prompt: &str, current: &str, cfg: &Config) -> Option<String> {
    let mut extra = vec!["-lines", "0"];
    if !current.is_empty() {
        extra.extend(["-filter", current]);
    }
    dmenu(&[], &format!("{prompt}: "), cfg, &extra).await
}

/// 从固定候选中选一个（不接受自定义输入）
pub async fn choose(items: &[String], prompt: &str, cfg: &Config) -> Option<String> {
    let lines = items.len().to_string();
    dmenu(items, prompt, cfg, &["-lines", lines.as_str(), "-no-custom"]).await
}

/// 在 rofi -mesg 区域显示 UTF-8 二维码
pub async fn show_qr(title: &str, qr_text: &str, cfg: &Config) {
    let qr_width = qr_text
        .lines()
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(40);
    let rofi_width = format!("-{}", qr_width + 4);

    let items = vec!["── Esc / Enter ──".to_string()];
    let prompt = format!("📷 {title}");
    let extra = vec![
        "-mesg",
        qr_text,
        "-lines",
        "1",
        "-font",
        "Monospace 9",
        "-width",
        rofi_width.as_str(),
        "-no-custom",
    ];

    // 预览页不关心返回值
    let _ = dmenu(&items, &prompt, cfg, &extra).await;
}

/// 只读信息页（如生成的短链）
pub async fn show_info(title: &str, content: &str, cfg: &Config) {
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    let _ = dmenu(&lines, title, cfg, &["-no-custom"]).await;
}

/// 构建主菜单
pub async fn main_menu(
    items: &[String],
    prompt: &str,
    cfg: &Config,
    message: Option<&str>, // 顶部提示文字
) -> Option<String> {
    let width = items.iter().map(|s| s.chars().count()).max().unwrap_or(40) + 4;
    let lines = items.len().min(cfg.max_lines);

    let mut extra: Vec<String> = vec![
        "-lines".into(),
        lines.to_string(),
        "-width".into(),
        format!("-{width}"),
        "-no-custom".into(),
        "-format".into(),
        "i".into(),
    ];
    if let Some(msg) = message {
        extra.push("-mesg".into());
        extra.push(msg.to_string());
    }

    let extra_refs: Vec<&str> = extra.iter().map(String::as_str).collect();
    dmenu(items, prompt, cfg, &extra_refs).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_is_none_even_with_output() {
        assert_eq!(read_choice(false, b""), None);
        assert_eq!(read_choice(false, b"leftover\n"), None);
    }

    #[test]
    fn accepted_empty_entry_is_kept() {
        assert_eq!(read_choice(true, b""), Some(String::new()));
        assert_eq!(read_choice(true, b"\n"), Some(String::new()));
    }

    #[test]
    fn trailing_newline_is_stripped() {
        assert_eq!(read_choice(true, "你好\n".as_bytes()), Some("你好".into()));
        assert_eq!(read_choice(true, b"  spaced  \n"), Some("  spaced  ".into()));
    }
}
