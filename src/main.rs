// src/main.rs — 主入口 & 菜单逻辑
mod config;
mod error;
mod export;
mod i18n;
mod notify;
mod payload;
mod qr;
mod rofi;
mod session;
mod shortener;
mod types;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use config::Config;
use error::Error;
use export::Exporter;
use i18n::{Key, Language, Strings};
use notify::{Desktop, Notifier};
use session::Session;
use shortener::Shortener;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use types::{MenuAction, Mode, QrRequest, Security, ShortenErrorKind, ShortenResult, Tab};

// ════════════════════════════════════════════════════════════════
// CLI 参数
// ════════════════════════════════════════════════════════════════

#[derive(Parser)]
#[command(name = "rofi-qrlink", about = "rofi 二维码生成 & 短链工具", version)]
struct Cli {
    /// 界面语言：en / es / pt / fr / ru / zh
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    cmd: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// 为文本或网址生成二维码
    Text {
        /// 留空时编码占位网址
        text: Option<String>,
        #[command(flatten)]
        out: QrOutput,
    },
    /// 生成 Wi-Fi 连接二维码
    Wifi {
        #[arg(long)]
        ssid: String,
        #[arg(long, default_value = "")]
        password: String,
        /// WPA / WEP / nopass
        #[arg(long, default_value = "WPA")]
        security: Security,
        #[command(flatten)]
        out: QrOutput,
    },
    /// 生成短链接
    Shorten { url: String },
    /// 列出支持的界面语言
    Languages,
}

#[derive(Args)]
struct QrOutput {
    /// 前景色（#rgb 或 #rrggbb）
    #[arg(long)]
    color: Option<String>,
    /// 导出目录
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// 在终端打印块字符二维码
    #[arg(long)]
    show: bool,
    /// 输出 PNG data URI 而不是写文件
    #[arg(long)]
    data_uri: bool,
}

// ════════════════════════════════════════════════════════════════
// 导航结果：区分"回主菜单"和"退出程序"
// ════════════════════════════════════════════════════════════════

#[derive(Debug)]
enum Nav {
    Back,
    Quit,
}

// ════════════════════════════════════════════════════════════════
// 入口
// ════════════════════════════════════════════════════════════════

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let cfg = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "配置文件解析失败，使用默认配置");
        Config::default()
    });
    let lang = resolve_language(cli.lang.as_deref().unwrap_or(&cfg.language));

    match cli.cmd {
        Some(Cmd::Text { text, out }) => {
            run_qr(&cfg, lang, QrRequest::text(text.unwrap_or_default()), out).await?
        }
        Some(Cmd::Wifi {
            ssid,
            password,
            security,
            out,
        }) => run_qr(&cfg, lang, QrRequest::wifi(ssid, password, security), out).await?,
        Some(Cmd::Shorten { url }) => {
            let shortener = Shortener::new(&cfg.shortener_endpoint);
            println!("{}", shortener.shorten(&url).await?);
        }
        Some(Cmd::Languages) => {
            for l in Language::ALL {
                println!("{}  {:<10}  {}", l.code(), l.native_name(), l.strings().get(Key::AppTitle));
            }
        }
        // 主菜单循环：Back 重显，Quit 退出
        None => {
            let mut session = Session::new(lang);
            if let Err(e) = session.request.set_color(&cfg.qr_color) {
                tracing::warn!(error = %e, "配置中的颜色无效，使用默认颜色");
            }
            while let Nav::Back = run_menu(&cfg, &mut session).await {}
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

fn resolve_language(code: &str) -> Language {
    let lang = i18n::lookup(code).lang;
    if !lang.code().eq_ignore_ascii_case(code.trim()) {
        tracing::warn!(code, "不支持的语言，回退到英文");
    }
    lang
}

// ════════════════════════════════════════════════════════════════
// 非交互：直接生成二维码
// ════════════════════════════════════════════════════════════════

async fn run_qr(cfg: &Config, lang: Language, mut request: QrRequest, out: QrOutput) -> Result<()> {
    request.set_color(out.color.as_deref().unwrap_or(&cfg.qr_color))?;
    ensure_encodable(&request)?;

    let mut session = Session::new(lang);
    session.request = request;
    session.render(cfg.qr_size)?;

    if out.show {
        println!("{}", qr::preview(&payload::build_payload(&session.request))?);
    }

    let dir = out.output.unwrap_or_else(|| cfg.output_dir());
    let exporter = Exporter::new(dir, &cfg.file_name);
    if out.data_uri {
        println!("{}", exporter.export_data_uri(session.target()).await?);
    } else {
        let path = exporter
            .export(session.target(), &Desktop, session.strings())
            .await?;
        println!("{}", path.display());
    }
    Ok(())
}

/// 文本留空会编码占位网址；Wi-Fi 没有 SSID 则无从生成
fn ensure_encodable(request: &QrRequest) -> Result<()> {
    if request.mode == Mode::Wifi && !payload::has_input(request) {
        bail!("SSID 不能为空");
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════
// 主菜单
// ════════════════════════════════════════════════════════════════

async fn run_menu(cfg: &Config, session: &mut Session) -> Nav {
    let t = session.strings();
    let entries = menu_entries(session);
    let labels: Vec<String> = entries.iter().map(|(_, label)| label.clone()).collect();
    let message = status_message(session);

    // 主菜单按 Esc → 退出程序；-format i 返回所选行号
    let choice = match rofi::main_menu(&labels, &format!("{}: ", t.get(Key::AppTitle)), cfg, message.as_deref()).await {
        Some(c) => c,
        None => return Nav::Quit,
    };
    let action = match choice.trim().parse::<usize>().ok().and_then(|i| entries.get(i)) {
        Some((action, _)) => *action,
        None => return Nav::Back,
    };

    handle_action(action, cfg, session).await;
    Nav::Back
}

/// 当前标签页下可用的菜单项
fn menu_entries(session: &Session) -> Vec<(MenuAction, String)> {
    let t = session.strings();
    let lang = format!("🌐 {}: {}", t.get(Key::Language), session.language().native_name());
    let mut items = vec![];

    match session.tab {
        Tab::Qr => {
            let req = &session.request;
            items.push((MenuAction::SwitchTab(Tab::Shortener), format!("🔀 {}", t.get(Key::UrlShortener))));
            let mode = match req.mode {
                Mode::Text => t.get(Key::TextMode),
                Mode::Wifi => t.get(Key::WifiMode),
            };
            items.push((MenuAction::ToggleMode, format!("🔁 {mode}")));
            match req.mode {
                Mode::Text => {
                    items.push((MenuAction::EditText, format!("✏️  {}: {}", t.get(Key::EnterText), req.text)));
                }
                Mode::Wifi => {
                    let wifi = &req.wifi;
                    items.push((MenuAction::EditSsid, format!("📶 {}: {}", t.get(Key::NetworkName), wifi.ssid)));
                    if wifi.security.needs_password() {
                        let masked = "•".repeat(wifi.password.chars().count());
                        items.push((MenuAction::EditPassword, format!("🔒 {}: {masked}", t.get(Key::Password))));
                    }
                    items.push((
                        MenuAction::EditSecurity,
                        format!("🛡  {}: {}", t.get(Key::SecurityType), security_label(wifi.security, t)),
                    ));
                }
            }
            items.push((MenuAction::EditColor, format!("🎨 {}: {}", t.get(Key::Color), req.color())));
            items.push((MenuAction::Preview, format!("📷 {}", t.get(Key::Preview))));
            if session.can_download() {
                items.push((MenuAction::Download, format!("💾 {}", t.get(Key::Download))));
            }
        }
        Tab::Shortener => {
            let st = &session.shorten;
            items.push((MenuAction::SwitchTab(Tab::Qr), format!("🔀 {}", t.get(Key::QrCode))));
            items.push((MenuAction::EditUrl, format!("🔗 {}: {}", t.get(Key::EnterUrl), st.input())));
            if st.can_submit() {
                items.push((MenuAction::Shorten, format!("✂️  {}", t.get(Key::Shorten))));
            }
            if let Some(short) = st.result().and_then(ShortenResult::short_url) {
                items.push((MenuAction::ShowShortUrl, format!("📋 {short}")));
            }
        }
    }

    items.push((MenuAction::Language, lang));
    items
}

fn status_message(session: &Session) -> Option<String> {
    let t = session.strings();
    match (session.tab, session.shorten.result()) {
        (Tab::Shortener, Some(ShortenResult::Pending)) => Some(t.get(Key::Shortening).to_string()),
        (Tab::Shortener, Some(ShortenResult::Error(kind))) => {
            Some(format!("⚠ {}", shorten_error_text(*kind, t)))
        }
        _ => None,
    }
}

fn security_label(security: Security, t: &Strings) -> &'static str {
    match security {
        Security::Wpa => "WPA/WPA2",
        Security::Wep => "WEP",
        Security::NoPass => t.get(Key::NoSecurity),
    }
}

/// 服务返回了不可用的内容时，提示用户检查网址
fn shorten_error_text(kind: ShortenErrorKind, t: &Strings) -> &'static str {
    match kind {
        ShortenErrorKind::InvalidResponse => t.get(Key::InvalidUrl),
        ShortenErrorKind::ServiceUnavailable => t.get(Key::ShortenFailed),
    }
}

// ════════════════════════════════════════════════════════════════
// 动作处理（子流程 Esc → 不改动，回主菜单）
// ════════════════════════════════════════════════════════════════

async fn handle_action(action: MenuAction, cfg: &Config, session: &mut Session) {
    let t = session.strings();
    match action {
        MenuAction::SwitchTab(tab) => session.tab = tab,

        // ── 文本 / Wi-Fi 模式切换 ─────────────────────────────────
        MenuAction::ToggleMode => {
            let mode = session.request.mode.toggled();
            session.request.set_mode(mode);
        }

        MenuAction::EditText => {
            if let Some(text) = rofi::input_prompt(t.get(Key::EnterText), &session.request.text, cfg).await {
                session.request.text = text;
            }
        }

        MenuAction::EditSsid => {
            if let Some(ssid) = rofi::input_prompt(t.get(Key::EnterWifiName), &session.request.wifi.ssid, cfg).await {
                session.request.wifi.ssid = ssid;
            }
        }

        MenuAction::EditPassword => {
            if let Some(pass) = rofi::password_prompt(t.get(Key::EnterPassword), cfg).await {
                session.request.wifi.password = pass;
            }
        }

        MenuAction::EditSecurity => {
            let labels: Vec<String> = Security::ALL
                .iter()
                .map(|s| security_label(*s, t).to_string())
                .collect();
            if let Some(choice) = rofi::choose(&labels, &format!("{}: ", t.get(Key::SecurityType)), cfg).await {
                if let Some(pos) = labels.iter().position(|l| *l == choice) {
                    session.request.wifi.security = Security::ALL[pos];
                }
            }
        }

        MenuAction::EditColor => {
            let current = session.request.color().to_string();
            // 清空颜色等同于不修改
            let color = rofi::input_prompt(t.get(Key::Color), &current, cfg)
                .await
                .filter(|c| !c.trim().is_empty());
            if let Some(color) = color {
                if let Err(e) = session.request.set_color(&color) {
                    Desktop.critical(t.get(Key::Error), &e.to_string());
                }
            }
        }

        // ── 预览 ────────────────────────────────────────────────
        MenuAction::Preview => {
            let payload = payload::build_payload(&session.request);
            match qr::preview(&payload) {
                Ok(text) => rofi::show_qr(t.get(Key::Preview), &text, cfg).await,
                Err(e) => Desktop.critical(t.get(Key::Error), &e.to_string()),
            }
        }

        // ── 下载 PNG ────────────────────────────────────────────
        MenuAction::Download => {
            if let Err(e) = session.render(cfg.qr_size) {
                tracing::warn!(error = %e, "二维码渲染失败");
                Desktop.critical(t.get(Key::Error), &e.to_string());
            }
            let exporter = Exporter::new(cfg.output_dir(), &cfg.file_name);
            match exporter.export(session.target(), &Desktop, t).await {
                Ok(_) => {}
                // 还没有渲染目标：静默跳过
                Err(Error::MissingRenderTarget) => {
                    tracing::debug!("没有渲染目标，跳过导出");
                }
                Err(e) => {
                    tracing::error!(error = %e, "导出失败");
                    Desktop.critical(t.get(Key::Error), &e.to_string());
                }
            }
        }

        // ── 短链 ────────────────────────────────────────────────
        MenuAction::EditUrl => {
            let current = session.shorten.input().to_string();
            if let Some(url) = rofi::input_prompt(t.get(Key::EnterUrl), &current, cfg).await {
                session.shorten.edit(url.trim());
            }
        }

        MenuAction::Shorten => {
            let Some(ticket) = session.shorten.begin() else {
                return;
            };
            Desktop.low(t.get(Key::Shortening), session.shorten.input());
            let shortener = Shortener::new(&cfg.shortener_endpoint);
            let url = session.shorten.input().to_string();
            let outcome = shortener.shorten(&url).await;
            session.shorten.settle(ticket, outcome);

            match session.shorten.result() {
                Some(ShortenResult::Success { short_url }) => {
                    Desktop.normal(t.get(Key::Success), short_url);
                    rofi::show_info(t.get(Key::UrlShortener), short_url, cfg).await;
                }
                Some(ShortenResult::Error(kind)) => {
                    Desktop.critical(t.get(Key::Error), shorten_error_text(*kind, t))
                }
                _ => {}
            }
        }

        MenuAction::ShowShortUrl => {
            if let Some(short) = session.shorten.result().and_then(ShortenResult::short_url) {
                rofi::show_info(t.get(Key::UrlShortener), short, cfg).await;
            }
        }

        // ── 语言 ────────────────────────────────────────────────
        MenuAction::Language => {
            let names: Vec<String> = Language::ALL
                .iter()
                .map(|l| l.native_name().to_string())
                .collect();
            if let Some(choice) = rofi::choose(&names, &format!("🌐 {}: ", t.get(Key::Language)), cfg).await {
                match Language::ALL.iter().find(|l| l.native_name() == choice) {
                    Some(lang) => session.set_language(*lang),
                    None => session.cycle_language(),
                }
            }
        }
    }
}
