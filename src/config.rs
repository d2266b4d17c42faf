// src/config.rs — 配置加载，支持文件覆盖

use crate::export::{self, DEFAULT_FILE_NAME};
use crate::shortener::DEFAULT_ENDPOINT;
use crate::types::DEFAULT_COLOR;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// rofi 字体
    pub font: String,
    /// rofi 窗口位置 (0–8, 同 rofi -location)
    pub position: u8,
    pub x_offset: i32,
    pub y_offset: i32,
    /// 菜单最大显示行数
    pub max_lines: usize,
    /// 启动时的界面语言代码
    pub language: String,
    /// 二维码最小边长（像素）
    pub qr_size: u32,
    /// 默认前景色
    pub qr_color: String,
    /// 导出目录，缺省为下载目录
    pub output_dir: Option<PathBuf>,
    pub file_name: String,
    /// 短链服务地址（GET ?url=）
    pub shortener_endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: "DejaVu Sans Mono 8".into(),
            position: 0,
            x_offset: 0,
            y_offset: 0,
            max_lines: 10,
            language: "en".into(),
            qr_size: 200,
            qr_color: DEFAULT_COLOR.into(),
            output_dir: None,
            file_name: DEFAULT_FILE_NAME.into(),
            shortener_endpoint: DEFAULT_ENDPOINT.into(),
        }
    }
}

impl Config {
    /// 按优先级查找并加载配置文件
    pub fn load() -> Result<Self> {
        let candidates = config_candidates();
        for path in &candidates {
            if path.exists() {
                let text = std::fs::read_to_string(path)?;
                let cfg: Config = toml::from_str(&text)?;
                tracing::debug!(path = %path.display(), "已加载配置文件");
                return Ok(cfg);
            }
        }
        Ok(Config::default())
    }

    /// 实际使用的导出目录
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(export::default_dir)
    }
}

fn config_candidates() -> Vec<PathBuf> {
    let mut v = vec![];
    // 同目录下的 config.toml
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            v.push(dir.join("config.toml"));
        }
    }
    // ~/.config/rofi/qrlink.toml
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".config/rofi/qrlink.toml"));
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("language = \"pt\"\nqr_size = 320\n").unwrap();
        assert_eq!(cfg.language, "pt");
        assert_eq!(cfg.qr_size, 320);
        assert_eq!(cfg.file_name, "qrcode.png");
        assert_eq!(cfg.shortener_endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn explicit_output_dir_wins() {
        let cfg: Config = toml::from_str("output_dir = \"/tmp/qr\"").unwrap();
        assert_eq!(cfg.output_dir(), PathBuf::from("/tmp/qr"));
    }
}
