// src/types.rs — 所有核心数据类型

use crate::error::Result;
use crate::qr;
use std::str::FromStr;

pub const DEFAULT_COLOR: &str = "#000000";

/// 二维码内容模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Text,
    Wifi,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Text => Mode::Wifi,
            Mode::Wifi => Mode::Text,
        }
    }
}

/// Wi-Fi 二维码里的加密类型（T 字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Security {
    #[default]
    Wpa,
    Wep,
    NoPass,
}

impl Security {
    pub const ALL: [Security; 3] = [Security::Wpa, Security::Wep, Security::NoPass];

    /// 写入 payload 的 token
    pub fn token(&self) -> &'static str {
        match self {
            Security::Wpa => "WPA",
            Security::Wep => "WEP",
            Security::NoPass => "nopass",
        }
    }

    pub fn needs_password(&self) -> bool {
        !matches!(self, Security::NoPass)
    }
}

impl std::fmt::Display for Security {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Security {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let up = s.trim().to_uppercase();
        match up.as_str() {
            "WPA" | "WPA2" | "WPA3" | "WPA/WPA2" => Ok(Security::Wpa),
            "WEP" => Ok(Security::Wep),
            "NOPASS" | "NONE" | "OPEN" => Ok(Security::NoPass),
            _ => Err(format!("未知的加密类型: {s}（可选 WPA / WEP / nopass）")),
        }
    }
}

/// Wi-Fi 表单字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WifiFields {
    pub ssid: String,
    pub password: String,
    pub security: Security,
}

/// 一次二维码生成请求；同一时刻只有 mode 对应的分支有效
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    pub mode: Mode,
    pub text: String,
    pub wifi: WifiFields,
    color: String,
}

impl Default for QrRequest {
    fn default() -> Self {
        Self {
            mode: Mode::Text,
            text: String::new(),
            wifi: WifiFields::default(),
            color: DEFAULT_COLOR.into(),
        }
    }
}

impl QrRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn wifi(ssid: impl Into<String>, password: impl Into<String>, security: Security) -> Self {
        Self {
            mode: Mode::Wifi,
            wifi: WifiFields {
                ssid: ssid.into(),
                password: password.into(),
                security,
            },
            ..Self::default()
        }
    }

    /// 切换模式；真正切换时把失效分支重置为空默认值
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        match mode {
            Mode::Text => self.wifi = WifiFields::default(),
            Mode::Wifi => self.text.clear(),
        }
        self.mode = mode;
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// 设置前景色，非法值保持原色并返回错误
    pub fn set_color(&mut self, color: &str) -> Result<()> {
        self.color = qr::normalize_color(color)?;
        Ok(())
    }
}

/// 短链失败分类（都走错误通知，只是提示文案不同）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortenErrorKind {
    ServiceUnavailable,
    InvalidResponse,
}

/// 短链请求在界面上的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenResult {
    Pending,
    Success { short_url: String },
    Error(ShortenErrorKind),
}

impl ShortenResult {
    pub fn from_outcome(outcome: Result<String>) -> Self {
        match outcome {
            Ok(short_url) => ShortenResult::Success { short_url },
            Err(e) => ShortenResult::Error(
                e.shorten_kind().unwrap_or(ShortenErrorKind::ServiceUnavailable),
            ),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ShortenResult::Pending)
    }

    pub fn short_url(&self) -> Option<&str> {
        match self {
            ShortenResult::Success { short_url } => Some(short_url),
            _ => None,
        }
    }
}

/// 顶部标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Qr,
    Shortener,
}

/// 菜单动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SwitchTab(Tab),
    ToggleMode,
    EditText,
    EditSsid,
    EditPassword,
    EditSecurity,
    EditColor,
    Preview,
    Download,
    EditUrl,
    Shorten,
    ShowShortUrl,
    Language,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn switching_modes_resets_wifi_fields() {
        let mut req = QrRequest::wifi("HomeNet", "secret123", Security::Wep);
        req.set_mode(Mode::Text);
        req.set_mode(Mode::Wifi);
        assert_eq!(req.wifi.ssid, "");
        assert_eq!(req.wifi.password, "");
        assert_eq!(req.wifi.security, Security::Wpa);
    }

    #[test]
    fn switching_to_wifi_clears_text() {
        let mut req = QrRequest::text("hello");
        req.set_mode(Mode::Wifi);
        assert_eq!(req.mode, Mode::Wifi);
        assert!(req.text.is_empty());
    }

    #[test]
    fn selecting_current_mode_keeps_fields() {
        let mut req = QrRequest::text("hello");
        req.set_mode(Mode::Text);
        assert_eq!(req.text, "hello");
    }

    #[test]
    fn invalid_color_keeps_previous_value() {
        let mut req = QrRequest::default();
        req.set_color("#FF8800").unwrap();
        assert_eq!(req.color(), "#ff8800");
        assert!(req.set_color("red\"/><script>").is_err());
        assert_eq!(req.color(), "#ff8800");
    }

    #[test]
    fn security_parses_common_spellings() {
        assert_eq!("wpa2".parse::<Security>(), Ok(Security::Wpa));
        assert_eq!("WEP".parse::<Security>(), Ok(Security::Wep));
        assert_eq!("nopass".parse::<Security>(), Ok(Security::NoPass));
        assert_eq!("open".parse::<Security>(), Ok(Security::NoPass));
        assert!("WPA4".parse::<Security>().is_err());
    }

    #[test]
    fn shorten_result_maps_error_kinds() {
        let r = ShortenResult::from_outcome(Err(Error::InvalidResponse(String::new())));
        assert_eq!(r, ShortenResult::Error(ShortenErrorKind::InvalidResponse));
        let r = ShortenResult::from_outcome(Err(Error::ServiceUnavailable("503".into())));
        assert_eq!(r, ShortenResult::Error(ShortenErrorKind::ServiceUnavailable));
        let r = ShortenResult::from_outcome(Ok("https://tinyurl.com/abc123".into()));
        assert_eq!(r.short_url(), Some("https://tinyurl.com/abc123"));
    }
}
