// src/payload.rs — 生成要编码进二维码的字符串

use crate::types::{Mode, QrRequest};

/// 文本为空时的占位内容，保证渲染器总能拿到可扫描的值
pub const PLACEHOLDER_URL: &str = "https://example.com";

/// 根据请求生成 payload（纯函数，每次渲染重新计算）
pub fn build_payload(request: &QrRequest) -> String {
    match request.mode {
        Mode::Text if request.text.is_empty() => PLACEHOLDER_URL.to_string(),
        Mode::Text => request.text.clone(),
        Mode::Wifi => {
            let wifi = &request.wifi;
            format!(
                "WIFI:T:{};S:{};P:{};;",
                wifi.security.token(),
                escape_wifi_field(&wifi.ssid),
                escape_wifi_field(&wifi.password),
            )
        }
    }
}

/// 当前模式下是否有用户输入（决定"下载"是否可用）
pub fn has_input(request: &QrRequest) -> bool {
    match request.mode {
        Mode::Text => !request.text.is_empty(),
        Mode::Wifi => !request.wifi.ssid.is_empty(),
    }
}

/// 转义 Wi-Fi QR 格式中的保留字符
fn escape_wifi_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '\\' | ';' | ',' | '"' | ':' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Security;

    #[test]
    fn text_passes_through_unchanged() {
        for text in ["hello", "https://rust-lang.org", "  spaced  ", "中文内容"] {
            assert_eq!(build_payload(&QrRequest::text(text)), text);
        }
    }

    #[test]
    fn empty_text_falls_back_to_placeholder() {
        assert_eq!(build_payload(&QrRequest::text("")), PLACEHOLDER_URL);
    }

    #[test]
    fn wifi_payload_has_fixed_field_order() {
        let req = QrRequest::wifi("HomeNet", "secret123", Security::Wpa);
        assert_eq!(build_payload(&req), "WIFI:T:WPA;S:HomeNet;P:secret123;;");
    }

    #[test]
    fn wifi_payload_matches_pattern_for_every_security() {
        for security in Security::ALL {
            let req = QrRequest::wifi("Office 5G", "p@ss word", security);
            assert_eq!(
                build_payload(&req),
                format!("WIFI:T:{};S:Office 5G;P:p@ss word;;", security.token())
            );
        }
    }

    #[test]
    fn open_network_uses_nopass_token() {
        let req = QrRequest::wifi("Cafe", "", Security::NoPass);
        assert_eq!(build_payload(&req), "WIFI:T:nopass;S:Cafe;P:;;");
    }

    // 特殊字符会被转义，不再与无转义格式逐字一致
    #[test]
    fn reserved_characters_are_escaped() {
        let req = QrRequest::wifi(r#"my;net:"x""#, r"a\b,c", Security::Wpa);
        assert_eq!(
            build_payload(&req),
            r#"WIFI:T:WPA;S:my\;net\:\"x\";P:a\\b\,c;;"#
        );
    }

    #[test]
    fn has_input_follows_active_mode() {
        assert!(!has_input(&QrRequest::text("")));
        assert!(has_input(&QrRequest::text("x")));
        assert!(!has_input(&QrRequest::wifi("", "secret", Security::Wpa)));
        assert!(has_input(&QrRequest::wifi("HomeNet", "", Security::NoPass)));
    }
}
