// src/notify.rs — 桌面通知，降级到 stderr

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Normal,
    Critical,
}

impl Urgency {
    fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::Critical => "critical",
        }
    }
}

/// 通知出口；导出等操作只依赖这个 trait
pub trait Notifier {
    fn send(&self, urgency: Urgency, title: &str, body: &str);

    fn low(&self, title: &str, body: &str) {
        self.send(Urgency::Low, title, body)
    }
    fn normal(&self, title: &str, body: &str) {
        self.send(Urgency::Normal, title, body)
    }
    fn critical(&self, title: &str, body: &str) {
        self.send(Urgency::Critical, title, body)
    }
}

/// notify-send，失败时打印到 stderr
pub struct Desktop;

impl Notifier for Desktop {
    fn send(&self, urgency: Urgency, title: &str, body: &str) {
        let u = urgency.as_str();
        tracing::debug!(urgency = u, title, body, "发送通知");

        let ok = std::process::Command::new("notify-send")
            .args(["-u", u, &format!("QR: {title}"), body])
            .status()
            .map(|s| s.success())
            .unwrap_or(false);

        if !ok {
            eprintln!(
                "[{u}] QR: {title}{}",
                if body.is_empty() { String::new() } else { format!(": {body}") }
            );
        }
    }
}
