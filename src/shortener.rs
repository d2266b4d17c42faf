// src/shortener.rs — 调用第三方短链服务

use crate::error::{Error, Result};

/// TinyURL 的纯文本接口：GET ?url=<长链接>，响应体就是短链
pub const DEFAULT_ENDPOINT: &str = "https://tinyurl.com/api-create.php";

pub struct Shortener {
    client: reqwest::Client,
    endpoint: String,
}

impl Shortener {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// 生成短链：不重试，超时沿用 reqwest 默认
    pub async fn shorten(&self, raw_url: &str) -> Result<String> {
        let url = normalize_url(raw_url);
        let request_url = format!("{}?url={}", self.endpoint, urlencoding::encode(&url));
        tracing::debug!(%url, endpoint = %self.endpoint, "请求短链");

        let response = self.client.get(&request_url).send().await.map_err(|e| {
            tracing::warn!(error = %e, "短链服务请求失败");
            Error::ServiceUnavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "短链服务返回非成功状态");
            return Err(Error::ServiceUnavailable(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;
        let short = body.trim();
        if !is_link(short) {
            tracing::warn!(body = %short, "短链服务响应不可用");
            return Err(Error::InvalidResponse(short.to_string()));
        }

        tracing::info!(%url, short_url = short, "短链已生成");
        Ok(short.to_string())
    }
}

/// 没有 http:// 或 https:// 前缀时补上 https://
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

fn has_scheme(s: &str) -> bool {
    scheme_len(s).is_some()
}

/// 命中的 http(s):// 前缀长度
fn scheme_len(s: &str) -> Option<usize> {
    ["http://", "https://"]
        .iter()
        .find(|p| {
            s.get(..p.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(p))
        })
        .map(|p| p.len())
}

/// 前缀之后至少还有一个字符，且整串不含空白
fn is_link(s: &str) -> bool {
    scheme_len(s).is_some_and(|n| s.len() > n) && !s.contains(char::is_whitespace)
}
