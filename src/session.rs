// src/session.rs — 一次交互会话的全部状态（语言、二维码请求、短链结果）

use crate::error::Result;
use crate::i18n::{Language, Strings};
use crate::payload;
use crate::qr::{self, QrSvg, RenderOptions};
use crate::types::{QrRequest, ShortenResult, Tab};

/// 会话状态，由菜单循环独占
#[derive(Debug, Default)]
pub struct Session {
    lang: Language,
    pub tab: Tab,
    pub request: QrRequest,
    target: Option<QrSvg>,
    pub shorten: ShortenState,
}

impl Session {
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            ..Self::default()
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn set_language(&mut self, lang: Language) {
        tracing::debug!(from = self.lang.code(), to = lang.code(), "切换语言");
        self.lang = lang;
    }

    pub fn cycle_language(&mut self) {
        self.set_language(self.lang.next());
    }

    pub fn strings(&self) -> &'static Strings {
        self.lang.strings()
    }

    /// 重新生成 payload 并渲染；失败时清空渲染目标
    pub fn render(&mut self, size: u32) -> Result<&QrSvg> {
        let opts = RenderOptions {
            size,
            color: self.request.color().to_string(),
        };
        let payload = payload::build_payload(&self.request);
        match qr::render(&payload, &opts) {
            Ok(svg) => Ok(self.target.insert(svg)),
            Err(e) => {
                self.target = None;
                Err(e)
            }
        }
    }

    /// 最近一次成功渲染的二维码
    pub fn target(&self) -> Option<&QrSvg> {
        self.target.as_ref()
    }

    pub fn can_download(&self) -> bool {
        payload::has_input(&self.request)
    }
}

/// 短链请求的序号；只有最新一次的结果会被采用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct ShortenState {
    input: String,
    generation: u64,
    result: Option<ShortenResult>,
}

impl ShortenState {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> Option<&ShortenResult> {
        self.result.as_ref()
    }

    /// 修改输入会丢弃旧结果
    pub fn edit(&mut self, url: impl Into<String>) {
        self.input = url.into();
        self.result = None;
    }

    /// 输入为空或已有请求在途时按钮不可用
    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && !self.result.as_ref().is_some_and(ShortenResult::is_pending)
    }

    /// 提交一次新请求，之前在途的请求随即作废
    pub fn begin(&mut self) -> Option<Ticket> {
        if !self.can_submit() {
            return None;
        }
        self.generation += 1;
        self.result = Some(ShortenResult::Pending);
        Some(Ticket(self.generation))
    }

    /// 写回结果；过期的 ticket 返回 false 且不改动状态
    pub fn settle(&mut self, ticket: Ticket, outcome: Result<String>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, latest = self.generation, "丢弃过期的短链结果");
            return false;
        }
        if let Err(e) = &outcome {
            tracing::warn!(kind = ?e.shorten_kind(), error = %e, "短链失败");
        }
        self.result = Some(ShortenResult::from_outcome(outcome));
        true
    }
}
