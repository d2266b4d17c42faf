// src/error.rs — 统一错误类型

use crate::types::ShortenErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// 短链服务不可达或返回非 2xx
    #[error("短链服务不可用: {0}")]
    ServiceUnavailable(String),

    /// 2xx 但响应体不是可用的短链
    #[error("短链服务返回了无效响应: {0:?}")]
    InvalidResponse(String),

    /// 导出时还没有渲染好的二维码
    #[error("没有可导出的二维码")]
    MissingRenderTarget,

    #[error("无效的颜色值: {0:?}")]
    InvalidColor(String),

    #[error("二维码编码失败: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("二维码栅格化失败: {0}")]
    Rasterize(String),

    #[error("无效的 data URI: {0}")]
    DataUri(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// 短链相关错误的分类，其它错误返回 None
    pub fn shorten_kind(&self) -> Option<ShortenErrorKind> {
        match self {
            Error::ServiceUnavailable(_) => Some(ShortenErrorKind::ServiceUnavailable),
            Error::InvalidResponse(_) => Some(ShortenErrorKind::InvalidResponse),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
