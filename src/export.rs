// src/export.rs — 把 SVG 二维码栅格化为 PNG 并保存

use crate::error::{Error, Result};
use crate::i18n::{Key, Strings};
use crate::notify::Notifier;
use crate::qr::QrSvg;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "qrcode.png";

const SVG_MIME: &str = "image/svg+xml";
const PNG_MIME: &str = "image/png";

pub struct Exporter {
    dir: PathBuf,
    file_name: String,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    /// 导出目标文件路径
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// 栅格化并写文件，成功后发通知；没有渲染目标时直接返回 MissingRenderTarget
    pub async fn export(
        &self,
        target: Option<&QrSvg>,
        notifier: &impl Notifier,
        strings: &Strings,
    ) -> Result<PathBuf> {
        let target = target.ok_or(Error::MissingRenderTarget)?;
        let png = rasterize_async(target).await?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path();
        tokio::fs::write(&path, &png).await?;
        tracing::info!(path = %path.display(), bytes = png.len(), "二维码已导出");

        notifier.normal(strings.get(Key::Downloaded), &path.display().to_string());
        Ok(path)
    }

    /// 栅格化后返回 PNG data URI，不落盘也不通知
    pub async fn export_data_uri(&self, target: Option<&QrSvg>) -> Result<String> {
        let target = target.ok_or(Error::MissingRenderTarget)?;
        let png = rasterize_async(target).await?;
        Ok(encode_data_uri(PNG_MIME, &png))
    }
}

/// SVG → data URI → 后台线程解码绘制 → PNG 字节
async fn rasterize_async(target: &QrSvg) -> Result<Vec<u8>> {
    let uri = encode_data_uri(SVG_MIME, target.markup().as_bytes());
    tokio::task::spawn_blocking(move || rasterize(&uri))
        .await
        .map_err(|e| Error::Rasterize(e.to_string()))?
}

fn rasterize(svg_uri: &str) -> Result<Vec<u8>> {
    let (mime, data) = decode_data_uri(svg_uri)?;
    if mime != SVG_MIME {
        return Err(Error::DataUri(format!("期望 {SVG_MIME}，实际为 {mime}")));
    }

    let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
        .map_err(|e| Error::Rasterize(e.to_string()))?;

    // 画布与图像自然尺寸一致
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| Error::Rasterize(format!("无法创建 {}x{} 画布", size.width(), size.height())))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    encode_png(&pixmap)
}

fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>> {
    // tiny-skia 存的是预乘 alpha，写 PNG 前还原
    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let img = RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .ok_or_else(|| Error::Rasterize("像素缓冲区大小不匹配".into()))?;

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

pub fn encode_data_uri(mime: &str, data: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(data))
}

/// 只支持 base64 形式
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::DataUri("缺少 data: 前缀".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::DataUri("缺少逗号分隔符".into()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| Error::DataUri("仅支持 base64 编码".into()))?;
    let data = STANDARD
        .decode(payload)
        .map_err(|e| Error::DataUri(e.to_string()))?;
    Ok((mime.to_string(), data))
}

/// 默认导出目录：下载目录，取不到时用当前目录
pub fn default_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| Path::new(".").to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::notify::testing::Recorder;
    use crate::qr::{self, RenderOptions};

    fn target() -> QrSvg {
        qr::render("https://example.com", &RenderOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn missing_target_is_a_silent_skip() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), DEFAULT_FILE_NAME);
        let notifier = Recorder::default();

        let err = exporter
            .export(None, &notifier, Language::En.strings())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingRenderTarget));
        assert!(!exporter.path().exists());
        assert!(notifier.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn export_writes_png_at_natural_size() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path().join("out"), DEFAULT_FILE_NAME);
        let notifier = Recorder::default();
        let svg = target();

        let path = exporter
            .export(Some(&svg), &notifier, Language::En.strings())
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "qrcode.png");
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (svg.width, svg.height));

        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "QR code downloaded");
    }

    #[tokio::test]
    async fn overlapping_exports_both_complete() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), DEFAULT_FILE_NAME);
        let notifier = Recorder::default();
        let svg = target();
        let strings = Language::Fr.strings();

        let (a, b) = tokio::join!(
            exporter.export(Some(&svg), &notifier, strings),
            exporter.export(Some(&svg), &notifier, strings),
        );

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(notifier.sent.borrow().len(), 2);
    }

    #[tokio::test]
    async fn data_uri_export_decodes_to_png() {
        let exporter = Exporter::new(".", DEFAULT_FILE_NAME);
        let svg = target();

        let uri = exporter.export_data_uri(Some(&svg)).await.unwrap();
        let (mime, bytes) = decode_data_uri(&uri).unwrap();

        assert_eq!(mime, "image/png");
        let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(img.width(), svg.width);
    }

    #[test]
    fn dark_modules_use_requested_color() {
        let opts = RenderOptions {
            size: 200,
            color: "#ff0000".into(),
        };
        let svg = qr::render("color", &opts).unwrap();
        let uri = encode_data_uri(SVG_MIME, svg.markup().as_bytes());
        let png = rasterize(&uri).unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();

        let has_red = img.pixels().any(|p| p.0 == [255, 0, 0, 255]);
        let has_white = img.pixels().any(|p| p.0 == [255, 255, 255, 255]);
        assert!(has_red && has_white);
    }

    #[test]
    fn decode_data_uri_rejects_malformed_input() {
        assert!(decode_data_uri("image/png;base64,AAAA").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(decode_data_uri("data:text/plain,hello").is_err());
        assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
    }
}
