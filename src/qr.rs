// src/qr.rs — 用 qrcode crate 生成 SVG 渲染目标和 UTF-8 块字符预览

use crate::error::{Error, Result};
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};

/// 渲染参数
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// 最小边长（像素）
    pub size: u32,
    /// 前景色，#rrggbb
    pub color: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 200,
            color: crate::types::DEFAULT_COLOR.into(),
        }
    }
}

/// 渲染好的矢量二维码，导出时的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSvg {
    markup: String,
    pub width: u32,
    pub height: u32,
}

impl QrSvg {
    /// 序列化为 SVG 文本
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

/// 编码 payload 为 SVG：纠错等级 H，带静区
pub fn render(payload: &str, opts: &RenderOptions) -> Result<QrSvg> {
    let color = normalize_color(&opts.color)?;
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;
    let markup = code
        .render::<svg::Color>()
        .min_dimensions(opts.size, opts.size)
        .dark_color(svg::Color(&color))
        .light_color(svg::Color("#ffffff"))
        .quiet_zone(true)
        .build();

    // 实际尺寸是模块数的整数倍，可能略大于 min_dimensions
    let (width, height) = svg_dimensions(&markup)
        .ok_or_else(|| Error::Rasterize("SVG 缺少 width/height 属性".into()))?;

    Ok(QrSvg {
        markup,
        width,
        height,
    })
}

/// 生成终端/rofi 用的块字符二维码
pub fn preview(payload: &str) -> Result<String> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;
    let image = code
        .render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build();

    // 每行加两个前导空格，rofi 显示时稍微居中
    let padded = image
        .lines()
        .map(|l| format!("  {l}"))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(padded)
}

/// 校验 #rgb / #rrggbb（# 可省略），统一成小写 #rrggbb
pub fn normalize_color(input: &str) -> Result<String> {
    let hex = input.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(input.to_string()));
    }
    let full = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return Err(Error::InvalidColor(input.to_string())),
    };
    Ok(format!("#{}", full.to_ascii_lowercase()))
}

fn svg_dimensions(markup: &str) -> Option<(u32, u32)> {
    Some((attr_u32(markup, "width")?, attr_u32(markup, "height")?))
}

fn attr_u32(markup: &str, name: &str) -> Option<u32> {
    let key = format!(" {name}=\"");
    let start = markup.find(&key)? + key.len();
    let end = markup[start..].find('"')? + start;
    markup[start..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_produces_svg_at_least_requested_size() {
        let svg = render("https://example.com", &RenderOptions::default()).unwrap();
        assert!(svg.markup().contains("<svg"));
        assert!(svg.width >= 200);
        assert_eq!(svg.width, svg.height);
    }

    #[test]
    fn render_uses_foreground_color() {
        let opts = RenderOptions {
            size: 120,
            color: "#1E90FF".into(),
        };
        let svg = render("hello", &opts).unwrap();
        assert!(svg.markup().contains("#1e90ff"));
    }

    #[test]
    fn render_rejects_bad_color() {
        let opts = RenderOptions {
            size: 200,
            color: "blue".into(),
        };
        assert!(matches!(render("hello", &opts), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn oversized_payload_is_an_encode_error() {
        let huge = "x".repeat(4000);
        assert!(matches!(
            render(&huge, &RenderOptions::default()),
            Err(Error::Encode(_))
        ));
    }

    #[test]
    fn normalize_color_accepts_short_and_long_forms() {
        assert_eq!(normalize_color("#ABC").unwrap(), "#aabbcc");
        assert_eq!(normalize_color("00ff7f").unwrap(), "#00ff7f");
        assert!(normalize_color("#12345").is_err());
        assert!(normalize_color("#gggggg").is_err());
        assert!(normalize_color("").is_err());
    }

    #[test]
    fn preview_is_padded_block_text() {
        let text = preview("hi").unwrap();
        assert!(text.lines().count() > 5);
        assert!(text.lines().all(|l| l.starts_with("  ")));
    }
}
