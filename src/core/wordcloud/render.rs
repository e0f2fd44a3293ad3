use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::layout::TextMeasure;
use super::WordCloud;
use crate::error::{RenderError, Result};

/// Viridis, dark to light.
const PALETTE: &[[u8; 3]] = &[
    [0x44, 0x01, 0x54],
    [0x48, 0x28, 0x78],
    [0x3e, 0x49, 0x89],
    [0x31, 0x68, 0x8e],
    [0x26, 0x82, 0x8e],
    [0x1f, 0x9e, 0x89],
    [0x35, 0xb7, 0x79],
    [0x6e, 0xce, 0x58],
    [0xb5, 0xde, 0x2b],
    [0xfd, 0xe7, 0x25],
];

/// Fonts tried, in order, when none is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// DejaVu Sans (see `assets/fonts/DejaVuSans-LICENSE.txt`), used when no
/// font is configured and none of the candidates exist.
const BUNDLED_FONT: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");

pub fn palette_color(index: usize) -> [u8; 3] {
    PALETTE[index % PALETTE.len()]
}

/// Parse `white`, `black` and a few other names, or `#rrggbb`.
pub fn parse_color(value: &str) -> Result<[u8; 3]> {
    let value = value.trim().to_lowercase();
    let named = match value.as_str() {
        "white" => Some([255, 255, 255]),
        "black" => Some([0, 0, 0]),
        "gray" | "grey" => Some([128, 128, 128]),
        "ivory" => Some([255, 255, 240]),
        "navy" => Some([0, 0, 128]),
        _ => None,
    };
    if let Some(rgb) = named {
        return Ok(rgb);
    }

    let hex = value
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| RenderError::InvalidColor(value.clone()))?;

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| RenderError::InvalidColor(value.clone()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

fn hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Text metrics from a TrueType/OpenType font.
pub struct FontMeasure {
    font: FontVec,
}

impl FontMeasure {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(RenderError::Io)?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| RenderError::InvalidFont {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Loaded font {}", path.display());
        Ok(Self { font })
    }

    pub fn bundled() -> Result<Self> {
        let font = FontVec::try_from_vec(BUNDLED_FONT.to_vec()).map_err(|e| RenderError::InvalidFont {
            path: PathBuf::from("<bundled>"),
            reason: e.to_string(),
        })?;
        Ok(Self { font })
    }

    /// Use the configured font, else the first system font found, else the
    /// bundled one.
    pub fn discover(configured: Option<&Path>) -> Result<Self> {
        if let Some(path) = configured {
            return Self::load(path);
        }

        match FONT_CANDIDATES.iter().map(PathBuf::from).find(|p| p.exists()) {
            Some(path) => Self::load(&path),
            None => {
                debug!("No system font found, using bundled DejaVu Sans");
                Self::bundled()
            }
        }
    }

    fn advance_layout(&self, text: &str, font_size: f32, mut each: impl FnMut(ab_glyph::GlyphId, f32)) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(font_size));
        let mut caret = 0.0f32;
        let mut previous = None;
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            each(id, caret);
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
        caret
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
        let width = self.advance_layout(text, font_size, |_, _| {});
        let scaled = self.font.as_scaled(PxScale::from(font_size));
        let height = scaled.ascent() - scaled.descent();
        (width.ceil() as u32, height.ceil() as u32)
    }
}

/// Font-free estimate for SVG output, where the viewer does the real
/// text shaping. Glyphs are taken as 3/5 of the font size wide, lines as 6/5 high.
pub struct ApproxMeasure;

impl TextMeasure for ApproxMeasure {
    fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
        let width = text.chars().count() as f32 * font_size * 3.0 / 5.0;
        let height = font_size * 6.0 / 5.0;
        (width.ceil() as u32, height.ceil() as u32)
    }
}

/// Rasterize a laid-out cloud.
pub fn to_image(cloud: &WordCloud, font: &FontMeasure, background: [u8; 3]) -> RgbaImage {
    let [br, bg, bb] = background;
    let mut image = RgbaImage::from_pixel(cloud.width, cloud.height, Rgba([br, bg, bb, 255]));

    for word in &cloud.words {
        let scale = PxScale::from(word.font_size);
        let baseline = word.y as f32 + font.font.as_scaled(scale).ascent();
        let color = palette_color(word.color);

        let mut glyphs = Vec::new();
        font.advance_layout(&word.text, word.font_size, |id, caret| {
            glyphs.push(id.with_scale_and_position(scale, point(word.x as f32 + caret, baseline)));
        });

        for glyph in glyphs {
            let outlined = match font.font.outline_glyph(glyph) {
                Some(outlined) => outlined,
                None => continue,
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 || px >= cloud.width as i64 || py >= cloud.height as i64 {
                    return;
                }
                let pixel = image.get_pixel_mut(px as u32, py as u32);
                blend(pixel, color, coverage);
            });
        }
    }

    image
}

fn blend(pixel: &mut Rgba<u8>, color: [u8; 3], coverage: f32) {
    let alpha = coverage.clamp(0.0, 1.0);
    for channel in 0..3 {
        let base = pixel.0[channel] as f32;
        let value = base + (color[channel] as f32 - base) * alpha;
        pixel.0[channel] = value.round() as u8;
    }
}

/// Serialize a laid-out cloud as an SVG document.
pub fn to_svg(cloud: &WordCloud, background: [u8; 3]) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = cloud.width,
        h = cloud.height
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="{}"/>"#, hex_color(background));

    for word in &cloud.words {
        // Approximate ascent, matching ApproxMeasure's line height
        let baseline = word.y as f32 + word.font_size;
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.1}" font-family="sans-serif" font-size="{:.1}" fill="{}">{}</text>"#,
            word.x,
            baseline,
            word.font_size,
            hex_color(palette_color(word.color)),
            escape_xml(&word.text)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
