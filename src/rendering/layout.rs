//! Caption placement: shrink-to-fit sizing and top/bottom anchoring
//!
//! Each caption is one line. It starts at the style's font size and, when
//! wider than the image minus both margins, shrinks until it fits or reaches
//! `min_font_size`. Captions still too wide at the minimum are centered and
//! clipped by the image edges.

use serde::Serialize;

use crate::rendering::font::GlyphFace;
use crate::TextStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Whether `(px, py)` lies inside the rect grown by `pad` on every side
    pub fn contains_padded(&self, px: i64, py: i64, pad: i64) -> bool {
        px >= self.x - pad
            && py >= self.y - pad
            && px < self.x + self.width as i64 + pad
            && py < self.y + self.height as i64 + pad
    }
}

/// Where and how large one caption is drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionLayout {
    pub position: CaptionPosition,
    pub text: String,
    pub font_px: f32,
    /// Line box of the glyphs, excluding the outline
    pub rect: Rect,
    /// True when the caption is wider than the image even at the minimum size
    pub clipped: bool,
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn normalize_caption(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Largest font size not above the style's that fits `available` pixels,
/// floored at `min_font_size`. Returns the size and whether it still
/// overflows.
pub fn fit_font_size(face: &dyn GlyphFace, text: &str, style: &TextStyle, available: u32) -> (f32, bool) {
    let min = style.min_font_size;
    let mut px = style.font_size;
    let width = face.measure(text, px);
    if width > available {
        px = (px * available as f32 / width as f32).max(min);
        while px > min && face.measure(text, px) > available {
            px = (px - 1.0).max(min);
        }
    }
    (px, face.measure(text, px) > available)
}

/// Lay out one caption on an image of `width` x `height`.
///
/// Returns `None` for captions that are empty after normalization.
pub fn layout_caption(
    face: &dyn GlyphFace,
    style: &TextStyle,
    position: CaptionPosition,
    text: &str,
    width: u32,
    height: u32,
) -> Option<CaptionLayout> {
    let text = normalize_caption(text);
    if text.is_empty() {
        return None;
    }

    let available = width.saturating_sub(style.margin.saturating_mul(2)).max(1);
    let (font_px, clipped) = fit_font_size(face, &text, style, available);
    let text_w = face.measure(&text, font_px);
    let line_h = face.line_height(font_px);

    let x = (width as i64 - text_w as i64).div_euclid(2);
    let y = match position {
        CaptionPosition::Top => style.margin as i64,
        CaptionPosition::Bottom => height as i64 - style.margin as i64 - line_h as i64,
    };

    if clipped {
        log::warn!(
            "{:?} caption is {}px wide at the minimum size {}; clipping to {}px",
            position, text_w, font_px, width
        );
    }

    Some(CaptionLayout {
        position,
        text,
        font_px,
        rect: Rect { x, y, width: text_w, height: line_h },
        clipped,
    })
}

/// Lay out both captions, skipping empty ones. Top comes first.
pub fn layout_captions(
    face: &dyn GlyphFace,
    style: &TextStyle,
    width: u32,
    height: u32,
    top: &str,
    bottom: &str,
) -> Vec<CaptionLayout> {
    [(CaptionPosition::Top, top), (CaptionPosition::Bottom, bottom)]
        .into_iter()
        .filter_map(|(position, text)| layout_caption(face, style, position, text, width, height))
        .collect()
}
