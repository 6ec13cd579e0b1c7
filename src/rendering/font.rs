//! Glyph faces: turn a line of caption text into coverage

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};

use crate::rendering::raster::Coverage;
use crate::{Error, FontSpec, Result};

/// Pixel box a line of text may ink, relative to the top-left corner of its
/// line box. Right and bottom are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBounds {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl InkBounds {
    /// The line box itself
    pub fn line_box(width: u32, height: u32) -> Self {
        Self { left: 0, top: 0, right: width as i64, bottom: height as i64 }
    }

    /// Smallest box covering both
    pub fn union(self, other: InkBounds) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// A face that can measure and rasterize single lines of text.
pub trait GlyphFace: Send + Sync {
    /// Short human-readable name used in logs
    fn name(&self) -> &str;

    /// Height in pixels of one line at `px`
    fn line_height(&self, px: f32) -> u32;

    /// Advance width in pixels of `text` at `px`
    fn measure(&self, text: &str, px: f32) -> u32;

    /// Where `rasterize` may put ink. Faces whose glyphs overhang their
    /// advance (italics, negative side bearings) must report it here.
    fn ink_bounds(&self, text: &str, px: f32) -> InkBounds {
        InkBounds::line_box(self.measure(text, px), self.line_height(px))
    }

    /// Draw `text` with its line box's top-left corner at `(left, top)`
    fn rasterize(&self, text: &str, px: f32, coverage: &mut Coverage, left: i64, top: i64);
}

/// Load the face named by a style's `font` option
pub fn load_face(spec: &FontSpec) -> Result<Box<dyn GlyphFace>> {
    match spec {
        FontSpec::Builtin => Ok(Box::new(BitmapFace)),
        #[cfg(feature = "truetype")]
        FontSpec::File(path) => Ok(Box::new(TrueTypeFace::from_file(path)?)),
        #[cfg(not(feature = "truetype"))]
        FontSpec::File(path) => Err(Error::FontError(format!(
            "cannot load {}: built without the `truetype` feature",
            path.display()
        ))),
    }
}

const CELL: u32 = 8;

/// Built-in 8x8 bitmap face, scaled by whole multiples.
///
/// Characters missing from the basic and Latin-1 tables draw as `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFace;

impl BitmapFace {
    /// Integer magnification used for a requested pixel size
    pub fn scale_for(px: f32) -> u32 {
        ((px / CELL as f32).floor() as u32).max(1)
    }

    fn glyph(c: char) -> [u8; 8] {
        BASIC_FONTS
            .get(c)
            .or_else(|| LATIN_FONTS.get(c))
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8])
    }
}

impl GlyphFace for BitmapFace {
    fn name(&self) -> &str {
        "builtin-8x8"
    }

    fn line_height(&self, px: f32) -> u32 {
        CELL.saturating_mul(Self::scale_for(px))
    }

    fn measure(&self, text: &str, px: f32) -> u32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        chars.saturating_mul(CELL).saturating_mul(Self::scale_for(px))
    }

    fn rasterize(&self, text: &str, px: f32, coverage: &mut Coverage, left: i64, top: i64) {
        let scale = Self::scale_for(px) as i64;
        let advance = CELL as i64 * scale;
        for (i, c) in text.chars().enumerate() {
            let origin_x = left + i as i64 * advance;
            if origin_x >= coverage.width() as i64 {
                break;
            }
            if origin_x + advance <= 0 {
                continue;
            }
            for (row, bits) in Self::glyph(c).iter().enumerate() {
                for col in 0..CELL {
                    // bit 0 is the leftmost column
                    if (bits >> col) & 1 == 0 {
                        continue;
                    }
                    let x0 = origin_x + col as i64 * scale;
                    let y0 = top + row as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            coverage.accumulate(x0 + dx, y0 + dy, 1.0);
                        }
                    }
                }
            }
        }
    }
}

/// A TrueType/OpenType face loaded from font bytes.
#[cfg(feature = "truetype")]
pub struct TrueTypeFace {
    font: rusttype::Font<'static>,
    name: String,
}

#[cfg(feature = "truetype")]
impl TrueTypeFace {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let font = rusttype::Font::try_from_vec(bytes)
            .ok_or_else(|| Error::FontError(format!("{} is not a usable TrueType/OpenType font", name)))?;
        Ok(Self { font, name })
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::FontError(format!("failed to read {}: {}", path.display(), e)))?;
        log::debug!("loaded font {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(path.display().to_string(), bytes)
    }

    fn ascent(&self, px: f32) -> f32 {
        self.font.v_metrics(rusttype::Scale::uniform(px)).ascent
    }
}

#[cfg(feature = "truetype")]
impl GlyphFace for TrueTypeFace {
    fn name(&self) -> &str {
        &self.name
    }

    fn line_height(&self, px: f32) -> u32 {
        let v = self.font.v_metrics(rusttype::Scale::uniform(px));
        (v.ascent - v.descent).ceil().max(1.0) as u32
    }

    fn measure(&self, text: &str, px: f32) -> u32 {
        let scale = rusttype::Scale::uniform(px);
        let width = self
            .font
            .layout(text, scale, rusttype::point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        width.ceil().max(0.0) as u32
    }

    fn ink_bounds(&self, text: &str, px: f32) -> InkBounds {
        let line = InkBounds::line_box(self.measure(text, px), self.line_height(px));
        let scale = rusttype::Scale::uniform(px);
        let baseline = rusttype::point(0.0, self.ascent(px));
        self.font
            .layout(text, scale, baseline)
            .filter_map(|g| g.pixel_bounding_box())
            // one pixel of slack for subpixel drift once the line is moved
            .map(|bb| InkBounds {
                left: bb.min.x as i64 - 1,
                top: bb.min.y as i64 - 1,
                right: bb.max.x as i64 + 1,
                bottom: bb.max.y as i64 + 1,
            })
            .fold(line, InkBounds::union)
    }

    fn rasterize(&self, text: &str, px: f32, coverage: &mut Coverage, left: i64, top: i64) {
        let scale = rusttype::Scale::uniform(px);
        let baseline = rusttype::point(left as f32, top as f32 + self.ascent(px));
        for glyph in self.font.layout(text, scale, baseline) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    coverage.accumulate(bb.min.x as i64 + gx as i64, bb.min.y as i64 + gy as i64, v);
                });
            }
        }
    }
}
