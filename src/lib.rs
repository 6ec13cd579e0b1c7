//! memekit
//!
//! Compose image macros ("memes"): put a top and a bottom caption on a photo
//! in an outlined high-contrast style, flatten the result into one image and
//! hand it to a share target.
//!
//! # Features
//!
//! - **Deterministic compositor**: identical inputs give pixel-identical output
//! - **Shrink-to-fit captions**: long captions shrink down to a minimum size,
//!   then clip at the image edges
//! - **Editor glue**: placeholder clearing, keyboard avoidance and an export
//!   guard for the single-screen editing flow
//!
//! # Example
//!
//! ```
//! use memekit::{compositor::Compositor, TextStyle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let photo = image::RgbaImage::from_pixel(320, 240, image::Rgba([40, 90, 160, 255]));
//! let compositor = Compositor::new(TextStyle::default())?;
//! let flattened = compositor.compose(&photo, "ONE DOES NOT SIMPLY", "WRITE A MEME IN RUST")?;
//! assert_eq!(flattened.dimensions(), photo.dimensions());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod model;
pub use model::Meme;

pub mod compositor;
pub use compositor::{compose, Compositor};

// Glyph faces, caption layout, paint planning and rasterization
pub mod rendering;

// Event handlers for the single-screen editor
pub mod editor;
pub use editor::{CaptionField, MemeEditor};

// Image acquisition, keyboard notifications
pub mod platform;

pub mod share;

/// An RGBA8 color used by caption styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(c: Color) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

/// Which face captions are drawn with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontSpec {
    /// Built-in bold bitmap face; needs no font files
    #[default]
    Builtin,
    /// A TrueType/OpenType font loaded from disk
    File(PathBuf),
}

/// Largest font size, in pixels, a style may ask for
pub const MAX_FONT_SIZE: f32 = 1024.0;

/// Largest outline width, as a percentage of the font size
pub const MAX_STROKE_WIDTH: f32 = 100.0;

/// Caption style applied uniformly to both captions
///
/// The defaults give the classic image-macro look: white fill, black
/// outline, large bold lettering.
///
/// `stroke_width` is a percentage of the font size. A negative value draws
/// the outline and the fill, a positive one draws only the outline, and
/// zero draws only the fill.
///
/// # Examples
///
/// ```
/// let style = memekit::TextStyle::default();
/// assert!(style.stroke_width < 0.0);
/// assert_eq!(style.fill_color, memekit::Color::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Outline color
    pub stroke_color: Color,
    /// Glyph fill color
    pub fill_color: Color,
    /// Face to draw with
    pub font: FontSpec,
    /// Preferred font size in pixels
    pub font_size: f32,
    /// Outline width as a percentage of the font size
    pub stroke_width: f32,
    /// Captions never shrink below this size; past it they are clipped
    pub min_font_size: f32,
    /// Distance in pixels between a caption and the image edges
    pub margin: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            fill_color: Color::WHITE,
            font: FontSpec::Builtin,
            font_size: 40.0,
            stroke_width: -4.6,
            min_font_size: 8.0,
            margin: 8,
        }
    }
}

impl TextStyle {
    /// Parse a style from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let style: TextStyle = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    /// Read and parse a JSON style file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        log::debug!("loading text style from {}", path.display());
        Self::from_json_str(&raw)
    }

    /// Reject sizes and widths the compositor cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(Error::ConfigError(format!(
                "font_size must be a positive number, got {}",
                self.font_size
            )));
        }
        if !self.min_font_size.is_finite() || self.min_font_size <= 0.0 {
            return Err(Error::ConfigError(format!(
                "min_font_size must be a positive number, got {}",
                self.min_font_size
            )));
        }
        if self.font_size > MAX_FONT_SIZE {
            return Err(Error::ConfigError(format!(
                "font_size must be at most {}, got {}",
                MAX_FONT_SIZE, self.font_size
            )));
        }
        if self.min_font_size > self.font_size {
            return Err(Error::ConfigError(format!(
                "min_font_size ({}) is larger than font_size ({})",
                self.min_font_size, self.font_size
            )));
        }
        if !self.stroke_width.is_finite() || self.stroke_width.abs() > MAX_STROKE_WIDTH {
            return Err(Error::ConfigError(format!(
                "stroke_width must be between -{0} and {0}, got {1}",
                MAX_STROKE_WIDTH, self.stroke_width
            )));
        }
        Ok(())
    }

    /// Outline radius in pixels at the given font size
    pub fn stroke_radius(&self, font_px: f32) -> f32 {
        self.stroke_width.abs() * font_px / 100.0
    }

    /// Whether glyph interiors are painted
    pub fn draws_fill(&self) -> bool {
        self.stroke_width <= 0.0
    }

    /// Whether an outline is painted
    pub fn draws_stroke(&self) -> bool {
        self.stroke_width != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = TextStyle::default();
        assert_eq!(style.stroke_color, Color::BLACK);
        assert_eq!(style.fill_color, Color::WHITE);
        assert_eq!(style.font, FontSpec::Builtin);
        assert!(style.draws_fill());
        assert!(style.draws_stroke());
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_stroke_modes() {
        let outline_only = TextStyle { stroke_width: 3.0, ..Default::default() };
        assert!(!outline_only.draws_fill());
        assert!(outline_only.draws_stroke());

        let fill_only = TextStyle { stroke_width: 0.0, ..Default::default() };
        assert!(fill_only.draws_fill());
        assert!(!fill_only.draws_stroke());
        assert_eq!(fill_only.stroke_radius(40.0), 0.0);
    }

    #[test]
    fn test_stroke_radius_scales_with_font() {
        let style = TextStyle { stroke_width: -5.0, ..Default::default() };
        assert!((style.stroke_radius(40.0) - 2.0).abs() < 1e-6);
        assert!((style.stroke_radius(80.0) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let style = TextStyle::from_json_str(r#"{"font_size": 64, "fill_color": {"r": 255, "g": 255, "b": 0}}"#)
            .expect("parse style");
        assert_eq!(style.font_size, 64.0);
        assert_eq!(style.fill_color, Color::rgb(255, 255, 0));
        assert_eq!(style.stroke_color, Color::BLACK);
        assert_eq!(style.margin, 8);
    }

    #[test]
    fn test_font_file_json() {
        let style = TextStyle::from_json_str(r#"{"font": {"file": "fonts/impact.ttf"}}"#).expect("parse style");
        assert_eq!(style.font, FontSpec::File(PathBuf::from("fonts/impact.ttf")));
    }

    #[test]
    fn test_invalid_styles_rejected() {
        assert!(matches!(
            TextStyle::from_json_str(r#"{"font_size": 0}"#),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(
            TextStyle::from_json_str(r#"{"font_size": 10, "min_font_size": 20}"#),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(TextStyle::from_json_str("{not json"), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_oversized_styles_rejected() {
        let huge_font = TextStyle { font_size: 6e8, min_font_size: 6e8, ..Default::default() };
        assert!(matches!(huge_font.validate(), Err(Error::ConfigError(_))));

        let huge_stroke = TextStyle { stroke_width: -1e12, ..Default::default() };
        assert!(matches!(huge_stroke.validate(), Err(Error::ConfigError(_))));

        let past_full_width = TextStyle { stroke_width: 100.5, ..Default::default() };
        assert!(past_full_width.validate().is_err());

        let at_limits = TextStyle {
            font_size: MAX_FONT_SIZE,
            min_font_size: MAX_FONT_SIZE,
            stroke_width: -MAX_STROKE_WIDTH,
            ..Default::default()
        };
        assert!(at_limits.validate().is_ok());
    }
}
