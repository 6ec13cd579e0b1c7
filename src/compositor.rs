//! The meme compositor: flatten captions onto a copy of a source image

use std::sync::Arc;

use image::RgbaImage;

use crate::model::Meme;
use crate::rendering::font::{load_face, GlyphFace};
use crate::rendering::layout::{layout_captions, CaptionLayout};
use crate::rendering::paint::plan;
use crate::rendering::paint_commands;
use crate::{Error, Result, TextStyle};

/// Renders captions with one style and one loaded face.
///
/// Build once and reuse: loading a font file happens in [`Compositor::new`].
pub struct Compositor {
    style: TextStyle,
    face: Box<dyn GlyphFace>,
}

impl Compositor {
    pub fn new(style: TextStyle) -> Result<Self> {
        style.validate()?;
        let face = load_face(&style.font)?;
        log::debug!("compositor ready with face {} at {}px", face.name(), style.font_size);
        Ok(Self { style, face })
    }

    /// Use a face that was loaded elsewhere; `style.font` is ignored.
    pub fn with_face(style: TextStyle, face: Box<dyn GlyphFace>) -> Result<Self> {
        style.validate()?;
        Ok(Self { style, face })
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Caption placement for an image of the given size.
    ///
    /// These are the exact rects [`Compositor::compose`] draws into, so a
    /// live preview can position editable fields over them.
    pub fn layout(&self, width: u32, height: u32, top: &str, bottom: &str) -> Vec<CaptionLayout> {
        layout_captions(self.face.as_ref(), &self.style, width, height, top, bottom)
    }

    /// Draw `top` and `bottom` onto a copy of `original`.
    ///
    /// The result always has the original's dimensions; empty captions draw
    /// nothing.
    pub fn compose(&self, original: &RgbaImage, top: &str, bottom: &str) -> Result<RgbaImage> {
        let (width, height) = original.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "source image has zero area ({}x{})",
                width, height
            )));
        }

        let layouts = self.layout(width, height, top, bottom);
        let commands = plan(&layouts, &self.style);
        log::debug!(
            "composing {}x{} with {} caption(s), {} paint command(s)",
            width,
            height,
            layouts.len(),
            commands.len()
        );

        let mut canvas = original.clone();
        paint_commands(&mut canvas, self.face.as_ref(), &commands);
        Ok(canvas)
    }

    /// Compose a draft's captions onto its image and return the finished meme.
    pub fn render(&self, draft: &Meme) -> Result<Meme> {
        let rendered = self.compose(draft.original_image(), draft.top_text(), draft.bottom_text())?;
        draft.with_render(Arc::new(rendered))
    }
}

/// One-shot composition with an explicit style.
///
/// Fails with `InvalidInput` when `original` is absent or has zero area.
pub fn compose(original: Option<&RgbaImage>, top: &str, bottom: &str, style: &TextStyle) -> Result<RgbaImage> {
    let original = original.ok_or_else(|| Error::InvalidInput("no source image selected".into()))?;
    Compositor::new(style.clone())?.compose(original, top, bottom)
}
