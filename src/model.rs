//! The meme value type

use std::sync::Arc;

use image::RgbaImage;

use crate::{Error, Result};

/// A composed (or to-be-composed) meme.
///
/// Values are immutable: composing again, or editing a caption, produces a
/// new `Meme`. A meme without a rendered image is a draft and cannot be
/// exported.
#[derive(Debug, Clone)]
pub struct Meme {
    top_text: String,
    bottom_text: String,
    original_image: Arc<RgbaImage>,
    rendered_image: Option<Arc<RgbaImage>>,
}

impl Meme {
    /// Build a draft from captions and a source image.
    pub fn draft(
        top_text: impl Into<String>,
        bottom_text: impl Into<String>,
        original_image: impl Into<Arc<RgbaImage>>,
    ) -> Self {
        Self {
            top_text: top_text.into(),
            bottom_text: bottom_text.into(),
            original_image: original_image.into(),
            rendered_image: None,
        }
    }

    /// Return a new meme carrying `rendered` as its flattened image.
    ///
    /// Fails with `InvalidInput` when the render's dimensions differ from the
    /// original's.
    pub fn with_render(&self, rendered: impl Into<Arc<RgbaImage>>) -> Result<Self> {
        let rendered = rendered.into();
        if rendered.dimensions() != self.original_image.dimensions() {
            let (ow, oh) = self.original_image.dimensions();
            let (rw, rh) = rendered.dimensions();
            return Err(Error::InvalidInput(format!(
                "rendered image is {}x{} but the original is {}x{}",
                rw, rh, ow, oh
            )));
        }
        Ok(Self {
            top_text: self.top_text.clone(),
            bottom_text: self.bottom_text.clone(),
            original_image: Arc::clone(&self.original_image),
            rendered_image: Some(rendered),
        })
    }

    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    pub fn original_image(&self) -> &RgbaImage {
        &self.original_image
    }

    /// The flattened image, or `MissingRender` for a draft
    pub fn rendered_image(&self) -> Result<&RgbaImage> {
        self.rendered_image.as_deref().ok_or(Error::MissingRender)
    }

    pub fn is_draft(&self) -> bool {
        self.rendered_image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn draft_has_no_render() {
        let meme = Meme::draft("Hello", "World", solid(4, 3));
        assert!(meme.is_draft());
        assert!(matches!(meme.rendered_image(), Err(Error::MissingRender)));
        assert_eq!(meme.top_text(), "Hello");
        assert_eq!(meme.bottom_text(), "World");
    }

    #[test]
    fn with_render_keeps_draft_untouched() {
        let draft = Meme::draft("a", "b", solid(4, 3));
        let done = draft.with_render(solid(4, 3)).expect("same size");
        assert!(draft.is_draft());
        assert!(!done.is_draft());
        assert_eq!(done.rendered_image().unwrap().dimensions(), (4, 3));
    }

    #[test]
    fn with_render_rejects_other_dimensions() {
        let draft = Meme::draft("a", "b", solid(4, 3));
        let err = draft.with_render(solid(3, 4)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
