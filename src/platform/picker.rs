//! Image acquisition: photo library and camera pickers

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::Result;

/// Where a picker gets its image from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    PhotoLibrary,
    Camera,
}

/// Supplies source images to the editor.
///
/// `pick` returns `Ok(None)` when the user dismisses the picker without
/// choosing anything; that is not an error.
pub trait ImagePicker: Send + Sync {
    fn is_source_available(&self, source: ImageSource) -> bool;
    fn pick(&self, source: ImageSource) -> Result<Option<RgbaImage>>;
}

/// Decode an image file into an RGBA buffer
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path)?.to_rgba8();
    log::debug!("decoded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

/// Picker backed by a single file standing in for the photo library.
/// There is no camera.
#[derive(Debug, Clone)]
pub struct FileImagePicker {
    path: PathBuf,
}

impl FileImagePicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImagePicker for FileImagePicker {
    fn is_source_available(&self, source: ImageSource) -> bool {
        source == ImageSource::PhotoLibrary
    }

    fn pick(&self, source: ImageSource) -> Result<Option<RgbaImage>> {
        if !self.is_source_available(source) {
            log::warn!("{:?} is not available; nothing picked", source);
            return Ok(None);
        }
        load_image(&self.path).map(Some)
    }
}

/// Picker whose library is always dismissed without a selection
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopImagePicker;

impl NoopImagePicker {
    pub fn new() -> Self {
        NoopImagePicker
    }
}

impl ImagePicker for NoopImagePicker {
    fn is_source_available(&self, source: ImageSource) -> bool {
        source == ImageSource::PhotoLibrary
    }

    fn pick(&self, _source: ImageSource) -> Result<Option<RgbaImage>> {
        Ok(None)
    }
}
