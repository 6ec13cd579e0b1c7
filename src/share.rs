//! Share/export hand-off for finished memes

use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::model::Meme;
use crate::rendering::{encode_png, EncodedImage};
use crate::Result;

/// How a share attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Completed,
    Cancelled,
}

/// A finished meme plus its PNG encoding, ready for a share target
#[derive(Debug, Clone)]
pub struct ShareItem {
    meme: Meme,
    encoded: EncodedImage,
}

impl ShareItem {
    pub fn meme(&self) -> &Meme {
        &self.meme
    }

    pub fn png(&self) -> &EncodedImage {
        &self.encoded
    }

    /// `data:` URI carrying the PNG, for targets that take URLs
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.encoded.png_data)
        )
    }
}

/// Receives finished memes (a share sheet, a file, a clipboard, ...)
pub trait ShareTarget: Send + Sync {
    fn share(&self, item: &ShareItem) -> Result<ShareOutcome>;
}

/// Export `meme` to `target`.
///
/// Drafts are refused with `MissingRender` before anything reaches the
/// target.
pub fn export(meme: &Meme, target: &dyn ShareTarget) -> Result<ShareOutcome> {
    let rendered = meme.rendered_image()?;
    let encoded = encode_png(rendered)?;
    let item = ShareItem { meme: meme.clone(), encoded };
    let outcome = target.share(&item)?;
    log::info!(
        "shared {}x{} meme ({} bytes): {:?}",
        item.encoded.width,
        item.encoded.height,
        item.encoded.png_data.len(),
        outcome
    );
    Ok(outcome)
}

/// Writes the PNG to a fixed path
#[derive(Debug, Clone)]
pub struct FileShareTarget {
    path: PathBuf,
}

impl FileShareTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShareTarget for FileShareTarget {
    fn share(&self, item: &ShareItem) -> Result<ShareOutcome> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, &item.png().png_data)?;
        log::debug!("wrote {}", self.path.display());
        Ok(ShareOutcome::Completed)
    }
}
