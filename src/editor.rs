//! Event handlers for the single-screen meme editor
//!
//! A host UI forwards native events (picker results, focus changes, text
//! edits, keyboard notifications, button taps) to [`MemeEditor`] and reads
//! back the state it should display. Every handler runs to completion on
//! the caller's thread.

use std::sync::{Arc, Mutex};

use image::RgbaImage;

use crate::compositor::Compositor;
use crate::model::Meme;
use crate::platform::{ImagePicker, ImageSource, KeyboardEvent, KeyboardNotifier, KeyboardSubscription};
use crate::share::{export, ShareOutcome, ShareTarget};
use crate::{Error, Result, TextStyle};

pub const TOP_PLACEHOLDER: &str = "TOP";
pub const BOTTOM_PLACEHOLDER: &str = "BOTTOM";

/// One of the two caption inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionField {
    Top,
    Bottom,
}

impl CaptionField {
    pub fn placeholder(self) -> &'static str {
        match self {
            CaptionField::Top => TOP_PLACEHOLDER,
            CaptionField::Bottom => BOTTOM_PLACEHOLDER,
        }
    }
}

/// Content of a field once editing begins.
///
/// Only the exact placeholders `"TOP"` and `"BOTTOM"` are cleared; anything
/// else, including `"TOPIC"` or `"top"`, is kept as typed.
pub fn text_on_begin_editing(current: &str) -> &str {
    if current == TOP_PLACEHOLDER || current == BOTTOM_PLACEHOLDER {
        ""
    } else {
        current
    }
}

/// Vertical view offset that keeps the focused caption above the keyboard.
///
/// Only the bottom field is covered by the keyboard, so only it shifts the
/// view, by exactly the keyboard height.
pub fn keyboard_offset(focused: Option<CaptionField>, keyboard_height: f32) -> f32 {
    match focused {
        Some(CaptionField::Bottom) => -keyboard_height,
        _ => 0.0,
    }
}

/// Which toolbar buttons are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    pub album_enabled: bool,
    pub camera_enabled: bool,
    pub share_enabled: bool,
}

/// Draft state and event handlers for one editing screen.
pub struct MemeEditor {
    compositor: Compositor,
    top_text: String,
    bottom_text: String,
    original_image: Option<Arc<RgbaImage>>,
    focused: Option<CaptionField>,
    keyboard_height: Arc<Mutex<f32>>,
    subscription: Option<KeyboardSubscription>,
    meme: Option<Meme>,
    last_shared: Option<Meme>,
}

impl MemeEditor {
    pub fn new(style: TextStyle) -> Result<Self> {
        Ok(Self::with_compositor(Compositor::new(style)?))
    }

    pub fn with_compositor(compositor: Compositor) -> Self {
        Self {
            compositor,
            top_text: TOP_PLACEHOLDER.to_string(),
            bottom_text: BOTTOM_PLACEHOLDER.to_string(),
            original_image: None,
            focused: None,
            keyboard_height: Arc::new(Mutex::new(0.0)),
            subscription: None,
            meme: None,
            last_shared: None,
        }
    }

    // --- state read back by the UI ---

    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    pub fn text(&self, field: CaptionField) -> &str {
        match field {
            CaptionField::Top => &self.top_text,
            CaptionField::Bottom => &self.bottom_text,
        }
    }

    pub fn original_image(&self) -> Option<&RgbaImage> {
        self.original_image.as_deref()
    }

    pub fn focused(&self) -> Option<CaptionField> {
        self.focused
    }

    /// The most recently composed meme, if the draft hasn't changed since
    pub fn meme(&self) -> Option<&Meme> {
        self.meme.as_ref()
    }

    /// The last meme whose share completed
    pub fn last_shared(&self) -> Option<&Meme> {
        self.last_shared.as_ref()
    }

    pub fn keyboard_height(&self) -> f32 {
        *self.keyboard_height.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Current vertical view offset
    pub fn view_offset(&self) -> f32 {
        keyboard_offset(self.focused, self.keyboard_height())
    }

    pub fn toolbar(&self, picker: &dyn ImagePicker) -> ToolbarState {
        ToolbarState {
            album_enabled: picker.is_source_available(ImageSource::PhotoLibrary),
            camera_enabled: picker.is_source_available(ImageSource::Camera),
            share_enabled: self
                .original_image
                .as_deref()
                .is_some_and(|image| image.width() > 0 && image.height() > 0),
        }
    }

    // --- lifecycle ---

    /// Start listening for keyboard notifications. Calling it again replaces
    /// the previous subscription.
    pub fn activate(&mut self, notifier: &KeyboardNotifier) {
        let shared = Arc::clone(&self.keyboard_height);
        let sub = notifier.subscribe(move |event| {
            let mut h = shared.lock().unwrap_or_else(|p| p.into_inner());
            *h = match *event {
                KeyboardEvent::WillShow { height } => height,
                KeyboardEvent::WillHide => 0.0,
            };
        });
        self.subscription = Some(sub);
    }

    /// Stop listening for keyboard notifications
    pub fn deactivate(&mut self) {
        self.subscription = None;
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    // --- event handlers ---

    /// A picker finished. `None` means it was dismissed and nothing changes.
    pub fn on_image_selected(&mut self, image: Option<RgbaImage>) {
        match image {
            Some(image) => {
                log::debug!("source image selected ({}x{})", image.width(), image.height());
                self.original_image = Some(Arc::new(image));
                self.meme = None;
            }
            None => log::debug!("picker dismissed; keeping current state"),
        }
    }

    /// Present `picker` for `source` and apply its result
    pub fn pick_image(&mut self, picker: &dyn ImagePicker, source: ImageSource) -> Result<()> {
        let picked = picker.pick(source)?;
        self.on_image_selected(picked);
        Ok(())
    }

    /// Focus moved to `field` (or away from both fields).
    ///
    /// A field gaining focus while holding exactly its placeholder (or the
    /// other field's) is cleared before any input arrives.
    pub fn on_field_focus_changed(&mut self, field: Option<CaptionField>) {
        if let Some(f) = field {
            if self.focused != Some(f) {
                let cleared = text_on_begin_editing(self.text(f)).to_string();
                self.set_text(f, cleared);
            }
        }
        self.focused = field;
    }

    pub fn on_text_changed(&mut self, field: CaptionField, text: impl Into<String>) {
        self.set_text(field, text.into());
    }

    /// Return key: the focused field resigns
    pub fn on_return(&mut self) {
        self.focused = None;
    }

    pub fn on_keyboard_will_show(&mut self, height: f32) {
        *self.keyboard_height.lock().unwrap_or_else(|p| p.into_inner()) = height;
    }

    pub fn on_keyboard_will_hide(&mut self) {
        *self.keyboard_height.lock().unwrap_or_else(|p| p.into_inner()) = 0.0;
    }

    /// Render the current draft. Fails with `InvalidInput` before an image
    /// has been selected.
    pub fn compose(&mut self) -> Result<&Meme> {
        let image = self
            .original_image
            .clone()
            .ok_or_else(|| Error::InvalidInput("no source image selected".into()))?;
        let draft = Meme::draft(self.top_text.clone(), self.bottom_text.clone(), image);
        let meme = self.compositor.render(&draft)?;
        Ok(self.meme.insert(meme))
    }

    /// Compose and hand the result to `target`
    pub fn share(&mut self, target: &dyn ShareTarget) -> Result<ShareOutcome> {
        let meme = self.compose()?.clone();
        let outcome = export(&meme, target)?;
        if outcome == ShareOutcome::Completed {
            self.last_shared = Some(meme);
        }
        Ok(outcome)
    }

    /// Back to placeholders with no image
    pub fn reset(&mut self) {
        self.top_text = CaptionField::Top.placeholder().to_string();
        self.bottom_text = CaptionField::Bottom.placeholder().to_string();
        self.original_image = None;
        self.focused = None;
        self.meme = None;
    }

    fn set_text(&mut self, field: CaptionField, text: String) {
        let slot = match field {
            CaptionField::Top => &mut self.top_text,
            CaptionField::Bottom => &mut self.bottom_text,
        };
        if *slot != text {
            *slot = text;
            self.meme = None;
        }
    }
}
