//! Platform collaborators: image acquisition and keyboard notifications
//!
//! The editor never talks to a real toolkit. A host shell implements these
//! traits (or uses the file-backed and noop versions here) and forwards
//! native events.

pub mod keyboard;
pub mod picker;

pub use keyboard::{KeyboardEvent, KeyboardNotifier, KeyboardSubscription};
pub use picker::{load_image, FileImagePicker, ImagePicker, ImageSource, NoopImagePicker};
