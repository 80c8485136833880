//! SketchScan Application
//!
//! The native application shell: windowing, input translation into gesture
//! events, GPU presentation of the drawn scene, and the
//! snapshot-and-recognize action.

mod app;
mod shortcuts;

pub use app::{App, AppConfig};
pub use shortcuts::{Shortcut, ShortcutRegistry};
