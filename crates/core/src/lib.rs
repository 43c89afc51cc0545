//! Snip Vision Core Library
//!
//! This library provides the core functionality for the snip-vision desktop
//! tool: select a rectangular screen region, capture it, send it to a
//! vision-capable chat-completion API and render the markdown-flavored
//! answer as styled text.
//!
//! # Overview
//!
//! One button press runs one capture cycle: the main window hides, a
//! transparent fullscreen overlay collects a drag, the selected pixels are
//! grabbed and PNG/base64-encoded, the vision API is queried with a fixed
//! instruction, and the response is parsed and displayed. The library
//! handles:
//!
//! - **Screen Metrics**: virtual-screen geometry via the [`screen`] module
//! - **Screen Capture**: multi-monitor region grabs via [`capture`]
//! - **Image Encoding**: PNG/base64 payloads via [`image_processing`]
//! - **AI Integration**: the chat-completions client in [`vision`]
//! - **Response Markup**: the constrained markdown parser in [`format`]
//! - **User Interface**: main window and selection overlay via [`ui`]
//!
//! # Quick Start
//!
//! ```ignore
//! use snip_vision_core::{Config, ui};
//!
//! snip_vision_core::init();
//! let config = Config::load()?;
//! ui::run_app(config)?;
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod format;
pub mod image_processing;
pub mod screen;
pub mod ui;
pub mod vision;

// Re-export primary types for convenience
pub use capture::ScreenCapturer;
pub use config::Config;
pub use error::{AppError, Result};
pub use screen::{ScreenMetrics, ScreenRect};
pub use vision::{Analysis, VisionClient};

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup before using any other functions.
/// This loads `.env` files if present and sets up the environment.
pub fn init() {
    let _ = dotenvy::dotenv();
}
