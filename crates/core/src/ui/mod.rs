//! User interface components for snip-vision.
//!
//! This module provides the main application window and the fullscreen
//! selection overlay used to pick a screen region for analysis.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`state`]: state machine types for the overlay and the capture cycle
//! - [`selection`]: pure drag processing and coordinate mapping
//! - [`overlay`]: the transparent fullscreen selection surface
//! - [`rendering`]: drawing utilities and response-text layout
//! - [`app`]: the application shell and capture-cycle orchestration
//!
//! # Usage
//!
//! ```ignore
//! use snip_vision_core::{Config, ui};
//!
//! let config = Config::load()?;
//! ui::run_app(config)?;
//! ```

mod app;
mod overlay;
mod rendering;
mod selection;
mod state;

// Public API exports
pub use app::SnipApp;
pub use overlay::SelectionOverlay;
pub use state::{CaptureCycle, SelectionOutcome};

use crate::config::Config;
use crate::error::Result;

/// Launches the main window and blocks until the user closes it.
///
/// # Arguments
/// * `config` - Application configuration with the API credential and model
///
/// # Returns
/// - `Ok(())` - the window was closed normally
/// - `Err(e)` - no display was available or the window could not be created
pub fn run_app(config: Config) -> Result<()> {
    app::run(config)
}
