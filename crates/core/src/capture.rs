//! Screen capture functionality.
//!
//! This module provides cross-platform screen capture capabilities,
//! supporting both X11 and Wayland on Linux, as well as Windows and macOS.
//!
//! # Example
//!
//! ```ignore
//! use snip_vision_core::capture::ScreenCapturer;
//! use snip_vision_core::screen::ScreenRect;
//!
//! let capturer = ScreenCapturer::new()?;
//!
//! // List available displays
//! for display in capturer.describe_displays() {
//!     println!("{}", display);
//! }
//!
//! // Capture a region in absolute screen coordinates
//! let image = capturer.capture_region(ScreenRect::new(100, 100, 640, 480))?;
//! ```

use crate::error::{AppError, Result};
use crate::screen::ScreenRect;
use image::DynamicImage;
use screenshots::Screen;

/// Screen capturer that provides multi-monitor region-grab capabilities.
///
/// This struct wraps the `screenshots` crate and provides a convenient API
/// for capturing rectangular regions given in absolute screen coordinates.
pub struct ScreenCapturer {
    screens: Vec<Screen>,
}

impl ScreenCapturer {
    /// Initializes the screen capturer by detecting available displays.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ScreenCapture`] if:
    /// - Screen enumeration fails (e.g., no display server available)
    /// - No screens are detected
    pub fn new() -> Result<Self> {
        let screens = Screen::all()
            .map_err(|e| AppError::capture(format!("Failed to enumerate screens: {}", e)))?;

        if screens.is_empty() {
            return Err(AppError::capture("No screens detected"));
        }

        Ok(Self { screens })
    }

    /// Returns the bounds of every attached display in absolute coordinates.
    ///
    /// Origins can be negative on multi-monitor arrangements.
    pub fn display_rects(&self) -> Vec<ScreenRect> {
        self.screens
            .iter()
            .map(|s| {
                ScreenRect::new(
                    s.display_info.x,
                    s.display_info.y,
                    s.display_info.width,
                    s.display_info.height,
                )
            })
            .collect()
    }

    /// Lists attached displays with their dimensions and metadata.
    ///
    /// Returns a vector of human-readable display descriptions including
    /// position, resolution and scale factor.
    pub fn describe_displays(&self) -> Vec<String> {
        self.screens
            .iter()
            .enumerate()
            .map(|(i, s)| {
                format!(
                    "Display {}: {}x{} at ({}, {}) (scale: {})",
                    i,
                    s.display_info.width,
                    s.display_info.height,
                    s.display_info.x,
                    s.display_info.y,
                    s.display_info.scale_factor
                )
            })
            .collect()
    }

    /// Scale factor of the primary display, defaulting to 1.0.
    pub fn primary_scale_factor(&self) -> f32 {
        self.screens
            .first()
            .map(|s| s.display_info.scale_factor)
            .unwrap_or(1.0)
    }

    /// Captures a rectangular region given in absolute screen coordinates.
    ///
    /// The display containing the rectangle's origin is located and the
    /// coordinates are translated into that display's local space before the
    /// pixel grab.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`AppError::EmptySelection`] if the rectangle has zero area
    /// - [`AppError::ScreenCapture`] if no display contains the rectangle's
    ///   origin or the grab itself fails
    pub fn capture_region(&self, rect: ScreenRect) -> Result<DynamicImage> {
        if rect.width == 0 || rect.height == 0 {
            return Err(AppError::EmptySelection);
        }

        let screen = self
            .screens
            .iter()
            .find(|s| {
                ScreenRect::new(
                    s.display_info.x,
                    s.display_info.y,
                    s.display_info.width,
                    s.display_info.height,
                )
                .contains(rect.x, rect.y)
            })
            .ok_or_else(|| {
                AppError::capture(format!(
                    "Selection origin ({}, {}) is outside every display",
                    rect.x, rect.y
                ))
            })?;

        let local_x = rect.x - screen.display_info.x;
        let local_y = rect.y - screen.display_info.y;

        let captured = screen
            .capture_area(local_x, local_y, rect.width, rect.height)
            .map_err(|e| AppError::capture(format!("Failed to capture region: {}", e)))?;

        // Convert screenshots::Image to image::DynamicImage
        let width = captured.width();
        let height = captured.height();
        let rgba_data = captured.into_raw();

        let img_buffer = image::ImageBuffer::from_raw(width, height, rgba_data)
            .ok_or_else(|| AppError::capture("Failed to create image buffer"))?;

        Ok(DynamicImage::ImageRgba8(img_buffer))
    }
}
