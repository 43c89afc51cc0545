//! Selection handling and coordinate mapping.
//!
//! This module contains the pure logic for turning pointer drags into screen
//! rectangles: event classification, normalization, the minimum-size
//! threshold and the conversion from overlay-local points to absolute screen
//! pixels.

use crate::screen::ScreenRect;
use eframe::egui;

/// Minimum size (in pixels) each dimension of a drag must exceed to count as
/// a selection.
pub const MIN_SELECTION_SIZE: f32 = 5.0;

/// Classified result of one frame of drag input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// A new drag began; the anchor point was recorded.
    Started,
    /// The drag continued; the far corner moved.
    Dragging,
    /// The pointer was released with an anchor in place.
    Released,
    /// Nothing selection-related happened.
    None,
}

/// Processes drag input and keeps the anchor/far-corner points current.
///
/// # Arguments
/// * `response` - The egui response from the overlay's interaction area
/// * `start` - Anchor point of the drag (mutable)
/// * `current` - Far corner of the drag (mutable)
pub fn process_drag_event(
    response: &egui::Response,
    start: &mut Option<egui::Pos2>,
    current: &mut Option<egui::Pos2>,
) -> DragEvent {
    if response.drag_started() {
        *start = response.interact_pointer_pos();
        *current = *start;
        return DragEvent::Started;
    }

    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            *current = Some(pos);
        }
        return DragEvent::Dragging;
    }

    if response.drag_stopped() && start.is_some() {
        return DragEvent::Released;
    }

    DragEvent::None
}

/// Converts a completed drag into an absolute screen rectangle.
///
/// The overlay-local points are scaled to physical pixels, offset by the
/// overlay's position on the virtual screen (which can be negative when a
/// secondary monitor sits left of or above the primary) and normalized so
/// that left <= right and top <= bottom. Drags whose width or height do not
/// exceed [`MIN_SELECTION_SIZE`] yield `None`.
///
/// # Arguments
/// * `start` - Anchor point in overlay-local logical coordinates
/// * `end` - Release point in overlay-local logical coordinates
/// * `scale` - Pixels per logical point
/// * `origin` - The overlay's top-left corner in absolute screen pixels
pub fn selection_from_drag(
    start: egui::Pos2,
    end: egui::Pos2,
    scale: f32,
    origin: (i32, i32),
) -> Option<ScreenRect> {
    let left = (start.x.min(end.x) * scale) + origin.0 as f32;
    let top = (start.y.min(end.y) * scale) + origin.1 as f32;
    let right = (start.x.max(end.x) * scale) + origin.0 as f32;
    let bottom = (start.y.max(end.y) * scale) + origin.1 as f32;

    if right - left > MIN_SELECTION_SIZE && bottom - top > MIN_SELECTION_SIZE {
        Some(ScreenRect::new(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn small_drags_are_rejected_in_any_direction() {
        // 5 px in one dimension is not enough, however the drag ran
        assert!(selection_from_drag(pos2(10.0, 10.0), pos2(15.0, 40.0), 1.0, (0, 0)).is_none());
        assert!(selection_from_drag(pos2(15.0, 40.0), pos2(10.0, 10.0), 1.0, (0, 0)).is_none());
        assert!(selection_from_drag(pos2(10.0, 10.0), pos2(40.0, 15.0), 1.0, (0, 0)).is_none());
        assert!(selection_from_drag(pos2(20.0, 20.0), pos2(20.0, 20.0), 1.0, (0, 0)).is_none());
    }

    #[test]
    fn drag_direction_does_not_matter() {
        let forward = selection_from_drag(pos2(10.0, 10.0), pos2(50.0, 50.0), 1.0, (0, 0));
        let backward = selection_from_drag(pos2(50.0, 50.0), pos2(10.0, 10.0), 1.0, (0, 0));
        assert_eq!(forward, backward);
        assert_eq!(forward, Some(ScreenRect::new(10, 10, 40, 40)));
    }

    #[test]
    fn origin_offset_shifts_into_absolute_coordinates() {
        // Overlay covering a monitor left of the primary
        let rect =
            selection_from_drag(pos2(100.0, 50.0), pos2(200.0, 150.0), 1.0, (-1920, -200)).unwrap();
        assert_eq!(rect, ScreenRect::new(-1820, -150, 100, 100));
    }

    #[test]
    fn scale_converts_points_to_pixels() {
        let rect =
            selection_from_drag(pos2(10.0, 10.0), pos2(50.0, 50.0), 2.0, (0, 0)).unwrap();
        assert_eq!(rect, ScreenRect::new(20, 20, 80, 80));
    }

    #[test]
    fn threshold_is_strict() {
        // Exactly 5 px wide: no selection
        assert!(selection_from_drag(pos2(0.0, 0.0), pos2(5.0, 100.0), 1.0, (0, 0)).is_none());
        // Just over: accepted
        assert!(selection_from_drag(pos2(0.0, 0.0), pos2(5.1, 100.0), 1.0, (0, 0)).is_some());
    }
}
