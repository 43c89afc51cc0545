//! Fullscreen selection overlay.
//!
//! A transparent, undecorated, always-on-top viewport spanning the whole
//! virtual screen. It captures one mouse drag and yields a rectangle in
//! absolute screen pixels, or reports that the user cancelled. The overlay is
//! shown by the application shell as an immediate child viewport; its outcome
//! is produced once and read back exactly once via [`SelectionOverlay::take_outcome`].

use super::rendering::{
    BACKDROP_ALPHA, draw_backdrop, draw_backdrop_cutout, draw_coord_readout, draw_marker,
};
use super::selection::{DragEvent, process_drag_event, selection_from_drag};
use super::state::{OverlayPhase, SelectionOutcome};
use crate::screen::ScreenRect;
use eframe::egui;

pub struct SelectionOverlay {
    /// Area the overlay covers, in absolute screen pixels.
    screen: ScreenRect,
    /// Pixels per logical point of the display the overlay opens on.
    scale_factor: f32,
    drag_start: Option<egui::Pos2>,
    drag_current: Option<egui::Pos2>,
    phase: OverlayPhase,
}

impl SelectionOverlay {
    pub fn new(screen: ScreenRect, scale_factor: f32) -> Self {
        log::info!("Virtual screen dimensions: {:?}", screen);
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self {
            screen,
            scale_factor,
            drag_start: None,
            drag_current: None,
            phase: OverlayPhase::Idle,
        }
    }

    /// Builder for the overlay's viewport.
    ///
    /// Positioned and sized in logical points to cover the virtual screen,
    /// which may place it at a negative origin so secondary monitors are
    /// reachable.
    pub fn viewport_builder(&self) -> egui::ViewportBuilder {
        let scale = self.scale_factor;
        egui::ViewportBuilder::default()
            .with_position(egui::pos2(
                self.screen.x as f32 / scale,
                self.screen.y as f32 / scale,
            ))
            .with_inner_size(egui::vec2(
                self.screen.width as f32 / scale,
                self.screen.height as f32 / scale,
            ))
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_resizable(false)
            .with_taskbar(false)
    }

    /// Renders one frame of the overlay inside its own viewport.
    pub fn show(&mut self, ctx: &egui::Context) {
        ctx.set_cursor_icon(egui::CursorIcon::Crosshair);

        // Escape is a first-class cancellation path, valid in any state
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.apply_escape();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // Closing the overlay window by other means also counts as cancel
        if ctx.input(|i| i.viewport().close_requested())
            && !matches!(self.phase, OverlayPhase::Finished(_))
        {
            self.apply_escape();
        }

        let scale = ctx.pixels_per_point();

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let response = ui.allocate_rect(rect, egui::Sense::drag());

                match process_drag_event(&response, &mut self.drag_start, &mut self.drag_current) {
                    DragEvent::Started => {
                        self.phase = OverlayPhase::Dragging;
                    }
                    DragEvent::Released => {
                        self.apply_release(scale);
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                    DragEvent::Dragging | DragEvent::None => {}
                }

                let painter = ui.painter();
                match (self.phase, self.drag_start, self.drag_current) {
                    (OverlayPhase::Dragging, Some(start), Some(current)) => {
                        let marker = egui::Rect::from_two_pos(start, current);
                        draw_backdrop_cutout(painter, rect, marker, BACKDROP_ALPHA);
                        draw_marker(painter, marker);
                        draw_coord_readout(painter, start, Some(current));
                    }
                    _ => {
                        draw_backdrop(painter, rect, BACKDROP_ALPHA);
                    }
                }
            });
    }

    /// Takes the outcome out of a finished overlay.
    ///
    /// Returns `None` while the user is still interacting. After a `Some`,
    /// the shell stops showing the viewport, which tears it down.
    pub fn take_outcome(&mut self) -> Option<SelectionOutcome> {
        if let OverlayPhase::Finished(outcome) = self.phase {
            self.phase = OverlayPhase::Idle;
            Some(outcome)
        } else {
            None
        }
    }

    /// Escape (or window close): drop any in-progress marker and finish.
    fn apply_escape(&mut self) {
        self.drag_start = None;
        self.drag_current = None;
        self.phase = OverlayPhase::Finished(SelectionOutcome::Cancelled);
    }

    /// Pointer released: convert the drag to absolute coordinates, or report
    /// "no selection" for drags under the size threshold.
    fn apply_release(&mut self, scale: f32) {
        let outcome = match (self.drag_start.take(), self.drag_current.take()) {
            (Some(start), Some(end)) => {
                match selection_from_drag(start, end, scale, (self.screen.x, self.screen.y)) {
                    Some(rect) => {
                        log::info!("Selected area: {:?}", rect);
                        SelectionOutcome::Selected(rect)
                    }
                    None => SelectionOutcome::NoSelection,
                }
            }
            _ => SelectionOutcome::NoSelection,
        };
        self.phase = OverlayPhase::Finished(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn overlay() -> SelectionOverlay {
        SelectionOverlay::new(ScreenRect::new(-1920, 0, 3840, 1080), 1.0)
    }

    #[test]
    fn escape_cancels_and_clears_marker_state() {
        let mut overlay = overlay();
        overlay.drag_start = Some(pos2(100.0, 100.0));
        overlay.drag_current = Some(pos2(300.0, 300.0));
        overlay.phase = OverlayPhase::Dragging;

        overlay.apply_escape();

        assert!(overlay.drag_start.is_none());
        assert!(overlay.drag_current.is_none());
        assert_eq!(overlay.take_outcome(), Some(SelectionOutcome::Cancelled));
    }

    #[test]
    fn escape_before_any_drag_still_cancels() {
        let mut overlay = overlay();
        overlay.apply_escape();
        assert_eq!(overlay.take_outcome(), Some(SelectionOutcome::Cancelled));
    }

    #[test]
    fn release_converts_to_absolute_coordinates() {
        let mut overlay = overlay();
        overlay.drag_start = Some(pos2(100.0, 50.0));
        overlay.drag_current = Some(pos2(200.0, 150.0));
        overlay.phase = OverlayPhase::Dragging;

        overlay.apply_release(1.0);

        assert_eq!(
            overlay.take_outcome(),
            Some(SelectionOutcome::Selected(ScreenRect::new(
                -1820, 50, 100, 100
            )))
        );
    }

    #[test]
    fn tiny_release_yields_no_selection() {
        let mut overlay = overlay();
        overlay.drag_start = Some(pos2(100.0, 100.0));
        overlay.drag_current = Some(pos2(103.0, 103.0));
        overlay.phase = OverlayPhase::Dragging;

        overlay.apply_release(1.0);

        assert_eq!(overlay.take_outcome(), Some(SelectionOutcome::NoSelection));
        assert!(overlay.drag_start.is_none());
    }

    #[test]
    fn outcome_is_consumed_exactly_once() {
        let mut overlay = overlay();
        overlay.apply_escape();
        assert!(overlay.take_outcome().is_some());
        assert!(overlay.take_outcome().is_none());
    }
}
