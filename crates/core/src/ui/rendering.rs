//! UI rendering helpers.
//!
//! Drawing utilities for the selection overlay (backdrop wash, marker
//! rectangle, coordinate readout) and the translation of parsed response
//! blocks into a single [`egui::text::LayoutJob`]. Everything here takes
//! already-computed geometry or blocks; no parsing or capture logic.

use crate::format::{Block, LineKind, Span};
use eframe::egui;
use eframe::egui::text::{LayoutJob, TextFormat};

/// Opacity of the overlay wash (0-255); low enough to keep the screen
/// readable while dragging.
pub const BACKDROP_ALPHA: u8 = 77;

/// Left indentation applied to list lines.
const LIST_INDENT: f32 = 12.0;

/// Fills the whole overlay with the translucent wash.
pub fn draw_backdrop(painter: &egui::Painter, screen_rect: egui::Rect, alpha: u8) {
    painter.rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(alpha));
}

/// Draws the wash around the marker rectangle, leaving the selection clear.
///
/// # Arguments
/// * `painter` - The egui painter to draw with
/// * `screen_rect` - The full overlay rectangle
/// * `selection_rect` - The in-progress selection to keep clear
/// * `alpha` - Wash opacity (0-255)
pub fn draw_backdrop_cutout(
    painter: &egui::Painter,
    screen_rect: egui::Rect,
    selection_rect: egui::Rect,
    alpha: u8,
) {
    let color = egui::Color32::from_black_alpha(alpha);

    // Top region (above selection)
    painter.rect_filled(
        egui::Rect::from_min_max(
            screen_rect.min,
            egui::pos2(screen_rect.max.x, selection_rect.min.y),
        ),
        0.0,
        color,
    );

    // Bottom region (below selection)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(screen_rect.min.x, selection_rect.max.y),
            screen_rect.max,
        ),
        0.0,
        color,
    );

    // Left region (left of selection, between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(screen_rect.min.x, selection_rect.min.y),
            egui::pos2(selection_rect.min.x, selection_rect.max.y),
        ),
        0.0,
        color,
    );

    // Right region (right of selection, between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(selection_rect.max.x, selection_rect.min.y),
            egui::pos2(screen_rect.max.x, selection_rect.max.y),
        ),
        0.0,
        color,
    );
}

/// Draws the marker rectangle around the in-progress selection.
pub fn draw_marker(painter: &egui::Painter, selection_rect: egui::Rect) {
    painter.rect_stroke(
        selection_rect,
        0.0,
        egui::Stroke::new(2.0, egui::Color32::RED),
        egui::StrokeKind::Middle,
    );
}

/// Draws the live coordinate readout in the overlay's top-left corner.
pub fn draw_coord_readout(
    painter: &egui::Painter,
    start: egui::Pos2,
    current: Option<egui::Pos2>,
) {
    let label = match current {
        Some(pos) => format!(
            "Start: ({}, {}), Current: ({}, {})",
            start.x as i32, start.y as i32, pos.x as i32, pos.y as i32
        ),
        None => format!("Start: ({}, {})", start.x as i32, start.y as i32),
    };

    let origin = egui::pos2(10.0, 10.0);
    let galley = painter.layout_no_wrap(
        label,
        egui::FontId::proportional(13.0),
        egui::Color32::BLACK,
    );
    let bg = egui::Rect::from_min_size(origin, galley.size() + egui::vec2(12.0, 6.0));
    painter.rect_filled(bg, 3.0, egui::Color32::WHITE);
    painter.galley(origin + egui::vec2(6.0, 3.0), galley, egui::Color32::BLACK);
}

/// Lays out parsed response blocks as one text-area job.
///
/// Headings and subheadings get larger strong text, list lines a left
/// indent, code blocks monospace on the code background; bold spans use the
/// strong text color composed with whatever block style applies. Every
/// non-code source line and every code block contributes exactly one
/// trailing newline.
pub fn layout_response(blocks: &[Block], style: &egui::Style) -> LayoutJob {
    let body = egui::TextStyle::Body.resolve(style);
    let mono = egui::TextStyle::Monospace.resolve(style);
    let text_color = style.visuals.text_color();
    let strong_color = style.visuals.strong_text_color();

    let mut job = LayoutJob::default();

    for block in blocks {
        match block {
            Block::Code(code) => {
                let format = TextFormat {
                    font_id: mono.clone(),
                    color: text_color,
                    background: style.visuals.code_bg_color,
                    ..Default::default()
                };
                job.append(&format!("{}\n", code), 0.0, format);
            }
            Block::Line { kind, spans } => {
                let (font_id, base_color, indent) = match kind {
                    LineKind::Heading => {
                        (egui::FontId::proportional(body.size * 1.5), strong_color, 0.0)
                    }
                    LineKind::Subheading => (
                        egui::FontId::proportional(body.size * 1.25),
                        strong_color,
                        0.0,
                    ),
                    LineKind::ListItem => (body.clone(), text_color, LIST_INDENT),
                    LineKind::Plain => (body.clone(), text_color, 0.0),
                };

                let mut leading_space = indent;
                for span in spans {
                    let format = TextFormat {
                        font_id: font_id.clone(),
                        color: span_color(span, base_color, strong_color),
                        ..Default::default()
                    };
                    job.append(&span.text, leading_space, format);
                    leading_space = 0.0;
                }

                let format = TextFormat {
                    font_id: font_id.clone(),
                    color: base_color,
                    ..Default::default()
                };
                job.append("\n", 0.0, format);
            }
        }
    }

    job
}

fn span_color(
    span: &Span,
    base_color: egui::Color32,
    strong_color: egui::Color32,
) -> egui::Color32 {
    if span.bold { strong_color } else { base_color }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_markup;

    #[test]
    fn every_line_gets_exactly_one_trailing_newline() {
        let blocks = parse_markup("### Title\nplain **bold** text\n- item");
        let job = layout_response(&blocks, &egui::Style::default());
        assert_eq!(job.text, "Title\nplain bold text\n- item\n");
    }

    #[test]
    fn code_block_is_followed_by_one_newline() {
        let blocks = parse_markup("```\nfirst\nsecond\n```\nafter");
        let job = layout_response(&blocks, &egui::Style::default());
        assert_eq!(job.text, "first\nsecond\nafter\n");
    }

    #[test]
    fn blank_lines_survive_as_newlines() {
        let blocks = parse_markup("a\n\nb");
        let job = layout_response(&blocks, &egui::Style::default());
        assert_eq!(job.text, "a\n\nb\n");
    }

    #[test]
    fn bold_sections_use_a_distinct_format() {
        let blocks = parse_markup("plain **bold** text");
        let style = egui::Style::default();
        let job = layout_response(&blocks, &style);
        // "plain ", "bold", " text", "\n"
        assert_eq!(job.sections.len(), 4);
        assert_eq!(
            job.sections[1].format.color,
            style.visuals.strong_text_color()
        );
        assert_eq!(job.sections[0].format.color, style.visuals.text_color());
    }
}
