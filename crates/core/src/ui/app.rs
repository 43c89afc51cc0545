//! Main application shell.
//!
//! Owns the main window (capture preview, response text area, the "Snip
//! Area" button) and orchestrates the capture cycle end to end: hide the
//! window, show the selection overlay, wait for its outcome, capture the
//! region, restore the window, encode, query the vision API and render the
//! formatted answer. A [`CaptureCycle`] state field guards against
//! overlapping cycles; every outcome funnels through one exit path that
//! restores window visibility and clears the guard.

use super::overlay::SelectionOverlay;
use super::rendering::layout_response;
use super::state::{CaptureCycle, SelectionOutcome};
use crate::capture::ScreenCapturer;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::format::{Block, LineKind, Span, parse_markup};
use crate::image_processing::ImageProcessor;
use crate::screen::ScreenMetrics;
use crate::vision::{Analysis, VisionClient};
use eframe::egui;
use image::DynamicImage;

/// Maximum size of the capture preview in the main window.
const PREVIEW_MAX_SIZE: egui::Vec2 = egui::vec2(400.0, 300.0);

pub struct SnipApp {
    config: Config,
    capturer: ScreenCapturer,
    metrics: Box<dyn ScreenMetrics>,
    client: VisionClient,

    cycle: CaptureCycle,
    overlay: Option<SelectionOverlay>,

    preview: Option<egui::TextureHandle>,
    response_blocks: Vec<Block>,
    /// Raw answer text, kept for the clipboard.
    response_text: String,
}

impl SnipApp {
    pub fn new(config: Config, capturer: ScreenCapturer, metrics: Box<dyn ScreenMetrics>) -> Self {
        let client = VisionClient::new(&config);
        Self {
            config,
            capturer,
            metrics,
            client,
            cycle: CaptureCycle::Idle,
            overlay: None,
            preview: None,
            response_blocks: Vec::new(),
            response_text: String::new(),
        }
    }

    /// Starts a capture cycle; a no-op while one is already running.
    fn begin_cycle(&mut self, ctx: &egui::Context) {
        if !self.cycle.try_begin() {
            return;
        }
        log::info!("Starting capture cycle");

        self.overlay = Some(SelectionOverlay::new(
            self.metrics.screen_rect(),
            self.capturer.primary_scale_factor(),
        ));

        // Hide the main window so it is not part of the selectable screen
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
    }

    /// Single exit path of the capture cycle.
    ///
    /// The window comes back and the guard clears before the outcome is even
    /// looked at, so no branch can leave the shell stuck in `Selecting`.
    fn finish_cycle(&mut self, ctx: &egui::Context, outcome: SelectionOutcome) {
        // Grab pixels before the main window reappears over the target
        let captured = match outcome {
            SelectionOutcome::Selected(rect) => {
                log::info!("Capturing area: {:?}", rect);
                Some(self.capturer.capture_region(rect))
            }
            SelectionOutcome::NoSelection | SelectionOutcome::Cancelled => None,
        };

        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        self.overlay = None;
        self.cycle.finish();

        match captured {
            None => log::info!("Selection cancelled"),
            Some(Ok(image)) => self.process_capture(ctx, image),
            Some(Err(e)) => {
                log::error!("Error capturing image: {}", e);
                self.show_error(format!("Error capturing image: {}", e));
            }
        }
    }

    /// Snapshot, preview, encode, analyze, render.
    fn process_capture(&mut self, ctx: &egui::Context, image: DynamicImage) {
        if let Some(path) = &self.config.debug_capture_path {
            ImageProcessor::save_debug_snapshot(&image, path);
        }

        self.set_preview(ctx, &image);

        let encoded = match ImageProcessor::encode_to_base64_png(&image) {
            Ok(encoded) => encoded,
            Err(e) => {
                log::error!("{}", e);
                self.show_error(e.to_string());
                return;
            }
        };

        // Synchronous by design; the UI blocks for the duration of the call
        match self.client.analyze(&encoded) {
            Analysis::Answer(text) => {
                self.response_blocks = parse_markup(&text);
                self.response_text = text;
            }
            Analysis::Failure(message) => {
                // The preview keeps the capture; only the text pane changes
                self.show_error(message);
            }
        }
    }

    fn set_preview(&mut self, ctx: &egui::Context, image: &DynamicImage) {
        let image_buffer = image.to_rgba8();
        let size = [image.width() as usize, image.height() as usize];
        let pixels = image_buffer.as_flat_samples();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());

        self.preview = Some(ctx.load_texture(
            "captured-image",
            color_image,
            egui::TextureOptions::LINEAR,
        ));
    }

    /// Shows error text verbatim in place of an answer.
    fn show_error(&mut self, message: String) {
        self.response_blocks = vec![Block::Line {
            kind: LineKind::Plain,
            spans: vec![Span {
                text: message.clone(),
                bold: false,
            }],
        }];
        self.response_text = message;
    }

    fn copy_response(&self) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(self.response_text.clone()) {
                    log::warn!("Failed to copy to clipboard: {}", e);
                }
            }
            Err(e) => log::warn!("Could not access clipboard: {}", e),
        }
    }

    fn render_main_ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                let snip = ui.add_enabled(
                    self.cycle.is_idle(),
                    egui::Button::new("Snip Area").min_size(egui::vec2(120.0, 28.0)),
                );
                if snip.clicked() {
                    self.begin_cycle(ctx);
                }
            });
            ui.add_space(6.0);
        });

        egui::SidePanel::left("preview")
            .resizable(false)
            .exact_width(PREVIEW_MAX_SIZE.x + 24.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.vertical_centered(|ui| {
                    ui.label("Captured Image");
                });
                ui.separator();
                match &self.preview {
                    Some(texture) => {
                        ui.centered_and_justified(|ui| {
                            ui.add(
                                egui::Image::new(texture)
                                    .max_size(PREVIEW_MAX_SIZE)
                                    .maintain_aspect_ratio(true),
                            );
                        });
                    }
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.weak("No capture yet");
                        });
                    }
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Vision API Response");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let can_copy = !self.response_text.is_empty();
                    if ui.add_enabled(can_copy, egui::Button::new("Copy")).clicked() {
                        self.copy_response();
                    }
                });
            });
            ui.separator();

            let job = layout_response(&self.response_blocks, ui.style());
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(egui::Label::new(job).wrap());
                });
        });
    }
}

impl eframe::App for SnipApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_main_ui(ctx);

        if matches!(self.cycle, CaptureCycle::Selecting) {
            if let Some(builder) = self.overlay.as_ref().map(|o| o.viewport_builder()) {
                ctx.show_viewport_immediate(
                    egui::ViewportId::from_hash_of("selection-overlay"),
                    builder,
                    |vctx, _class| {
                        if let Some(overlay) = self.overlay.as_mut() {
                            overlay.show(vctx);
                        }
                    },
                );
            }

            let outcome = self.overlay.as_mut().and_then(|o| o.take_outcome());
            if let Some(outcome) = outcome {
                self.finish_cycle(ctx, outcome);
            }

            // Keep frames flowing while the overlay owns the interaction
            ctx.request_repaint();
        }
    }
}

/// Launches the main window and runs until the user closes it.
///
/// # Errors
///
/// Returns [`AppError::ScreenCapture`] if no display is available and
/// [`AppError::Ui`] if the window cannot be created.
pub fn run(config: Config) -> Result<()> {
    let capturer = ScreenCapturer::new()?;

    for display in capturer.describe_displays() {
        log::info!("{}", display);
    }

    let metrics = crate::screen::detect(&capturer.display_rects());
    log::info!("Virtual screen: {:?}", metrics.screen_rect());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Snip Vision")
            .with_inner_size(egui::vec2(880.0, 520.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Snip Vision",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SnipApp::new(config, capturer, metrics)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| AppError::ui(format!("Failed to run UI: {}", e)))?;

    Ok(())
}
