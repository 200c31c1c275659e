// src/app.rs
use anyhow::Result;
use eframe::egui;
use tracing::warn;

use crate::net::ApiEvent;
use crate::state::{AppState, Screen};

pub struct DeskApp {
    state: AppState,
    /// Decoded preview bitmap, keyed by the image URL it was fetched from so
    /// a stale fetch can never overwrite a newer preview.
    preview_texture: Option<(String, egui::TextureHandle)>,
}

impl DeskApp {
    pub fn new(mut state: AppState, ctx: &egui::Context) -> Self {
        // Analytics load once at startup, before the screen is first shown.
        state.analytics.begin_fetch();
        state.request_manager.start_analytics(ctx.clone());

        Self {
            state,
            preview_texture: None,
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Export Analytics CSV...").clicked() {
                    crate::ui::analytics::export_csv(&mut self.state);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close_menu();
                }
            });

            ui.separator();

            // Tab selection using buttons
            let tabs = [
                (Screen::Composer, "Composer"),
                (Screen::Analytics, "Analytics"),
            ];

            for (screen, label) in tabs {
                if ui
                    .selectable_label(self.state.screen == screen, label)
                    .clicked()
                {
                    self.state.screen = screen;
                }
            }
        });
    }

    /// Applies one finished background request to the state. Runs on the UI
    /// thread, once per event per frame.
    fn handle_event(&mut self, ctx: &egui::Context, event: ApiEvent) {
        match event {
            ApiEvent::UploadFinished(Ok(response)) => {
                self.state.composer.apply_upload(response);
            }
            ApiEvent::UploadFinished(Err(e)) => {
                self.state.composer.fail_upload(e.to_string());
                self.state.error_message = Some(format!("Upload failed: {}", e));
            }
            ApiEvent::GenerateFinished(Ok(response)) => {
                let image_url = response.image_url.clone();
                self.state.composer.apply_generate(response);
                self.preview_texture = None;
                self.state
                    .request_manager
                    .start_preview_fetch(image_url, ctx.clone());
            }
            ApiEvent::GenerateFinished(Err(e)) => {
                self.state.composer.request_failed();
                self.state.error_message = Some(format!("Generation failed: {}", e));
            }
            ApiEvent::ScheduleFinished(Ok(response)) => {
                self.state.composer.apply_schedule(response);
            }
            ApiEvent::ScheduleFinished(Err(e)) => {
                self.state.composer.request_failed();
                self.state.error_message = Some(format!("Scheduling failed: {}", e));
            }
            ApiEvent::AnalyticsFinished(Ok(data)) => {
                self.state.analytics.apply(data);
            }
            ApiEvent::AnalyticsFinished(Err(e)) => {
                self.state.analytics.fail(e.to_string());
            }
            ApiEvent::PreviewImageFinished { url, result } => {
                self.apply_preview_image(ctx, url, result);
            }
        }
    }

    fn apply_preview_image(
        &mut self,
        ctx: &egui::Context,
        url: String,
        result: Result<Vec<u8>, crate::api::ApiError>,
    ) {
        let current = self
            .state
            .composer
            .preview
            .as_ref()
            .map(|preview| preview.image_url.as_str());
        if current != Some(url.as_str()) {
            return; // The preview changed while the bytes were in flight.
        }

        match result
            .map_err(anyhow::Error::from)
            .and_then(|bytes| decode_image(&bytes))
        {
            Ok(color_image) => {
                let texture =
                    ctx.load_texture("preview_image", color_image, egui::TextureOptions::LINEAR);
                self.preview_texture = Some((url, texture));
            }
            Err(e) => {
                // The bitmap is best effort: the panel's link still opens
                // the image, and scheduling is unaffected.
                warn!("preview image unavailable: {e}");
            }
        }
    }
}

impl eframe::App for DeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Some(event) = self.state.request_manager.poll() {
            self.handle_event(ctx, event);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.state.screen {
                    Screen::Composer => {
                        let texture = self.preview_texture.as_ref().and_then(|(url, texture)| {
                            let preview = self.state.composer.preview.as_ref()?;
                            (url == &preview.image_url).then_some(texture)
                        });
                        crate::ui::composer::draw_composer_view(ui, &mut self.state, texture);
                    }
                    Screen::Analytics => {
                        crate::ui::analytics::draw_analytics_view(ui, &mut self.state);
                    }
                });
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone(); // Clone first
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }

        // Schedule confirmation; dismissing it ends the composer session
        let schedule_msg = self.state.composer.schedule_result.clone();
        if let Some(message) = schedule_msg {
            egui::Window::new("Post Scheduled")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&message);
                    if ui.button("OK").clicked() {
                        self.state.composer.reset();
                        self.preview_texture = None;
                        self.state.screen = Screen::Analytics;
                        self.state.analytics.begin_fetch();
                        self.state.request_manager.start_analytics(ctx.clone());
                    }
                });
        }
    }
}

/// Decodes fetched image bytes into an egui texture source.
fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_flat_samples().as_slice(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_image_handles_png_bytes() {
        let mut bytes = Vec::new();
        let png = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        image::DynamicImage::ImageRgba8(png)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageFormat::Png,
            )
            .expect("png encoding should succeed");

        let decoded = decode_image(&bytes).expect("decode should succeed");
        assert_eq!(decoded.size, [2, 3]);
    }

    #[test]
    fn decode_image_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }
}
