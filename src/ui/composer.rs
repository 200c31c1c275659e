// src/ui/composer.rs
use eframe::egui;
use rfd::FileDialog;

use crate::api::Platform;
use crate::state::composer::UPLOAD_FIRST_MESSAGE;
use crate::state::{AppState, PendingCall, UploadStatus};

pub fn draw_composer_view(
    ui: &mut egui::Ui,
    state: &mut AppState,
    preview_texture: Option<&egui::TextureHandle>,
) {
    let busy = state.composer.request_in_flight();

    // Source image
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Source Image");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("Choose Image..."))
                .clicked()
            {
                let picked = FileDialog::new()
                    .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                    .set_title("Choose Source Image")
                    .pick_file();

                if let Some(path) = picked {
                    state.composer.begin_upload(&path);
                    state.request_manager.start_upload(path, ui.ctx().clone());
                }
            }

            match &state.composer.upload_status {
                UploadStatus::None => {}
                UploadStatus::Uploading { file_name } => {
                    ui.spinner();
                    ui.label(format!("Uploading: {file_name}"));
                }
                UploadStatus::Uploaded => {
                    ui.colored_label(egui::Color32::GREEN, "Uploaded ✅");
                }
                UploadStatus::Failed { message } => {
                    ui.colored_label(egui::Color32::RED, format!("Upload failed: {message}"));
                }
            }
        });
    });

    ui.add_space(16.0);

    // Platform, topic and the generate trigger
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Content");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Platform:");
            egui::ComboBox::from_id_source("platform_select")
                .selected_text(state.composer.platform.as_str())
                .show_ui(ui, |ui| {
                    for platform in Platform::ALL {
                        ui.selectable_value(
                            &mut state.composer.platform,
                            platform,
                            platform.as_str(),
                        );
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Topic:");
            ui.add_sized(
                [ui.available_width(), 20.0],
                egui::TextEdit::singleline(&mut state.composer.topic)
                    .hint_text("What should the post be about?"),
            );
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("▶ Generate Content"))
                .clicked()
            {
                match state.composer.generate_request() {
                    Some(request) => {
                        state.composer.begin_generate();
                        state
                            .request_manager
                            .start_generate(request, ui.ctx().clone());
                    }
                    None => {
                        state.error_message = Some(UPLOAD_FIRST_MESSAGE.to_string());
                    }
                }
            }
            if state.composer.pending == Some(PendingCall::Generate) {
                ui.spinner();
                ui.label("Generating...");
            }
        });
    });

    ui.add_space(16.0);

    if state.composer.preview.is_some() {
        draw_preview_panel(ui, state, preview_texture, busy);
    }
}

fn draw_preview_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    preview_texture: Option<&egui::TextureHandle>,
    busy: bool,
) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.heading("Preview");
        ui.add_space(8.0);

        let image_url = state
            .composer
            .preview
            .as_ref()
            .map(|preview| preview.image_url.clone())
            .unwrap_or_default();

        match preview_texture {
            Some(texture) => {
                ui.add(egui::Image::new(texture).max_width(420.0).rounding(4.0));
            }
            None => {
                // Bytes still in flight, or the decode failed. The link
                // keeps the image reachable either way.
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.hyperlink_to("Open generated image", &image_url);
                });
            }
        }

        ui.add_space(8.0);
        ui.label("Caption:");
        if let Some(preview) = state.composer.preview.as_mut() {
            ui.add_sized(
                [ui.available_width(), 140.0],
                egui::TextEdit::multiline(&mut preview.caption)
                    .hint_text("Edit the caption before scheduling"),
            );
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("Schedule Post"))
                .clicked()
            {
                if let Some(request) = state.composer.schedule_request() {
                    state.composer.begin_schedule();
                    state
                        .request_manager
                        .start_schedule(request, ui.ctx().clone());
                }
            }
            if state.composer.pending == Some(PendingCall::Schedule) {
                ui.spinner();
                ui.label("Scheduling...");
            }
        });
    });
}
