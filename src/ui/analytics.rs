// src/ui/analytics.rs
use eframe::egui;
use rfd::FileDialog;

use crate::state::analytics::{
    curve_points, day_labels, platform_series, write_csv, CURVE_SAMPLES, CURVE_TENSION,
};
use crate::state::{AppState, FetchStatus};
use crate::ui::theme;

pub fn draw_analytics_view(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Analytics");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!state.analytics.loading(), egui::Button::new("Refresh"))
                .clicked()
            {
                state.analytics.begin_fetch();
                state.request_manager.start_analytics(ui.ctx().clone());
            }
            if ui
                .add_enabled(
                    state.analytics.data.is_some(),
                    egui::Button::new("Export CSV"),
                )
                .clicked()
            {
                export_csv(state);
            }
            if state.analytics.loading() {
                ui.spinner();
            }
        });
    });

    if let FetchStatus::Failed { message } = &state.analytics.status {
        ui.add_space(8.0);
        ui.colored_label(
            egui::Color32::RED,
            format!("Failed to load analytics: {message}"),
        );
    }

    ui.add_space(8.0);

    let Some(data) = state.analytics.data.clone() else {
        if !state.analytics.loading()
            && !matches!(state.analytics.status, FetchStatus::Failed { .. })
        {
            ui.label("No analytics loaded yet");
        }
        return;
    };

    // Engagement trend
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Engagement Trend");
            ui.add_space(4.0);

            let curve = curve_points(&data.engagement_trend, CURVE_SAMPLES, CURVE_TENSION);

            let plot = egui_plot::Plot::new("engagement_trend")
                .height(220.0)
                .allow_zoom(false)
                .allow_drag(false)
                .allow_scroll(false)
                .show_background(false)
                .show_axes([false, true])
                .include_y(0.0);

            plot.show(ui, |plot_ui| {
                plot_ui.line(
                    egui_plot::Line::new(curve)
                        .color(theme::ACCENT)
                        .width(2.0)
                        .fill(0.0),
                );
            });

            // Day labels under the hidden category axis
            ui.horizontal(|ui| {
                let labels = day_labels(data.engagement_trend.len());
                let slot = (ui.available_width() / labels.len().max(1) as f32).max(24.0);
                for label in labels {
                    ui.add_sized(
                        [slot, 14.0],
                        egui::Label::new(
                            egui::RichText::new(label).color(theme::AXIS_TEXT).small(),
                        ),
                    );
                }
            });
        });
    });

    ui.add_space(16.0);

    // Platform distribution
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.set_width(ui.available_width());
            ui.heading("Platform Distribution");
            ui.add_space(4.0);

            let series = platform_series(&data.platforms);

            let plot = egui_plot::Plot::new("platform_distribution")
                .height(220.0)
                .allow_zoom(false)
                .allow_drag(false)
                .allow_scroll(false)
                .show_background(false)
                .show_axes([false, true])
                .include_y(0.0);

            plot.show(ui, |plot_ui| {
                let bars: Vec<egui_plot::Bar> = series
                    .iter()
                    .enumerate()
                    .map(|(i, (label, value))| {
                        egui_plot::Bar::new(i as f64, *value)
                            .name(*label)
                            .width(theme::BAR_WIDTH)
                            .fill(theme::PLATFORM_COLORS[i])
                    })
                    .collect();

                plot_ui.bar_chart(egui_plot::BarChart::new(bars));
            });

            ui.horizontal(|ui| {
                for (i, (label, _)) in series.iter().enumerate() {
                    ui.colored_label(theme::PLATFORM_COLORS[i], format!("• {label}"));
                }
            });
        });
    });
}

/// Prompts for a destination and writes both analytics series as CSV.
pub fn export_csv(state: &mut AppState) {
    let Some(data) = state.analytics.data.clone() else {
        state.error_message = Some("No analytics data to export yet".to_string());
        return;
    };

    let default_name = format!(
        "analytics_{}.csv",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    let file_dialog = FileDialog::new()
        .add_filter("CSV files", &["csv"])
        .set_file_name(default_name)
        .set_title("Export Analytics CSV");

    if let Some(path) = file_dialog.save_file() {
        let result = std::fs::File::create(&path)
            .map_err(anyhow::Error::from)
            .and_then(|file| write_csv(&data, file));
        if let Err(e) = result {
            state.error_message = Some(format!("Export failed: {}", e));
        }
    }
}
