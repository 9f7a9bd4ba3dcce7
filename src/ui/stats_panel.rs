//! Aggregate statistics table for the active dataset.
//!
//! Mean, max, and the peak count come precomputed from the dataset
//! service; the minimum is computed client-side over the full sanitized
//! series.

use eframe::egui;

use crate::app::MyoViewApp;
use crate::series::ChannelKey;

/// Format an optional statistic; missing values render blank-ish
fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

impl MyoViewApp {
    /// Render the per-channel statistics grid
    pub fn render_stats_panel(&mut self, ui: &mut egui::Ui) {
        let Some(active) = &self.active else {
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("No dataset selected")
                    .small()
                    .color(egui::Color32::GRAY),
            );
            ui.add_space(6.0);
            return;
        };

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Statistics").strong());
            ui.label(
                egui::RichText::new(format!("{} peaks detected", active.stats.peaks))
                    .small()
                    .color(egui::Color32::GRAY),
            );
        });
        ui.add_space(4.0);

        egui::Grid::new("stats_grid")
            .striped(true)
            .min_col_width(80.0)
            .show(ui, |ui| {
                ui.label("");
                for channel in ChannelKey::ALL {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} ({})",
                            channel.label(),
                            channel.unit()
                        ))
                        .strong(),
                    );
                }
                ui.end_row();

                ui.label("Mean");
                for channel in ChannelKey::ALL {
                    ui.label(format_stat(active.stats.mean_for(channel)));
                }
                ui.end_row();

                ui.label("Max");
                for channel in ChannelKey::ALL {
                    ui.label(format_stat(active.stats.max_for(channel)));
                }
                ui.end_row();

                ui.label("Min");
                for channel in ChannelKey::ALL {
                    ui.label(format_stat(active.minima.map(|m| m.get(channel))));
                }
                ui.end_row();
            });
        ui.add_space(6.0);
    }
}
