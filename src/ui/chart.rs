//! Mode toolbar, chart rendering, and the view-window controls.
//!
//! Chart data comes out of the app's memoized cache; this module only
//! turns the cached samples into plot lines for the window the brush
//! currently selects.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::app::MyoViewApp;
use crate::brush::BrushRange;
use crate::series::ChannelKey;
use crate::state::{DisplayMode, FetchState, LayoutMode, ViewportClass, CHANNEL_COLORS};

impl MyoViewApp {
    /// Render the display-mode and layout selectors
    pub fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Mode:");
            for mode in DisplayMode::ALL {
                if ui
                    .selectable_label(self.display_mode == mode, mode.name())
                    .clicked()
                {
                    self.display_mode = mode;
                }
            }

            ui.separator();
            ui.label("Layout:");
            for layout in [LayoutMode::Merged, LayoutMode::Split] {
                if ui
                    .selectable_label(self.layout_mode == layout, layout.name())
                    .clicked()
                {
                    self.layout_mode = layout;
                }
            }

            // Active dataset name on the right
            let active_name = self.active.as_ref().map(|a| a.name.clone());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(name) = active_name {
                    ui.label(egui::RichText::new(name).strong());
                }
                if matches!(self.fetch_state, FetchState::Loading(_)) {
                    ui.spinner();
                }
            });
        });
        ui.add_space(4.0);
    }

    /// Render the chart area for the current mode, layout, and window
    pub fn render_chart(&mut self, ui: &mut egui::Ui, viewport: ViewportClass) {
        let Some(key) = self.chart_key(viewport) else {
            ui.centered_and_justified(|ui| {
                if matches!(self.fetch_state, FetchState::Loading(_)) {
                    ui.spinner();
                } else {
                    ui.label(
                        egui::RichText::new("Select a dataset")
                            .size(20.0)
                            .color(egui::Color32::GRAY),
                    );
                }
            });
            return;
        };

        // The brush selection only indexes the displayed series; a
        // change in dataset, mode, viewport, or layout invalidates it
        let tag = self.series_tag(key);
        self.brush.retarget(tag);

        let (len, total_points, is_capped) = match self.chart_data(key) {
            Some(data) => (data.samples.len(), data.total_points, data.is_capped),
            None => return,
        };
        if len == 0 {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Dataset has no plottable samples")
                        .size(16.0)
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        }

        let (start, end) = self.brush.clamped_bounds(len);

        // Build per-channel plot points for the visible window
        let lines: Vec<(ChannelKey, Vec<[f64; 2]>)> = {
            let Some(data) = self.chart_data(key) else {
                return;
            };
            let visible = &data.samples[start..=end];
            ChannelKey::ALL
                .iter()
                .map(|&channel| {
                    let points = visible
                        .iter()
                        .map(|s| [s.timestamp, s.value(channel)])
                        .collect();
                    (channel, points)
                })
                .collect()
        };

        self.render_window_controls(ui, len, start, end, total_points, is_capped);
        ui.add_space(4.0);

        match self.layout_mode {
            LayoutMode::Merged => {
                let height = ui.available_height();
                Self::plot_channels(ui, "chart_merged", &lines, height);
            }
            LayoutMode::Split => {
                let (emg, angle): (Vec<_>, Vec<_>) =
                    lines.into_iter().partition(|(channel, _)| channel.is_emg());
                let height = ((ui.available_height() - 8.0) / 2.0).max(120.0);
                Self::plot_channels(ui, "chart_emg", &emg, height);
                ui.add_space(4.0);
                Self::plot_channels(ui, "chart_angle", &angle, height);
            }
        }
    }

    /// Render the view-window (brush) controls and the sample caption
    fn render_window_controls(
        &mut self,
        ui: &mut egui::Ui,
        len: usize,
        start: usize,
        end: usize,
        total_points: usize,
        is_capped: bool,
    ) {
        ui.horizontal(|ui| {
            ui.label("Window:");
            let last = (len - 1) as i64;
            let mut start_index = start as i64;
            let mut end_index = end as i64;

            let start_changed = ui
                .add(egui::DragValue::new(&mut start_index).range(0..=last))
                .changed();
            ui.label("to");
            let end_changed = ui
                .add(egui::DragValue::new(&mut end_index).range(0..=last))
                .changed();

            // Out-of-order or out-of-range input is corrected by
            // clamping on the next read, never rejected
            if start_changed || end_changed {
                self.brush
                    .set_range(BrushRange::from_parts(Some(start_index), Some(end_index)));
            }

            if self.brush.has_selection() && ui.button("Reset window").clicked() {
                self.brush.reset();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let caption = if is_capped {
                    format!("showing {} of {} samples", len, total_points)
                } else {
                    format!("{} samples", total_points)
                };
                ui.label(
                    egui::RichText::new(caption)
                        .small()
                        .color(egui::Color32::GRAY),
                );
            });
        });
    }

    /// Plot a set of channel lines in a single plot area
    fn plot_channels(
        ui: &mut egui::Ui,
        id_source: &str,
        lines: &[(ChannelKey, Vec<[f64; 2]>)],
        height: f32,
    ) {
        Plot::new(id_source.to_owned())
            .legend(Legend::default())
            .height(height)
            .allow_zoom([true, false])
            .allow_scroll([true, false])
            .show(ui, |plot_ui| {
                for (channel, points) in lines {
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    let color = CHANNEL_COLORS[channel.index()];

                    plot_ui.line(
                        Line::new(
                            format!("{} ({})", channel.label(), channel.unit()),
                            plot_points,
                        )
                        .color(egui::Color32::from_rgb(color[0], color[1], color[2]))
                        .width(1.5),
                    );
                }
            });
    }
}
