//! Dataset list sidebar and the upload form.

use eframe::egui;

use crate::app::MyoViewApp;
use crate::state::FetchState;

impl MyoViewApp {
    /// Render the dataset sidebar: list, refresh, and upload form
    pub fn render_datasets_panel(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.heading("Datasets");
            if self.list_loading {
                ui.spinner();
            } else if ui.small_button("Refresh").clicked() {
                self.refresh_datasets();
            }
        });
        ui.separator();

        if self.datasets.is_empty() && !self.list_loading {
            ui.label(
                egui::RichText::new("No datasets yet. Upload an .xlsx file below.")
                    .small()
                    .color(egui::Color32::GRAY),
            );
        }

        // Defer selection until after the list borrow ends
        let mut clicked: Option<i64> = None;
        let active_id = self.active.as_ref().map(|a| a.id);
        let loading_id = match self.fetch_state {
            FetchState::Loading(id) => Some(id),
            FetchState::Idle => None,
        };

        egui::ScrollArea::vertical()
            .max_height((ui.available_height() - 180.0).max(100.0))
            .show(ui, |ui| {
                for dataset in &self.datasets {
                    let is_selected = active_id == Some(dataset.id);
                    ui.horizontal(|ui| {
                        if ui.selectable_label(is_selected, &dataset.name).clicked() {
                            clicked = Some(dataset.id);
                        }
                        if loading_id == Some(dataset.id) {
                            ui.spinner();
                        }
                    });
                }
            });

        if let Some(id) = clicked {
            self.select_dataset(id);
        }

        // Edit entry point for the active dataset
        if let Some(active_name) = self.active.as_ref().map(|a| a.name.clone()) {
            ui.add_space(4.0);
            if ui.button("Edit selected…").clicked() {
                self.edit_name = active_name;
                self.edit_path = None;
                self.edit_open = true;
            }
        }

        // Upload form pinned to the bottom
        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.add_space(8.0);
            self.render_upload_form(ui);
        });
    }

    /// Render the new-dataset upload form
    fn render_upload_form(&mut self, ui: &mut egui::Ui) {
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(35, 35, 35))
            .corner_radius(8)
            .inner_margin(10)
            .show(ui, |ui| {
                ui.label(egui::RichText::new("New dataset").strong());
                ui.add_space(4.0);

                ui.add(
                    egui::TextEdit::singleline(&mut self.upload_name).hint_text("Dataset name"),
                );

                ui.horizontal(|ui| {
                    if ui.button("Choose file…").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Excel Workbook", &["xlsx"])
                            .pick_file()
                        {
                            self.upload_path = Some(path);
                        }
                    }
                    match &self.upload_path {
                        Some(path) => {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_default();
                            ui.label(egui::RichText::new(name).small());
                        }
                        None => {
                            ui.label(
                                egui::RichText::new(".xlsx only")
                                    .small()
                                    .color(egui::Color32::GRAY),
                            );
                        }
                    }
                });

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!self.mutation_in_flight, |ui| {
                        if ui.button("Upload").clicked() {
                            self.start_create_dataset();
                        }
                    });
                    if self.mutation_in_flight {
                        ui.spinner();
                    }
                });
            });
    }
}
