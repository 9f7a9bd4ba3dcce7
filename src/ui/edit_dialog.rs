//! Rename / replace-file window for the active dataset.

use eframe::egui;

use crate::app::MyoViewApp;

impl MyoViewApp {
    /// Render the edit window. The name is always sent; the source file
    /// is only replaced when a new one was picked.
    pub fn render_edit_window(&mut self, ctx: &egui::Context) {
        let mut open = self.edit_open;

        egui::Window::new("Edit dataset")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.edit_name).hint_text("Dataset name"),
                );

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("Replace file…").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Excel Workbook", &["xlsx"])
                            .pick_file()
                        {
                            self.edit_path = Some(path);
                        }
                    }
                    match &self.edit_path {
                        Some(path) => {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_default();
                            ui.label(egui::RichText::new(name).small());
                        }
                        None => {
                            ui.label(
                                egui::RichText::new("keeping current file")
                                    .small()
                                    .color(egui::Color32::GRAY),
                            );
                        }
                    }
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!self.mutation_in_flight, |ui| {
                        if ui.button("Save").clicked() {
                            self.start_update_dataset();
                        }
                    });
                    if self.mutation_in_flight {
                        ui.spinner();
                    }
                });
            });

        self.edit_open = open;
    }
}
