//! Transient status messages for fetch and upload outcomes.

use eframe::egui;

use crate::app::MyoViewApp;

/// How long a message stays on screen, in seconds
const TOAST_SECS: u64 = 4;

impl MyoViewApp {
    /// Draw the current status message centered above the bottom edge.
    /// Expired messages are cleared; showing a new one replaces the
    /// old one and restarts the clock.
    pub fn render_toast(&mut self, ctx: &egui::Context) {
        let expired = self
            .toast_message
            .as_ref()
            .is_some_and(|(_, shown_at, _)| shown_at.elapsed().as_secs() >= TOAST_SECS);
        if expired {
            self.toast_message = None;
        }

        let Some((message, _, toast_type)) = &self.toast_message else {
            return;
        };
        let [r, g, b] = toast_type.color();

        egui::Area::new(egui::Id::new("status_toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -28.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_rgb(r, g, b))
                    .corner_radius(6)
                    .inner_margin(egui::Margin::symmetric(14, 10))
                    .show(ui, |ui| {
                        // Long service errors wrap instead of spanning
                        // the window
                        ui.set_max_width(360.0);
                        ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    });
            });
    }
}
