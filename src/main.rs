//! MyoView - a desktop viewer for EMG session datasets
//!
//! MyoView talks to the dataset service for storage and aggregates, and
//! renders the five-channel sample series (four EMG channels plus a
//! joint angle) with cap-bounded downsampling so arbitrarily long
//! recordings stay responsive.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use myoview::app::MyoViewApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 900.0])
            .with_min_inner_size([480.0, 600.0])
            .with_title("MyoView - EMG Dataset Viewer")
            .with_app_id("MyoView"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "MyoView",
        native_options,
        Box::new(|cc| Ok(Box::new(MyoViewApp::new(cc)))),
    )
}
