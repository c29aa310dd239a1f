#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod paths;
mod theme;

fn main() -> eframe::Result {
    helpers::log::init_logging();

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("MotionLab")
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([520.0, 480.0])
            .with_resizable(true)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "MotionLab",
        native_options,
        Box::new(|cc| Ok(Box::new(app::MotionLabApp::new(cc)))),
    )
}
