use eframe::NativeOptions;
use egui::{Vec2, ViewportBuilder};

pub const WINDOW_SIZE: Vec2 = Vec2::new(1024., 768.);

pub fn get_native_options() -> NativeOptions {
    let mut options = NativeOptions::default();
    options.viewport = ViewportBuilder::default()
        .with_inner_size(WINDOW_SIZE)
        .with_resizable(false);
    // the display's vsync caps the frame (and fade) rate at 60
    options.vsync = true;
    options
}
