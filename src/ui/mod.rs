use crate::{
    core::message::{GuiToMidiTx, MidiToGuiRx},
    ui::{app::EdenApp, window::get_native_options},
};

pub mod app;
mod overlay;
mod scene;
mod window;

pub fn spawn_ui_thread(tx: GuiToMidiTx, rx: MidiToGuiRx) -> Result<(), eframe::Error> {
    eframe::run_native(
        "Eden",
        get_native_options(),
        Box::new(|cc| Ok(Box::new(EdenApp::new(tx, rx, cc)))),
    )
}
