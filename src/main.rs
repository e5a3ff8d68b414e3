use crate::{core::message::GuiToMidiMsg, midi::spawn_midi_thread, ui::spawn_ui_thread};

use crossbeam::channel::bounded;
use rtrb::RingBuffer;

mod core;
mod media;
mod midi;
mod ui;

const MIDI_EVENT_CAPACITY: usize = 256;
const MIDI_COMMAND_CAPACITY: usize = 16;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    // Create channels
    let (midi_tx, midi_rx) = bounded(MIDI_EVENT_CAPACITY);
    let (command_tx, command_rx) = RingBuffer::<GuiToMidiMsg>::new(MIDI_COMMAND_CAPACITY);

    // Midi thread that collects midi inputs
    spawn_midi_thread(midi_tx, command_rx);
    // Ui thread (main thread). Opens the app window
    spawn_ui_thread(command_tx, midi_rx)
}
