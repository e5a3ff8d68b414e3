use crossbeam::channel::{Receiver, Sender};
use rtrb::{Consumer, Producer};

/// Events flowing from the MIDI thread to the render thread. Drained once
/// per frame by `VisualState::update`.
pub enum MidiToGuiMsg {
    NoteOn { note: u8, velocity: u8 },
    ControlChange { controller: u8, value: u8 },
    // Connection bookkeeping for the instructions overlay
    Ports(Vec<String>),
    Connection(MidiConnection),
}

/// Commands flowing from the render thread back to the MIDI thread.
pub enum GuiToMidiMsg {
    SelectPort(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MidiConnection {
    Connected { index: usize, name: String },
    Disconnected,
}

pub type MidiToGuiTx = Sender<MidiToGuiMsg>;
pub type MidiToGuiRx = Receiver<MidiToGuiMsg>;
pub type GuiToMidiTx = Producer<GuiToMidiMsg>;
pub type GuiToMidiRx = Consumer<GuiToMidiMsg>;
