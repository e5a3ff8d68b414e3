
use crate::core::{
    message::{GuiToMidiMsg, GuiToMidiTx, MidiConnection, MidiToGuiMsg, MidiToGuiRx},
    slots::{NoteSlotTable, NoteVisual},
};
use egui::{Pos2, Vec2};
use rand::Rng;

/// CC index driving the background gradient (mod wheel).
pub const BACKGROUND_CONTROLLER: u8 = 1;

/// Single owner of everything the scene draws from. Lives on the render
/// thread; the MIDI thread only ever talks to it through the channel.
pub struct VisualState {
    slots: NoteSlotTable,
    background_level: u8,
    ports: Vec<String>,
    connection: MidiConnection,
    show_instructions: bool,
    tx: GuiToMidiTx,
    rx: MidiToGuiRx,
}

impl VisualState {
    pub fn new(tx: GuiToMidiTx, rx: MidiToGuiRx) -> Self {
        Self {
            slots: NoteSlotTable::new(),
            background_level: 0,
            ports: Vec::new(),
            connection: MidiConnection::Disconnected,
            show_instructions: true,
            tx,
            rx,
        }
    }

    /// Drains pending MIDI messages. Called once per frame before painting.
    pub fn update(&mut self, viewport: Vec2) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg, viewport);
        }
    }

    fn handle_message(&mut self, msg: MidiToGuiMsg, viewport: Vec2) {
        match msg {
            MidiToGuiMsg::NoteOn { note, velocity } => {
                // velocity 0 is left alone: notes only ever fade out via the
                // countdown, never via an explicit note-off
                if velocity == 0 {
                    return;
                }
                let position = random_position(viewport);
                // a full table drops the note, best effort
                self.slots.allocate(note, velocity, position);
            }
            MidiToGuiMsg::ControlChange { controller, value } => {
                if controller == BACKGROUND_CONTROLLER {
                    self.background_level = value;
                }
            }
            MidiToGuiMsg::Ports(ports) => self.ports = ports,
            MidiToGuiMsg::Connection(connection) => self.connection = connection,
        }
    }

    /// Snapshots and ages the active notes. Exactly one call per frame, from
    /// the scene painter.
    pub fn age_and_collect(&mut self) -> Vec<NoteVisual> {
        self.slots.age_and_collect()
    }

    pub fn active_notes(&self) -> usize {
        self.slots.active_len()
    }

    pub fn background_level(&self) -> u8 {
        self.background_level
    }

    // Instructions overlay
    pub fn toggle_instructions(&mut self) {
        self.show_instructions = !self.show_instructions;
    }

    pub fn showing_instructions(&self) -> bool {
        self.show_instructions
    }

    // MIDI connection
    pub fn select_port(&mut self, index: usize) {
        let _ = self.tx.push(GuiToMidiMsg::SelectPort(index));
    }

    pub fn ports(&self) -> &[String] {
        &self.ports
    }

    pub fn connection(&self) -> &MidiConnection {
        &self.connection
    }
}

fn random_position(viewport: Vec2) -> Pos2 {
    let mut rng = rand::rng();
    Pos2::new(
        rng.random_range(0.0..viewport.x.max(1.0)),
        rng.random_range(0.0..viewport.y.max(1.0)),
    )
}
