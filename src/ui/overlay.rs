use crate::core::{message::MidiConnection, state::VisualState};
use egui::{Align2, Color32, FontId, Ui, pos2};

const MARGIN_X: f32 = 10.;
const LINE_HEIGHT: f32 = 20.;

/// Static instructions text: available MIDI ports, the current connection and
/// the key bindings. Pure presentation, mutates nothing.
pub struct UIInstructions {}

impl UIInstructions {
    pub fn new() -> Self {
        Self {}
    }

    pub fn ui(&self, ui: &mut Ui, state: &VisualState) {
        let painter = ui.painter();
        let font = FontId::monospace(14.);
        let line = |y: f32, text: &str| {
            painter.text(
                pos2(MARGIN_X, y),
                Align2::LEFT_BOTTOM,
                text,
                font.clone(),
                Color32::WHITE,
            );
        };

        line(24., "MIDI inputs available:");

        let mut last_line_pos = 44.;
        for (i, name) in state.ports().iter().enumerate() {
            last_line_pos = 44. + LINE_HEIGHT * i as f32;
            line(last_line_pos, &format!("{i}: {name}"));
        }

        line(last_line_pos + 40., "Currently connected to MIDI input:");
        let connected = match state.connection() {
            MidiConnection::Connected { name, .. } => name.as_str(),
            MidiConnection::Disconnected => "none/invalid",
        };
        line(last_line_pos + 60., connected);

        line(
            last_line_pos + 100.,
            "Press 0-9 on the keyboard to set the connected port number.",
        );
        line(
            last_line_pos + 120.,
            "Press lowercase 's' on the keyboard to show/hide this text.",
        );
    }
}
