use crate::{
    core::{
        message::{GuiToMidiTx, MidiToGuiRx},
        state::VisualState,
    },
    media::MediaLibrary,
    ui::{overlay::UIInstructions, scene::UIScene},
};
use egui::{Color32, Event, Key, Modifiers};

const DIGIT_KEYS: [Key; 10] = [
    Key::Num0,
    Key::Num1,
    Key::Num2,
    Key::Num3,
    Key::Num4,
    Key::Num5,
    Key::Num6,
    Key::Num7,
    Key::Num8,
    Key::Num9,
];

pub struct EdenApp {
    state: VisualState,
    media: MediaLibrary,
    scene: UIScene,
    overlay: UIInstructions,
}

impl EdenApp {
    pub fn new(tx: GuiToMidiTx, rx: MidiToGuiRx, cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            state: VisualState::new(tx, rx),
            media: MediaLibrary::load(&cc.egui_ctx),
            scene: UIScene::new(),
            overlay: UIInstructions::new(),
        }
    }

    fn handle_key_press(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            if let Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } = event
            {
                apply_key(&mut self.state, *key, *modifiers);
            }
        }
    }
}

/// Lowercase `s` toggles the instructions; digits pick the MIDI port.
fn apply_key(state: &mut VisualState, key: Key, modifiers: Modifiers) {
    if key == Key::S && !modifiers.shift {
        state.toggle_instructions();
    } else if let Some(digit) = DIGIT_KEYS.iter().position(|k| *k == key) {
        state.select_port(digit);
    }
}

impl eframe::App for EdenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain MIDI events, then advance the clip loops
        self.state.update(ctx.screen_rect().size());
        self.media.clip.advance();
        self.handle_key_press(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| {
                self.scene.ui(ui, &mut self.state, &self.media);
                if self.state.showing_instructions() {
                    self.overlay.ui(ui, &self.state);
                }
            });

        // keep the fade animation running without input
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{GuiToMidiMsg, MidiToGuiMsg};
    use crossbeam::channel::bounded;

    fn setup_state() -> (VisualState, rtrb::Consumer<GuiToMidiMsg>) {
        let (tx, command_rx) = rtrb::RingBuffer::new(16);
        let (_midi_tx, midi_rx) = bounded::<MidiToGuiMsg>(16);
        (VisualState::new(tx, midi_rx), command_rx)
    }

    #[test]
    fn test_lowercase_s_toggles_instructions() {
        let (mut state, _command_rx) = setup_state();

        assert!(state.showing_instructions());
        apply_key(&mut state, Key::S, Modifiers::NONE);
        assert!(!state.showing_instructions());
        apply_key(&mut state, Key::S, Modifiers::NONE);
        assert!(state.showing_instructions());
    }

    #[test]
    fn test_shifted_s_is_ignored() {
        let (mut state, _command_rx) = setup_state();

        apply_key(&mut state, Key::S, Modifiers::SHIFT);
        assert!(state.showing_instructions());
    }

    #[test]
    fn test_digit_keys_select_the_matching_port() {
        let (mut state, mut command_rx) = setup_state();

        apply_key(&mut state, Key::Num3, Modifiers::NONE);
        match command_rx.pop() {
            Ok(GuiToMidiMsg::SelectPort(index)) => assert_eq!(index, 3),
            _ => panic!("expected a SelectPort command"),
        }

        // keys outside the bindings do nothing
        apply_key(&mut state, Key::A, Modifiers::NONE);
        assert!(command_rx.pop().is_err());
        assert!(state.showing_instructions());
    }
}
