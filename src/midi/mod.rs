use midir::{Ignore, MidiInput, MidiInputConnection};
use midly::{MidiMessage, live::LiveEvent};
use std::thread;
use std::time::Duration;

use crate::core::message::{GuiToMidiMsg, GuiToMidiRx, MidiConnection, MidiToGuiMsg, MidiToGuiTx};

const CLIENT_NAME: &str = "eden-visuals";
const COMMAND_POLL: Duration = Duration::from_millis(50);

/// Spawns the thread that owns the MIDI input connection. Incoming events go
/// to the GUI over `tx`; port-selection commands come back over `commands`.
/// Connects to port 0 at startup.
pub fn spawn_midi_thread(tx: MidiToGuiTx, mut commands: GuiToMidiRx) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut connection = open_port(0, &tx);
        loop {
            while let Ok(command) = commands.pop() {
                match command {
                    GuiToMidiMsg::SelectPort(index) => {
                        // close the current connection before reopening
                        drop(connection.take());
                        connection = open_port(index, &tx);
                    }
                }
            }
            thread::sleep(COMMAND_POLL);
        }
    })
}

fn open_port(index: usize, tx: &MidiToGuiTx) -> Option<MidiInputConnection<()>> {
    let mut midi_in = match MidiInput::new(CLIENT_NAME) {
        Ok(midi_in) => midi_in,
        Err(err) => {
            log::warn!("failed to create MIDI input client: {err}");
            let _ = tx.try_send(MidiToGuiMsg::Connection(MidiConnection::Disconnected));
            return None;
        }
    };
    midi_in.ignore(Ignore::None);

    let ports = midi_in.ports();
    let names: Vec<String> = ports
        .iter()
        .map(|port| {
            midi_in
                .port_name(port)
                .unwrap_or_else(|_| "unknown".to_string())
        })
        .collect();
    let _ = tx.try_send(MidiToGuiMsg::Ports(names.clone()));

    let Some(port) = ports.get(index) else {
        // out-of-range selection is a silent no-op; the overlay shows
        // "none/invalid" until a valid port is picked
        log::warn!(
            "MIDI port {index} does not exist ({} available)",
            ports.len()
        );
        let _ = tx.try_send(MidiToGuiMsg::Connection(MidiConnection::Disconnected));
        return None;
    };
    let name = names[index].clone();

    let event_tx = tx.clone();
    match midi_in.connect(
        port,
        "eden-visuals-input",
        move |_, bytes, _| forward_event(bytes, &event_tx),
        (),
    ) {
        Ok(connection) => {
            log::info!("connected to MIDI input {index}: {name}");
            let _ = tx.try_send(MidiToGuiMsg::Connection(MidiConnection::Connected {
                index,
                name,
            }));
            Some(connection)
        }
        Err(err) => {
            log::warn!("failed to connect to MIDI port {index}: {err}");
            let _ = tx.try_send(MidiToGuiMsg::Connection(MidiConnection::Disconnected));
            None
        }
    }
}

/// Runs on the driver's callback thread. Only note-on and control-change
/// events are forwarded; a full channel drops the event (the visualization is
/// best effort, never a source of truth).
fn forward_event(bytes: &[u8], tx: &MidiToGuiTx) {
    let Ok(event) = LiveEvent::parse(bytes) else {
        return;
    };
    let LiveEvent::Midi { message, .. } = event else {
        return;
    };
    let msg = match message {
        MidiMessage::NoteOn { key, vel } => MidiToGuiMsg::NoteOn {
            note: key.as_int(),
            velocity: vel.as_int(),
        },
        MidiMessage::Controller { controller, value } => MidiToGuiMsg::ControlChange {
            controller: controller.as_int(),
            value: value.as_int(),
        },
        _ => return,
    };
    let _ = tx.try_send(msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::{Receiver, bounded};

    fn setup_channel() -> (MidiToGuiTx, Receiver<MidiToGuiMsg>) {
        bounded(16)
    }

    #[test]
    fn test_note_on_bytes_are_forwarded() {
        let (tx, rx) = setup_channel();

        forward_event(&[0x90, 60, 100], &tx);

        match rx.try_recv() {
            Ok(MidiToGuiMsg::NoteOn { note, velocity }) => {
                assert_eq!((note, velocity), (60, 100));
            }
            _ => panic!("expected a NoteOn message"),
        }
    }

    #[test]
    fn test_control_change_bytes_are_forwarded() {
        let (tx, rx) = setup_channel();

        forward_event(&[0xB0, 1, 64], &tx);

        match rx.try_recv() {
            Ok(MidiToGuiMsg::ControlChange { controller, value }) => {
                assert_eq!((controller, value), (1, 64));
            }
            _ => panic!("expected a ControlChange message"),
        }
    }

    #[test]
    fn test_other_message_kinds_are_dropped() {
        let (tx, rx) = setup_channel();

        // note-off, pitch bend, aftertouch, realtime clock, garbage
        forward_event(&[0x80, 60, 64], &tx);
        forward_event(&[0xE0, 0, 64], &tx);
        forward_event(&[0xD0, 40], &tx);
        forward_event(&[0xF8], &tx);
        forward_event(&[0x12, 0x34], &tx);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_note_on_velocity_zero_still_reaches_the_state() {
        let (tx, rx) = setup_channel();

        // the velocity-0 no-op belongs to the state, not the wire filter
        forward_event(&[0x90, 60, 0], &tx);

        match rx.try_recv() {
            Ok(MidiToGuiMsg::NoteOn { note, velocity }) => {
                assert_eq!((note, velocity), (60, 0));
            }
            _ => panic!("expected a NoteOn message"),
        }
    }
}
