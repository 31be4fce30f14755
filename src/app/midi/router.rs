//! Mapping decoded note messages onto the keys of a fixed-size keyboard.

use super::message::MIDIMessage;
use tracing::trace;

/// A note message resolved to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    NoteOn { index: usize, note: u8, velocity: u8 },
    NoteOff { index: usize, note: u8, velocity: u8 },
}

impl KeyEvent {
    pub const fn index(self) -> usize {
        match self {
            Self::NoteOn { index, .. } | Self::NoteOff { index, .. } => index,
        }
    }
}

/// Stateless decoder from raw MIDI bytes to [`KeyEvent`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MIDIEventRouter {
    start_note: u8,
    key_count: usize,
}

impl MIDIEventRouter {
    pub const fn new(start_note: u8, key_count: usize) -> Self {
        Self { start_note, key_count }
    }

    pub const fn key_count(&self) -> usize {
        self.key_count
    }

    /// The key playing `note`, if it is on the keyboard.
    pub fn key_index(&self, note: u8) -> Option<usize> {
        let index = usize::from(note.checked_sub(self.start_note)?);
        (index < self.key_count).then_some(index)
    }

    /// The MIDI note of the key at `index`.
    pub fn note_for_key(&self, index: usize) -> Option<u8> {
        if index >= self.key_count {
            return None;
        }

        let note = usize::from(self.start_note) + index;
        u8::try_from(note).ok().filter(|&n| n < 128)
    }

    /// Decodes `bytes` and resolves the note to a key. Unrelated messages and
    /// notes outside the keyboard resolve to `None`.
    pub fn route(&self, bytes: [u8; 3]) -> Option<KeyEvent> {
        let Some(msg) = MIDIMessage::from_bytes(bytes) else {
            trace!(?bytes, "ignoring non-note MIDI message");
            return None;
        };

        self.resolve(msg)
    }

    pub fn resolve(&self, msg: MIDIMessage) -> Option<KeyEvent> {
        let Some(index) = self.key_index(msg.note()) else {
            trace!(%msg, "ignoring note outside the keyboard");
            return None;
        };

        Some(match msg {
            MIDIMessage::NoteOn { note, velocity } => {
                KeyEvent::NoteOn { index, note, velocity }
            }
            MIDIMessage::NoteOff { note, velocity } => {
                KeyEvent::NoteOff { index, note, velocity }
            }
        })
    }
}
