//! Decoding of raw MIDI channel messages.

/// This mask should be used for all generic MIDI values.
const GENERIC_MIDI_VALUE_MASK: u8 = 0b_0111_1111;

/// Status byte of a note off message on the first channel.
pub const MIDI_NOTE_OFF: u8 = 0x80;
/// Status byte of a note on message on the first channel.
pub const MIDI_NOTE_ON: u8 = 0x90;

/// A decoded note message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MIDIMessage {
    NoteOff { note: u8, velocity: u8 },
    NoteOn { note: u8, velocity: u8 },
}

impl MIDIMessage {
    /// Decodes a 3-byte message. Returns `None` for any status other than
    /// note on or note off.
    ///
    /// A note on with a velocity of zero is a note off.
    pub const fn from_bytes(bytes: [u8; 3]) -> Option<Self> {
        let [status, note, velocity] = bytes;
        let note = note & GENERIC_MIDI_VALUE_MASK;
        let velocity = velocity & GENERIC_MIDI_VALUE_MASK;

        match status {
            MIDI_NOTE_ON if velocity > 0 => {
                Some(Self::NoteOn { note, velocity })
            }
            MIDI_NOTE_ON | MIDI_NOTE_OFF => {
                Some(Self::NoteOff { note, velocity })
            }
            _ => None,
        }
    }

    pub const fn note(self) -> u8 {
        match self {
            Self::NoteOff { note, .. } | Self::NoteOn { note, .. } => note,
        }
    }

}

impl std::fmt::Display for MIDIMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteOff { note, velocity } => {
                write!(f, "MIDI note #{note} OFF with velocity {velocity}")
            }
            Self::NoteOn { note, velocity } => {
                write!(f, "MIDI note #{note} ON with velocity {velocity}")
            }
        }
    }
}
