//! MIDI input: decoding, key routing, and port listening.

pub mod input;
pub mod message;
pub mod router;

pub use input::{MIDIError, MIDIInputListener};
pub use message::MIDIMessage;
pub use router::{KeyEvent, MIDIEventRouter};
