//! Command-line arguments.

use super::sketches::{SketchKind, SketchSettings};
use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Interactive generative audio/visual sketches.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Arguments {
    /// The sketch to open.
    #[arg(value_enum, default_value_t = SketchKind::Ambient)]
    pub sketch: SketchKind,

    /// Directory holding the device descriptors.
    #[arg(long, default_value = "patches")]
    pub patches: PathBuf,

    /// Bind to the first MIDI input port containing this text
    /// (case-insensitive). Defaults to the first port.
    #[arg(long)]
    pub midi_port: Option<String>,

    /// MIDI note of the leftmost piano key.
    #[arg(
        long,
        default_value_t = PIANO_START_NOTE,
        value_parser = clap::value_parser!(u8).range(0..=127),
    )]
    pub start_note: u8,

    /// Number of piano keys.
    #[arg(
        long,
        default_value_t = PIANO_KEY_COUNT as u16,
        value_parser = clap::value_parser!(u16).range(1..=128),
    )]
    pub key_count: u16,

    /// Directory frame captures are written to.
    #[arg(long, default_value = "captures")]
    pub captures: PathBuf,
}

impl Arguments {
    pub fn settings(&self) -> SketchSettings {
        SketchSettings {
            patches: self.patches.clone(),
            midi_port: self.midi_port.clone(),
            start_note: self.start_note,
            key_count: usize::from(self.key_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_the_ambient_sketch() {
        let args = Arguments::try_parse_from(["sketchbook"]).unwrap();

        assert_eq!(args.sketch, SketchKind::Ambient);
        assert_eq!(args.captures, PathBuf::from("captures"));
        assert_eq!(args.settings(), SketchSettings::default());
    }

    #[test]
    fn piano_options_are_parsed() {
        let args = Arguments::try_parse_from([
            "sketchbook",
            "piano",
            "--start-note",
            "48",
            "--key-count",
            "8",
            "--midi-port",
            "keystep",
        ])
        .unwrap();

        let settings = args.settings();
        assert_eq!(args.sketch, SketchKind::Piano);
        assert_eq!(settings.start_note, 48);
        assert_eq!(settings.key_count, 8);
        assert_eq!(settings.midi_port.as_deref(), Some("keystep"));
    }

    #[test]
    fn out_of_range_notes_are_rejected() {
        assert!(Arguments::try_parse_from(["sketchbook", "--start-note", "128"])
            .is_err());
        assert!(Arguments::try_parse_from(["sketchbook", "--key-count", "0"])
            .is_err());
        assert!(Arguments::try_parse_from(["sketchbook", "organ"]).is_err());
    }
}
