//! Global constants.

/// The sample rate requested from the host audio subsystem.
pub const SAMPLE_RATE: u32 = 44100;

/// The DSP buffer size requested from the host audio subsystem.
pub const BUFFER_SIZE: usize = 256;

/// The number of audio channels for the application.
pub const NUM_CHANNELS: usize = 2;

/// How many graph events may be queued for the audio thread before new ones
/// are dropped.
pub const GRAPH_EVENT_QUEUE_SIZE: usize = 1024;

/// The most parameters a processing graph may declare.
pub const MAX_GRAPH_PARAMETERS: usize = 64;

/// The most payload values a message event carries into the audio thread.
pub const MAX_EVENT_PAYLOAD: usize = 4;

/// How many raw MIDI messages may wait between two render ticks.
pub const MIDI_MESSAGE_QUEUE_SIZE: usize = 256;

/// The master output gain used before the user touches the volume control.
pub const DEFAULT_MASTER_VOLUME: f64 = 0.8;

/// How much one press of the volume keys changes the master volume.
pub const VOLUME_STEP: f64 = 0.05;

/// The level of the theremin's `gain` parameter when it is not muted.
pub const THEREMIN_UNMUTED_GAIN: f64 = 0.6;

// *** knobs *** //

/// Normalized value change per unit of vertical pointer travel, so one full
/// course of a knob takes about 100 units.
pub const KNOB_SENSITIVITY: f64 = 0.01;

/// The hit radius (and drawn radius) of a knob.
pub const KNOB_RADIUS: f32 = 30.0;

/// Length of the indicator line drawn inside a knob.
pub const KNOB_INDICATOR_LENGTH: f32 = 25.0;

/// A knob sweeps from `-KNOB_ANGLE_RANGE` to `+KNOB_ANGLE_RANGE` radians
/// (±135°).
pub const KNOB_ANGLE_RANGE: f32 = std::f32::consts::PI * 0.75;

/// Height of the header band above the knob columns.
pub const KNOB_PANEL_HEADER: f32 = 60.0;

/// Vertical position of the first knob in each column.
pub const KNOB_FIRST_ROW_Y: f32 = 160.0;

/// Vertical distance between knobs in the same column.
pub const KNOB_ROW_SPACING: f32 = 120.0;

// *** piano *** //

/// Width of a white key on the virtual piano.
pub const PIANO_KEY_WIDTH: f32 = 60.0;

/// Height of a white key on the virtual piano.
pub const PIANO_KEY_HEIGHT: f32 = 220.0;

/// Default number of playable keys.
pub const PIANO_KEY_COUNT: usize = 6;

/// MIDI note of the leftmost key by default (C4).
pub const PIANO_START_NOTE: u8 = 60;

/// Velocity used for notes played with the pointer or the computer keyboard.
pub const POINTER_NOTE_VELOCITY: u8 = 100;

// *** canvases *** //

/// A convenience struct to allow canvas sizes to have `x` and `y` fields.
pub struct V2 {
    pub x: f32,
    pub y: f32,
}

/// Canvas size of the ambient generator.
pub const AMBIENT_CANVAS_SIZE: V2 = V2 { x: 800.0, y: 400.0 };

/// Initial canvas size of the mouse theremin, which follows the window.
pub const THEREMIN_CANVAS_SIZE: V2 = V2 { x: 1024.0, y: 768.0 };

/// Space around the canvas inside the window.
pub const CANVAS_PADDING: f32 = 40.0;
