//! Audio device bridging: loading processing-graph descriptors, pushing
//! normalized parameter values and events into a loaded device, and the host
//! output stream the device renders through.
//!
//! The processing graph itself is opaque. The rest of the app only sees it as
//! a store of named normalized parameters plus a sink for discrete events.

pub mod bridge;
pub mod context;
pub mod descriptor;
pub mod device;
mod error;
pub mod graph;
pub mod process;
#[cfg(test)]
pub(crate) mod testing;

pub use bridge::{BridgeStatus, DeviceBridge, LoadOutcome};
pub use context::AudioContext;
pub use descriptor::{DescriptorSource, ParameterDescriptor, PatchDescriptor};
pub use device::PatchDevice;
pub use error::{HostError, LoadError};
pub use graph::{
    GraphEvent, GraphEventKind, GraphInput, GraphLink, ParameterSlots,
};

use crate::util::clamp_unit;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Instant;

/// A discrete event for a device.
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceEvent {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    /// A message sent to one of the graph's named inports.
    Message { tag: String, payload: Vec<i32> },
}

impl Display for DeviceEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NoteOn { note, velocity } => {
                write!(f, "note #{note} ON with velocity {velocity}")
            }
            Self::NoteOff { note, velocity } => {
                write!(f, "note #{note} OFF with velocity {velocity}")
            }
            Self::Message { tag, payload } => {
                write!(f, "message \"{tag}\" {payload:?}")
            }
        }
    }
}

/// A [`DeviceEvent`] with the moment it should take effect.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledEvent {
    pub event: DeviceEvent,
    pub time: Instant,
}

impl ScheduledEvent {
    /// Schedules `event` for the current moment.
    pub fn now(event: DeviceEvent) -> Self {
        Self { event, time: Instant::now() }
    }
}

/// A loaded, running processing-graph instance.
///
/// All methods are fire-and-forget; unknown names are silently ignored.
pub trait AudioDevice: Send {
    fn normalized_value(&self, name: &str) -> Option<f64>;
    fn set_normalized_value(&mut self, name: &str, value: f64);
    fn schedule_event(&mut self, event: ScheduledEvent);
    /// Releases the device. Calling this more than once has no extra effect.
    fn close(&mut self);
}

/// Whether the host audio subsystem is producing output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostState {
    /// Built but waiting for a user gesture before it may start.
    Suspended,
    Running,
    Closed,
}

/// The platform audio output a device renders through.
pub trait AudioHost {
    fn state(&self) -> HostState;
    fn resume(&mut self) -> Result<(), HostError>;
    /// Sets the master output gain.
    fn set_gain(&mut self, gain: f64);
    fn close(&mut self);
}

// *** *** *** //

/// A volume control with a mute switch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MasterVolume {
    volume: f64,
    muted: bool,
}

impl MasterVolume {
    pub fn new(volume: f64) -> Self {
        Self { volume: clamp_unit(volume), muted: false }
    }

    pub const fn volume(&self) -> f64 {
        self.volume
    }

    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flips the mute switch, returning whether it is now muted.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = clamp_unit(volume);
    }

    pub fn step(&mut self, delta: f64) {
        self.set_volume(self.volume + delta);
    }

    /// The gain which should actually be applied.
    pub fn gain(&self) -> f64 {
        if self.muted {
            0.0
        }
        else {
            self.volume
        }
    }
}
