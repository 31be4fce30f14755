//! The interactive sketches and the loop that drives them.

mod ambient;
mod piano;
mod render_loop;
mod theremin;

pub use ambient::Ambient;
pub use piano::Piano;
pub use render_loop::RenderLoop;
pub use theremin::Theremin;

use super::audio::*;
use super::input::{Canvas, FrameInput, PlatformEvent, PointerSample};
use crate::prelude::*;
use nannou::prelude::{Draw, Key, Rgb8};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use tracing::error;

/// One interactive sketch, driven by a [`RenderLoop`].
///
/// All positions a sketch receives are in its own canvas coordinates.
pub trait Sketch {
    fn name(&self) -> &'static str;

    /// The current size of the canvas.
    fn canvas(&self) -> Canvas;

    /// Space around the canvas inside the window.
    fn padding(&self) -> f32 {
        CANVAS_PADDING
    }

    fn shows_cursor(&self) -> bool {
        true
    }

    /// Runs once, before anything else.
    fn setup(&mut self);

    fn device(&self) -> &DeviceBridge;
    fn device_mut(&mut self) -> &mut DeviceBridge;

    /// Called once the device has loaded.
    fn device_ready(&mut self) {}

    fn update(&mut self, input: &FrameInput);
    fn draw(&self, draw: &Draw, canvas: &Canvas);

    fn pointer_pressed(&mut self, _sample: PointerSample) {}
    fn pointer_released(&mut self, _sample: PointerSample) {}
    fn key_pressed(&mut self, _key: Key) {}
    fn key_released(&mut self, _key: Key) {}
    fn platform_event(&mut self, _event: PlatformEvent) {}

    /// Releases anything other than the device, which the loop closes.
    fn teardown(&mut self) {}

    /// Non-blocking hints to show the user.
    fn notices(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Which sketch to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SketchKind {
    /// Knob panel over the IDM5r ambient patch.
    #[default]
    Ambient,
    /// A small keyboard played with MIDI, the pointer or the computer keys.
    Piano,
    /// Pointer-controlled theremin.
    Theremin,
}

impl SketchKind {
    pub fn build(self, settings: &SketchSettings) -> Box<dyn Sketch> {
        match self {
            Self::Ambient => Box::new(Ambient::new(settings)),
            Self::Piano => Box::new(Piano::new(settings)),
            Self::Theremin => Box::new(Theremin::new(settings)),
        }
    }
}

impl Display for SketchKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Ambient => write!(f, "ambient"),
            Self::Piano => write!(f, "piano"),
            Self::Theremin => write!(f, "theremin"),
        }
    }
}

/// Options shared by all sketches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SketchSettings {
    /// Directory holding the device descriptors.
    pub patches: PathBuf,
    /// Substring of the MIDI input port to bind to.
    pub midi_port: Option<String>,
    pub start_note: u8,
    pub key_count: usize,
}

impl Default for SketchSettings {
    fn default() -> Self {
        Self {
            patches: PathBuf::from("patches"),
            midi_port: None,
            start_note: PIANO_START_NOTE,
            key_count: PIANO_KEY_COUNT,
        }
    }
}

/// Opens the host audio output for `bridge` and starts loading the device
/// described by `patch`.
///
/// If the output cannot be opened the device still loads, so its values can
/// seed the interface, but nothing is heard.
pub fn open_device(bridge: &mut DeviceBridge, patch: PathBuf, gain: f64) {
    let link = match AudioContext::new(gain) {
        Ok(context) => {
            let link = context.graph_link();
            bridge.set_host(Box::new(context));
            link
        }
        Err(e) => {
            error!(bridge = bridge.name(), "{e}");
            GraphLink::new(MAX_GRAPH_PARAMETERS, 1).0
        }
    };

    bridge.load(DescriptorSource::File(patch), move |descriptor| {
        let device = PatchDevice::instantiate(descriptor, link)?;
        Ok(Box::new(device) as Box<dyn AudioDevice>)
    });
}

/// Fills the whole canvas with `color`.
pub fn fill_canvas(draw: &Draw, canvas: &Canvas, color: Rgb8) {
    let (x, y) = canvas.to_window(canvas.width * 0.5, canvas.height * 0.5);
    draw.rect().x_y(x, y).w_h(canvas.width, canvas.height).color(color);
}
