//! All app-related state and logic.

use input::Canvas;
use nannou::prelude::*;
use nannou::LoopMode::RefreshSync;

pub mod args;
pub mod audio;
pub mod controls;
pub mod events;
pub mod input;
pub mod keys;
pub mod midi;
mod model;
pub mod params;
pub mod piano;
pub mod sketches;
pub mod update;
pub mod view;

pub use model::Model;
pub use params::*;
use update::update;

/// Runs the app via Nannou.
pub fn run_app() {
    nannou::app(model::Model::build)
        .loop_mode(RefreshSync)
        .update(update)
        .exit(exit)
        .run();
}

/// Called once when the app shuts down; tears the running sketch down.
fn exit(_app: &App, mut model: Model) {
    model.teardown();
}

/// Anything which can render itself onto a canvas.
pub trait Drawable {
    fn draw(&self, draw: &Draw, canvas: &Canvas);
}
