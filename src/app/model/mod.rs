//! The whole app's state.

use super::args::Arguments;
use super::input::{FrameInput, PlatformEvent, PointerTracker};
use super::sketches::RenderLoop;
use super::view::view;
use super::*;
use clap::Parser;
use nannou::text::Justify;
use nannou::prelude::WindowId as Id;
use std::path::PathBuf;
use tracing::{error, info};

mod constructors;
use constructors::*;

/// The app's model, i.e. its state.
pub struct Model {
    window: Id,

    /// The running sketch.
    render_loop: RenderLoop,

    pointer: PointerTracker,
    canvas: Canvas,

    capture_dir: PathBuf,
    pub show_notices: bool,
}

impl Model {
    /// Builds the app's model.
    pub fn build(app: &App) -> Self {
        let args = Arguments::parse();
        let sketch = args.sketch.build(&args.settings());

        let canvas = sketch.canvas();
        let (width, height) = window_size(&canvas, sketch.padding());
        let title = format!("Sketchbook - {}", sketch.name());

        let window = build_window(app, width, height, &title);

        if !sketch.shows_cursor() {
            if let Some(window) = app.window(window) {
                window.set_cursor_visible(false);
            }
        }

        info!(sketch = sketch.name(), width, height, "opened window");

        Self {
            window,
            render_loop: RenderLoop::new(sketch),
            pointer: PointerTracker::new(),
            canvas,
            capture_dir: args.captures,
            show_notices: true,
        }
    }

    /// Samples the pointer and advances the sketch by one frame.
    pub fn update(&mut self, app: &App) {
        self.track_mouse(app, app.mouse.buttons.left().is_down());

        let input = FrameInput {
            pointer: self.pointer.sample(&self.canvas),
            canvas: self.canvas,
            frame: app.elapsed_frames(),
        };

        self.render_loop.tick(&input);
        self.canvas = self.render_loop.sketch().canvas();
    }

    pub fn mouse_pressed(&mut self, app: &App) {
        if !self.pointer.has_touch() {
            self.track_mouse(app, true);
            let sample = self.pointer.sample(&self.canvas);
            self.render_loop.pointer_pressed(sample);
        }
    }

    pub fn mouse_released(&mut self, app: &App) {
        if !self.pointer.has_touch() {
            self.track_mouse(app, false);
            let sample = self.pointer.sample(&self.canvas);
            self.render_loop.pointer_released(sample);
        }
    }

    pub fn touch_started(&mut self, id: u64, x: f32, y: f32) {
        if self.pointer.touch_started(id, x, y) {
            let sample = self.pointer.sample(&self.canvas);
            self.render_loop.pointer_pressed(sample);
        }
    }

    pub fn touch_moved(&mut self, id: u64, x: f32, y: f32) {
        self.pointer.touch_moved(id, x, y);
    }

    pub fn touch_ended(&mut self, id: u64) {
        let mut sample = self.pointer.sample(&self.canvas);

        if self.pointer.touch_ended(id) {
            sample.pressed = false;
            self.render_loop.pointer_released(sample);
        }
    }

    /// Passes the new window size, less padding, on to the sketch.
    pub fn resized(&mut self, width: f32, height: f32) {
        let padding = self.render_loop.sketch().padding() * 2.0;

        self.render_loop.platform_event(PlatformEvent::Resized {
            width: (width - padding).max(1.0),
            height: (height - padding).max(1.0),
        });
        self.canvas = self.render_loop.sketch().canvas();
    }

    pub fn key_pressed(&mut self, key: Key) {
        self.render_loop.key_pressed(key);
    }

    pub fn key_released(&mut self, key: Key) {
        self.render_loop.key_released(key);
    }

    /// Saves the next frame to `<captures>/<sketch>-<frame>.png`.
    pub fn capture(&self, app: &App) {
        if let Err(e) = std::fs::create_dir_all(&self.capture_dir) {
            error!("failed to create {}: {e}", self.capture_dir.display());
            return;
        }

        let path = self.capture_dir.join(format!(
            "{}-{}.png",
            self.render_loop.sketch().name(),
            app.elapsed_frames()
        ));

        if let Some(window) = app.window(self.window) {
            window.capture_frame(&path);
            info!("captured frame to {}", path.display());
        }
    }

    fn track_mouse(&mut self, app: &App, pressed: bool) {
        self.pointer.set_mouse(app.mouse.x, app.mouse.y, pressed);
    }

    /// Tears the sketch down. Only the first call has any effect.
    pub fn teardown(&mut self) {
        self.render_loop.teardown();
    }
}

impl Drawable for Model {
    fn draw(&self, draw: &Draw, window: &Canvas) {
        self.render_loop.draw(draw, &self.canvas);

        if !self.show_notices {
            return;
        }

        let notices = self.render_loop.notices();

        if notices.is_empty() {
            return;
        }

        let (x, y) = window.to_window(window.width * 0.5, window.height - 16.0);
        draw.text(&notices.join("\n"))
            .x_y(x, y)
            .w_h(window.width, 24.0)
            .justify(Justify::Center)
            .font_size(12)
            .color(rgb8(220, 120, 120));
    }
}
