//! Per-tick pointer state and platform events, in canvas coordinates.
//!
//! Canvas coordinates have their origin at the top-left corner of the canvas
//! and grow rightward and downward. Window coordinates (as nannou reports
//! them) have their origin at the centre of the window and grow upward. The
//! canvas is always centred in the window.

/// One pointer reading for a render tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub pressed: bool,
}

impl PointerSample {
    pub const fn new(x: f32, y: f32, pressed: bool) -> Self {
        Self { x, y, pressed }
    }
}

/// The drawing surface of a sketch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Converts a window-space point into canvas space.
    pub fn from_window(&self, x: f32, y: f32) -> (f32, f32) {
        (x + self.width * 0.5, self.height * 0.5 - y)
    }

    /// Converts a canvas-space point into window space.
    pub fn to_window(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.width * 0.5, self.height * 0.5 - y)
    }
}

/// Everything a sketch receives on each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub pointer: PointerSample,
    pub canvas: Canvas,
    pub frame: u64,
}

/// Events from the platform the sketch is hosted on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlatformEvent {
    Resized { width: f32, height: f32 },
}

// *** *** *** //

#[derive(Clone, Copy, Debug)]
struct Touch {
    id: u64,
    x: f32,
    y: f32,
}

/// Merges the mouse with the first active touch point.
///
/// While a touch is active it takes precedence over the mouse. Further
/// touches are ignored until the first one ends.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    mouse_x: f32,
    mouse_y: f32,
    mouse_pressed: bool,
    touch: Option<Touch>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the mouse position and button state, in window space.
    pub fn set_mouse(&mut self, x: f32, y: f32, pressed: bool) {
        self.mouse_x = x;
        self.mouse_y = y;
        self.mouse_pressed = pressed;
    }

    /// Returns `true` if the touch became the tracked one.
    pub fn touch_started(&mut self, id: u64, x: f32, y: f32) -> bool {
        if self.touch.is_some() {
            return false;
        }

        self.touch = Some(Touch { id, x, y });
        true
    }

    pub fn touch_moved(&mut self, id: u64, x: f32, y: f32) {
        if let Some(touch) = self.touch.as_mut() {
            if touch.id == id {
                touch.x = x;
                touch.y = y;
            }
        }
    }

    /// Returns `true` if the tracked touch ended.
    pub fn touch_ended(&mut self, id: u64) -> bool {
        if self.touch.is_some_and(|t| t.id == id) {
            self.touch = None;
            return true;
        }

        false
    }

    pub const fn has_touch(&self) -> bool {
        self.touch.is_some()
    }

    /// The current pointer, in the space of `canvas`.
    pub fn sample(&self, canvas: &Canvas) -> PointerSample {
        let (x, y, pressed) = match self.touch {
            Some(touch) => (touch.x, touch.y, true),
            None => (self.mouse_x, self.mouse_y, self.mouse_pressed),
        };

        let (x, y) = canvas.from_window(x, y);
        PointerSample { x, y, pressed }
    }
}
