//! The mouse theremin: the pointer position plays the patch directly.

use super::*;
use crate::app::params::{Category, Parameter, ParameterStore};
use nannou::prelude::hsv;
use tracing::info;

const PATCH_FILE: &str = "patch.export.json";

const X: usize = 0;
const Y: usize = 1;
const GAIN: usize = 2;

/// Background hue in degrees for a pointer at canvas height `y`.
pub fn background_hue(y: f32) -> f32 {
    (y * 0.5).clamp(0.0, 360.0)
}

/// Diameter of the centre circle for a pointer at canvas position `x`.
pub fn circle_diameter(x: f32, canvas: &Canvas) -> f32 {
    let size = canvas.width.min(canvas.height) * 0.8;
    map_f32(x, 0.0, canvas.width, 0.0, size).clamp(0.0, size)
}

pub struct Theremin {
    store: ParameterStore,
    device: DeviceBridge,
    volume: MasterVolume,
    canvas: Canvas,
    pointer: PointerSample,
    patch: PathBuf,
}

impl Theremin {
    pub fn new(settings: &SketchSettings) -> Self {
        let store = ParameterStore::new(vec![
            Parameter::new("x", 0.0, Category::Global),
            Parameter::new("y", 0.0, Category::Global),
            Parameter::new("gain", THEREMIN_UNMUTED_GAIN, Category::Global),
        ]);

        Self {
            store,
            device: DeviceBridge::new("theremin"),
            volume: MasterVolume::new(THEREMIN_UNMUTED_GAIN),
            canvas: Canvas::new(THEREMIN_CANVAS_SIZE.x, THEREMIN_CANVAS_SIZE.y),
            pointer: PointerSample::default(),
            patch: settings.patches.join(PATCH_FILE),
        }
    }

    pub const fn store(&self) -> &ParameterStore {
        &self.store
    }
}

impl Sketch for Theremin {
    fn name(&self) -> &'static str {
        "theremin"
    }

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn padding(&self) -> f32 {
        0.0
    }

    fn shows_cursor(&self) -> bool {
        false
    }

    fn setup(&mut self) {
        let patch = self.patch.clone();
        open_device(&mut self.device, patch, DEFAULT_MASTER_VOLUME);
    }

    fn device(&self) -> &DeviceBridge {
        &self.device
    }

    fn device_mut(&mut self) -> &mut DeviceBridge {
        &mut self.device
    }

    fn device_ready(&mut self) {
        self.store.seed_from(&self.device);

        if let Some(gain) = self.store.value(GAIN) {
            info!(gain, "theremin gain from device");
        }
    }

    fn update(&mut self, input: &FrameInput) {
        self.pointer = input.pointer;

        let x = f64::from(self.pointer.x / self.canvas.width);
        let y = f64::from(self.pointer.y / self.canvas.height);

        self.store.set(X, x, &mut self.device);
        self.store.set(Y, y, &mut self.device);
    }

    fn draw(&self, draw: &Draw, canvas: &Canvas) {
        let hue = background_hue(self.pointer.y);

        let (x, y) = canvas.to_window(canvas.width * 0.5, canvas.height * 0.5);
        draw.rect()
            .x_y(x, y)
            .w_h(canvas.width, canvas.height)
            .color(hsv(hue / 360.0, 1.0, 1.0));

        draw.ellipse()
            .x_y(x, y)
            .w_h(
                circle_diameter(self.pointer.x, canvas),
                circle_diameter(self.pointer.x, canvas),
            )
            .color(hsv((360.0 - hue) / 360.0, 1.0, 1.0));
    }

    fn key_pressed(&mut self, key: Key) {
        if key == Key::M {
            let muted = self.volume.toggle_mute();
            self.store.set(GAIN, self.volume.gain(), &mut self.device);
            info!(muted, "toggled mute");
        }
    }

    fn platform_event(&mut self, event: PlatformEvent) {
        let PlatformEvent::Resized { width, height } = event;
        self.canvas = Canvas::new(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::audio::testing::{DeviceLog, MockDevice};
    use std::sync::{Arc, Mutex};

    fn theremin() -> (Theremin, Arc<Mutex<DeviceLog>>) {
        let mut theremin = Theremin::new(&SketchSettings::default());
        let (mock, log) =
            MockDevice::new(&[("x", 0.0), ("y", 0.0), ("gain", 0.3)]);
        theremin.device_mut().attach(Box::new(mock));

        (theremin, log)
    }

    fn frame(theremin: &Theremin, x: f32, y: f32) -> FrameInput {
        FrameInput {
            pointer: PointerSample::new(x, y, false),
            canvas: theremin.canvas(),
            frame: 0,
        }
    }

    #[test]
    fn the_pointer_drives_x_and_y() {
        let (mut theremin, log) = theremin();

        theremin.update(&frame(&theremin, 512.0, 192.0));
        theremin.update(&frame(&theremin, 512.0, 192.0));
        theremin.update(&frame(&theremin, 2000.0, -10.0));

        assert_eq!(
            log.lock().unwrap().sets,
            vec![
                (String::from("x"), 0.5),
                (String::from("y"), 0.25),
                (String::from("x"), 1.0),
                (String::from("y"), 0.0),
            ]
        );
    }

    #[test]
    fn mute_toggles_the_gain_parameter() {
        let (mut theremin, log) = theremin();
        theremin.device_ready();
        assert_eq!(theremin.store().get("gain"), Some(0.3));

        theremin.key_pressed(Key::M);
        assert_eq!(theremin.store().get("gain"), Some(0.0));

        theremin.key_pressed(Key::M);
        assert_eq!(theremin.store().get("gain"), Some(THEREMIN_UNMUTED_GAIN));

        let sets = log.lock().unwrap().sets.clone();
        assert_eq!(sets.len(), 2);
    }

    #[test]
    fn the_canvas_follows_the_window() {
        let (mut theremin, log) = theremin();
        theremin.platform_event(PlatformEvent::Resized {
            width: 400.0,
            height: 200.0,
        });

        theremin.update(&frame(&theremin, 100.0, 50.0));

        assert_eq!(theremin.canvas(), Canvas::new(400.0, 200.0));
        assert_eq!(
            log.lock().unwrap().sets,
            vec![(String::from("x"), 0.25), (String::from("y"), 0.25)]
        );
    }

    #[test]
    fn visuals_follow_the_pointer() {
        let canvas = Canvas::new(1000.0, 500.0);

        assert!((background_hue(100.0) - 50.0).abs() < 1e-6);
        assert!((background_hue(1000.0) - 360.0).abs() < 1e-6);
        assert!((circle_diameter(500.0, &canvas) - 200.0).abs() < 1e-4);
        assert!(circle_diameter(-50.0, &canvas).abs() < 1e-6);
        assert!((circle_diameter(5000.0, &canvas) - 400.0).abs() < 1e-4);
    }
}
