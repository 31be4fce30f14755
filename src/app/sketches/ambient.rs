//! The ambient generator: a knob panel over the IDM5r patch.

use super::*;
use crate::app::controls::KnobPanel;
use crate::app::params::{Category, Parameter, ParameterStore};
use crate::app::Drawable;
use nannou::prelude::rgb8;
use tracing::{debug, info};

const PATCH_FILE: &str = "idm5r.json";

/// The generator's parameters, in panel order.
fn parameters() -> Vec<Parameter> {
    vec![
        Parameter::new("interval", 0.5, Category::Global),
        Parameter::new("pitch_dupe", 0.5, Category::Pitch),
        Parameter::new("transpose_dupe", 0.5, Category::Pitch),
        Parameter::new("filter_dupe", 0.5, Category::Filter),
        Parameter::new("filter_divider", 0.5, Category::Filter),
        Parameter::new("regen", 0.5, Category::Delay),
        Parameter::new("mix", 0.45, Category::Delay),
    ]
}

pub struct Ambient {
    canvas: Canvas,
    panel: KnobPanel,
    device: DeviceBridge,
    volume: MasterVolume,
    patch: PathBuf,
}

impl Ambient {
    pub fn new(settings: &SketchSettings) -> Self {
        Self {
            canvas: Canvas::new(AMBIENT_CANVAS_SIZE.x, AMBIENT_CANVAS_SIZE.y),
            panel: KnobPanel::new(
                ParameterStore::new(parameters()),
                AMBIENT_CANVAS_SIZE.x,
            ),
            device: DeviceBridge::new("ambient"),
            volume: MasterVolume::new(DEFAULT_MASTER_VOLUME),
            patch: settings.patches.join(PATCH_FILE),
        }
    }

    pub const fn panel(&self) -> &KnobPanel {
        &self.panel
    }

    pub const fn volume(&self) -> &MasterVolume {
        &self.volume
    }

    /// Schedules the patch's `run` message.
    pub fn trigger_run(&mut self) {
        if !self.device.is_ready() {
            debug!("ignoring run trigger before the device is ready");
            return;
        }

        self.device.schedule_event(DeviceEvent::Message {
            tag: String::from("run"),
            payload: vec![1],
        });
    }

    fn apply_volume(&mut self) {
        self.device.set_master_gain(self.volume.gain());
    }

    fn volume_label(&self) -> String {
        if self.volume.is_muted() {
            String::from("muted")
        }
        else {
            format!("volume {:.2}", self.volume.volume())
        }
    }
}

impl Sketch for Ambient {
    fn name(&self) -> &'static str {
        "ambient"
    }

    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn setup(&mut self) {
        open_device(&mut self.device, self.patch.clone(), self.volume.gain());
    }

    fn device(&self) -> &DeviceBridge {
        &self.device
    }

    fn device_mut(&mut self) -> &mut DeviceBridge {
        &mut self.device
    }

    fn device_ready(&mut self) {
        let seeded = self.panel.seed_from(&self.device);
        info!(seeded, "seeded knobs from device");
    }

    fn update(&mut self, input: &FrameInput) {
        self.panel.tick(input.pointer, &mut self.device);
    }

    fn draw(&self, draw: &Draw, canvas: &Canvas) {
        fill_canvas(draw, canvas, rgb8(30, 30, 30));
        self.panel.draw(draw, canvas);

        let (x, y) = canvas.to_window(canvas.width - 80.0, 30.0);
        draw.text(&self.volume_label())
            .x_y(x, y)
            .w_h(140.0, 20.0)
            .font_size(12)
            .color(rgb8(200, 200, 200));
    }

    fn platform_event(&mut self, event: PlatformEvent) {
        let PlatformEvent::Resized { width, height } = event;
        self.canvas = Canvas::new(width, height);
        self.panel.resize(width);
    }

    fn key_pressed(&mut self, key: Key) {
        match key {
            Key::Space => self.trigger_run(),
            Key::M => {
                let muted = self.volume.toggle_mute();
                self.apply_volume();
                info!(muted, "toggled mute");
            }
            Key::Up => {
                self.volume.step(VOLUME_STEP);
                self.apply_volume();
            }
            Key::Down => {
                self.volume.step(-VOLUME_STEP);
                self.apply_volume();
            }
            _ => {}
        }
    }
}
