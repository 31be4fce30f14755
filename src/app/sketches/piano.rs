//! The virtual piano sketch.

use super::*;
use crate::app::midi::MIDIInputListener;
use crate::app::piano::Keyboard;
use crate::app::Drawable;
use nannou::prelude::rgb8;
use tracing::warn;

const PATCH_FILE: &str = "piano.json";
const MIDI_CLIENT_NAME: &str = "sketchbook";

/// Computer keys playing the keyboard, left to right.
const COMPUTER_KEYS: [Key; 8] =
    [Key::A, Key::S, Key::D, Key::F, Key::G, Key::H, Key::J, Key::K];

pub struct Piano {
    keyboard: Keyboard,
    device: DeviceBridge,
    patch: PathBuf,
    midi_port: Option<String>,
    midi: Option<MIDIInputListener>,
    midi_sender: CCSender<[u8; 3]>,
    midi_receiver: CCReceiver<[u8; 3]>,
    midi_hint: Option<String>,
}

impl Piano {
    pub fn new(settings: &SketchSettings) -> Self {
        let (midi_sender, midi_receiver) =
            bounded_channel(MIDI_MESSAGE_QUEUE_SIZE);

        Self {
            keyboard: Keyboard::new(settings.start_note, settings.key_count),
            device: DeviceBridge::new("piano"),
            patch: settings.patches.join(PATCH_FILE),
            midi_port: settings.midi_port.clone(),
            midi: None,
            midi_sender,
            midi_receiver,
            midi_hint: None,
        }
    }

    pub const fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Where raw MIDI messages for this piano are sent.
    pub fn midi_sender(&self) -> CCSender<[u8; 3]> {
        self.midi_sender.clone()
    }

    fn connect_midi(&mut self) {
        match MIDIInputListener::connect(
            MIDI_CLIENT_NAME,
            self.midi_port.as_deref(),
            self.midi_sender(),
        ) {
            Ok(listener) => {
                self.midi_hint = None;
                self.midi = Some(listener);
            }
            Err(e) => {
                warn!("{e}; the pointer and computer keys still play");
                self.midi_hint = Some(format!(
                    "no MIDI input ({e}), play with the pointer or A-K"
                ));
            }
        }
    }
}

fn computer_key_index(key: Key) -> Option<usize> {
    COMPUTER_KEYS.iter().position(|&k| k == key)
}

impl Sketch for Piano {
    fn name(&self) -> &'static str {
        "piano"
    }

    fn canvas(&self) -> Canvas {
        let layout = self.keyboard.layout();
        Canvas::new(layout.width(), layout.height())
    }

    fn setup(&mut self) {
        let patch = self.patch.clone();
        open_device(&mut self.device, patch, DEFAULT_MASTER_VOLUME);
        self.connect_midi();
    }

    fn device(&self) -> &DeviceBridge {
        &self.device
    }

    fn device_mut(&mut self) -> &mut DeviceBridge {
        &mut self.device
    }

    /// Applies every MIDI message which arrived since the last tick, one at a
    /// time.
    fn update(&mut self, _input: &FrameInput) {
        for bytes in self.midi_receiver.try_iter() {
            self.keyboard.handle_midi(bytes, &mut self.device);
        }
    }

    fn draw(&self, draw: &Draw, canvas: &Canvas) {
        fill_canvas(draw, canvas, rgb8(200, 200, 200));
        self.keyboard.draw(draw, canvas);
    }

    fn pointer_pressed(&mut self, sample: PointerSample) {
        self.keyboard.press_at(sample.x, &mut self.device);
    }

    fn pointer_released(&mut self, _sample: PointerSample) {
        self.keyboard.release_all(&mut self.device);
    }

    fn key_pressed(&mut self, key: Key) {
        if let Some(index) = computer_key_index(key) {
            self.keyboard.press_key(index, &mut self.device);
        }
    }

    fn key_released(&mut self, key: Key) {
        if let Some(index) = computer_key_index(key) {
            self.keyboard.release_key(index, &mut self.device);
        }
    }

    fn teardown(&mut self) {
        if let Some(mut midi) = self.midi.take() {
            midi.close();
        }
    }

    fn notices(&self) -> Vec<String> {
        if let Some(midi) = &self.midi {
            return vec![format!("MIDI input: {}", midi.bound_port_name())];
        }

        self.midi_hint.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::audio::testing::MockDevice;

    fn piano() -> Piano {
        Piano::new(&SketchSettings::default())
    }

    #[test]
    fn the_canvas_fits_the_keys() {
        let canvas = piano().canvas();
        assert_eq!((canvas.width, canvas.height), (360.0, 220.0));
    }

    #[test]
    fn queued_midi_is_applied_on_the_next_tick() {
        let mut piano = piano();
        let (mock, log) = MockDevice::new(&[]);
        piano.device_mut().attach(Box::new(mock));

        let sender = piano.midi_sender();
        sender.send([144, 60, 100]).unwrap();
        sender.send([144, 62, 90]).unwrap();
        sender.send([144, 60, 0]).unwrap();

        assert_eq!(piano.keyboard().tracker().pressed_count(), 0);

        let canvas = piano.canvas();
        piano.update(&FrameInput {
            pointer: PointerSample::default(),
            canvas,
            frame: 1,
        });

        let tracker = piano.keyboard().tracker();
        assert!(!tracker.is_pressed(0));
        assert!(tracker.is_pressed(2));
        assert_eq!(log.lock().unwrap().events.len(), 3);
    }

    #[test]
    fn releasing_the_pointer_releases_every_key() {
        let mut piano = piano();
        let (mock, log) = MockDevice::new(&[]);
        piano.device_mut().attach(Box::new(mock));

        piano.pointer_pressed(PointerSample::new(90.0, 100.0, true));
        piano.key_pressed(Key::G);
        piano.pointer_released(PointerSample::new(90.0, 100.0, false));

        assert_eq!(piano.keyboard().tracker().pressed_count(), 0);
        assert_eq!(
            log.lock().unwrap().events[2..],
            [
                DeviceEvent::NoteOff { note: 61, velocity: 0 },
                DeviceEvent::NoteOff { note: 64, velocity: 0 },
            ]
        );
    }

    #[test]
    fn computer_keys_beyond_the_keyboard_do_nothing() {
        let mut piano = piano();

        piano.key_pressed(Key::K);
        piano.key_pressed(Key::Z);
        assert_eq!(piano.keyboard().tracker().pressed_count(), 0);

        piano.key_pressed(Key::A);
        piano.key_released(Key::A);
        piano.key_pressed(Key::H);
        assert!(piano.keyboard().tracker().is_pressed(5));
        assert_eq!(piano.keyboard().tracker().pressed_count(), 1);
    }
}
