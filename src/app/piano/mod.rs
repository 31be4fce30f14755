//! The virtual piano: key state, key geometry, and note routing to a device.

mod tracker;

pub use tracker::{NoteLifecycleTracker, PianoKey};

use super::audio::{DeviceBridge, DeviceEvent};
use super::input::Canvas;
use super::midi::{KeyEvent, MIDIEventRouter};
use super::Drawable;
use crate::prelude::*;
use nannou::prelude::{rgb8, Draw, BLACK};
use tracing::debug;

/// Fixed-width white keys laid out left to right from the canvas origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyboardLayout {
    key_width: f32,
    key_height: f32,
    key_count: usize,
}

impl KeyboardLayout {
    pub const fn new(key_count: usize) -> Self {
        Self {
            key_width: PIANO_KEY_WIDTH,
            key_height: PIANO_KEY_HEIGHT,
            key_count,
        }
    }

    pub fn width(&self) -> f32 {
        self.key_width * self.key_count as f32
    }

    pub const fn height(&self) -> f32 {
        self.key_height
    }

    /// The key whose rectangle strictly contains the horizontal position `x`.
    /// Key edges belong to neither key.
    pub fn key_at(&self, x: f32) -> Option<usize> {
        (0..self.key_count).find(|&i| {
            let left = self.key_width * i as f32;
            x > left && x < left + self.key_width
        })
    }

    /// Left edge, width and height of each decorative black key.
    fn black_keys(&self) -> impl Iterator<Item = (f32, f32, f32)> + '_ {
        (0..self.key_count / 2).map(move |i| {
            (
                self.key_width.mul_add(i as f32, 40.0),
                self.key_width * 0.6,
                self.key_height * 0.6,
            )
        })
    }
}

// *** *** *** //

/// A piano keyboard fed by MIDI input, pointer presses and computer keys.
///
/// Every note event updates the [`NoteLifecycleTracker`] before it is sent
/// to the device, so a drawn key is never ahead of what the device heard.
pub struct Keyboard {
    router: MIDIEventRouter,
    tracker: NoteLifecycleTracker,
    layout: KeyboardLayout,
}

impl Keyboard {
    /// A keyboard of `key_count` keys from `start_note`, cut short at the top
    /// of the MIDI note range.
    pub fn new(start_note: u8, key_count: usize) -> Self {
        let key_count = key_count.min(128 - usize::from(start_note.min(127)));
        let router = MIDIEventRouter::new(start_note, key_count);

        Self {
            router,
            tracker: NoteLifecycleTracker::new(&router),
            layout: KeyboardLayout::new(key_count),
        }
    }

    pub const fn tracker(&self) -> &NoteLifecycleTracker {
        &self.tracker
    }

    pub const fn layout(&self) -> &KeyboardLayout {
        &self.layout
    }

    /// Applies a resolved note event: first the tracker, then the device.
    pub fn apply(&mut self, event: KeyEvent, device: &mut DeviceBridge) {
        let event = self.commit(event);
        device.schedule_event(event);
    }

    /// Updates the tracker for `event` and returns what the device should be
    /// sent. The device event only exists once the key state has changed.
    fn commit(&mut self, event: KeyEvent) -> DeviceEvent {
        match event {
            KeyEvent::NoteOn { index, note, velocity } => {
                self.tracker.note_on(index);
                DeviceEvent::NoteOn { note, velocity }
            }
            KeyEvent::NoteOff { index, note, velocity } => {
                self.tracker.note_off(index);
                DeviceEvent::NoteOff { note, velocity }
            }
        }
    }

    /// Handles one raw MIDI message.
    pub fn handle_midi(
        &mut self,
        bytes: [u8; 3],
        device: &mut DeviceBridge,
    ) -> Option<KeyEvent> {
        let event = self.router.route(bytes)?;
        self.apply(event, device);
        Some(event)
    }

    /// Plays the key under the horizontal canvas position `x`.
    pub fn press_at(
        &mut self,
        x: f32,
        device: &mut DeviceBridge,
    ) -> Option<usize> {
        let index = self.layout.key_at(x)?;
        let note = self.router.note_for_key(index)?;

        debug!(index, note, "key pressed");
        self.apply(
            KeyEvent::NoteOn { index, note, velocity: POINTER_NOTE_VELOCITY },
            device,
        );

        Some(index)
    }

    /// Plays the key at `index` unless it is already held. Returns whether a
    /// note was played.
    pub fn press_key(
        &mut self,
        index: usize,
        device: &mut DeviceBridge,
    ) -> bool {
        if self.tracker.is_pressed(index) {
            return false;
        }

        let Some(note) = self.router.note_for_key(index) else {
            return false;
        };

        self.apply(
            KeyEvent::NoteOn { index, note, velocity: POINTER_NOTE_VELOCITY },
            device,
        );
        true
    }

    /// Releases the key at `index` if it is held.
    pub fn release_key(
        &mut self,
        index: usize,
        device: &mut DeviceBridge,
    ) -> bool {
        if !self.tracker.is_pressed(index) {
            return false;
        }

        let Some(note) = self.router.note_for_key(index) else {
            return false;
        };

        self.apply(KeyEvent::NoteOff { index, note, velocity: 0 }, device);
        true
    }

    /// Releases every held key, sending a note off for each. Returns how many
    /// keys were released.
    pub fn release_all(&mut self, device: &mut DeviceBridge) -> usize {
        let released = self.tracker.release_all();

        for key in &released {
            device.schedule_event(DeviceEvent::NoteOff {
                note: key.midi_note,
                velocity: 0,
            });
        }

        released.len()
    }
}

impl Drawable for Keyboard {
    fn draw(&self, draw: &Draw, canvas: &Canvas) {
        let w = self.layout.key_width;
        let h = self.layout.key_height;

        for key in self.tracker.keys() {
            let color = if key.pressed {
                rgb8(255, 255, 150)
            }
            else {
                rgb8(255, 255, 255)
            };

            let (x, y) =
                canvas.to_window(w.mul_add(key.index as f32, w * 0.5), h * 0.5);
            draw.rect()
                .x_y(x, y)
                .w_h(w, h)
                .color(color)
                .stroke_color(BLACK)
                .stroke_weight(1.0);
        }

        for (left, bw, bh) in self.layout.black_keys() {
            let (x, y) = canvas.to_window(left + bw * 0.5, bh * 0.5);
            draw.rect().x_y(x, y).w_h(bw, bh).color(BLACK);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::audio::testing::{DeviceLog, MockDevice};
    use std::sync::{Arc, Mutex};

    fn setup() -> (Keyboard, DeviceBridge, Arc<Mutex<DeviceLog>>) {
        let (mock, log) = MockDevice::new(&[]);
        let mut device = DeviceBridge::new("piano");
        device.attach(Box::new(mock));

        (Keyboard::new(60, 6), device, log)
    }

    #[test]
    fn keys_are_found_strictly_inside_their_rectangles() {
        let layout = KeyboardLayout::new(6);

        assert_eq!(layout.key_at(30.0), Some(0));
        assert_eq!(layout.key_at(61.0), Some(1));
        assert_eq!(layout.key_at(60.0), None);
        assert_eq!(layout.key_at(0.0), None);
        assert_eq!(layout.key_at(359.0), Some(5));
        assert_eq!(layout.key_at(400.0), None);
    }

    #[test]
    fn black_keys_follow_the_white_keys() {
        let layout = KeyboardLayout::new(6);
        let lefts: Vec<f32> = layout.black_keys().map(|(l, ..)| l).collect();

        assert_eq!(lefts, vec![40.0, 100.0, 160.0]);
    }

    #[test]
    fn midi_note_on_presses_the_key_and_reaches_the_device() {
        let (mut keyboard, mut device, log) = setup();

        let event = keyboard.handle_midi([144, 60, 100], &mut device);

        assert_eq!(
            event,
            Some(KeyEvent::NoteOn { index: 0, note: 60, velocity: 100 })
        );
        assert!(keyboard.tracker().is_pressed(0));
        assert_eq!(
            log.lock().unwrap().events,
            vec![DeviceEvent::NoteOn { note: 60, velocity: 100 }]
        );
    }

    #[test]
    fn key_state_changes_before_the_device_event_exists() {
        let mut keyboard = Keyboard::new(60, 6);

        let on = keyboard.commit(KeyEvent::NoteOn {
            index: 2,
            note: 62,
            velocity: 80,
        });
        assert!(keyboard.tracker().is_pressed(2));
        assert_eq!(on, DeviceEvent::NoteOn { note: 62, velocity: 80 });

        let off = keyboard.commit(KeyEvent::NoteOff {
            index: 2,
            note: 62,
            velocity: 0,
        });
        assert!(!keyboard.tracker().is_pressed(2));
        assert_eq!(off, DeviceEvent::NoteOff { note: 62, velocity: 0 });
    }

    /// Whether `event` turns `midi_note` on or off, if it concerns it.
    fn note_state(event: &DeviceEvent, midi_note: u8) -> Option<bool> {
        match *event {
            DeviceEvent::NoteOn { note, .. } if note == midi_note => Some(true),
            DeviceEvent::NoteOff { note, .. } if note == midi_note => {
                Some(false)
            }
            _ => None,
        }
    }

    #[test]
    fn every_pressed_key_was_sent_to_the_device() {
        let (mut keyboard, mut device, log) = setup();
        let messages = [
            [144, 60, 100],
            [144, 62, 90],
            [128, 60, 0],
            [144, 70, 100],
            [144, 65, 30],
            [144, 62, 0],
            [144, 60, 64],
            [128, 65, 10],
        ];

        for bytes in messages {
            keyboard.handle_midi(bytes, &mut device);

            let log = log.lock().unwrap();
            for key in keyboard.tracker().keys() {
                let last = log
                    .events
                    .iter()
                    .rev()
                    .find_map(|e| note_state(e, key.midi_note));

                assert_eq!(last.unwrap_or(false), key.pressed, "{key:?}");
            }
        }
    }

    #[test]
    fn midi_zero_velocity_releases_the_key() {
        let (mut keyboard, mut device, log) = setup();

        keyboard.handle_midi([144, 60, 100], &mut device);
        keyboard.handle_midi([144, 60, 0], &mut device);

        assert!(!keyboard.tracker().is_pressed(0));
        assert_eq!(
            log.lock().unwrap().events.last(),
            Some(&DeviceEvent::NoteOff { note: 60, velocity: 0 })
        );
    }

    #[test]
    fn out_of_range_notes_change_nothing() {
        let (mut keyboard, mut device, log) = setup();

        assert_eq!(keyboard.handle_midi([144, 72, 100], &mut device), None);
        assert_eq!(keyboard.handle_midi([176, 60, 100], &mut device), None);

        assert_eq!(keyboard.tracker().pressed_count(), 0);
        assert!(log.lock().unwrap().events.is_empty());
    }

    #[test]
    fn pointer_presses_use_the_fixed_velocity() {
        let (mut keyboard, mut device, log) = setup();

        assert_eq!(keyboard.press_at(150.0, &mut device), Some(2));
        assert_eq!(keyboard.press_at(-5.0, &mut device), None);

        assert!(keyboard.tracker().is_pressed(2));
        assert_eq!(
            log.lock().unwrap().events,
            vec![DeviceEvent::NoteOn {
                note: 62,
                velocity: POINTER_NOTE_VELOCITY
            }]
        );
    }

    #[test]
    fn release_all_sends_one_note_off_per_held_key() {
        let (mut keyboard, mut device, log) = setup();

        keyboard.press_at(30.0, &mut device);
        keyboard.handle_midi([144, 63, 90], &mut device);

        assert_eq!(keyboard.release_all(&mut device), 2);
        assert_eq!(keyboard.release_all(&mut device), 0);
        assert_eq!(keyboard.tracker().pressed_count(), 0);

        let log = log.lock().unwrap();
        let offs: Vec<_> = log
            .events
            .iter()
            .filter(|e| matches!(e, DeviceEvent::NoteOff { .. }))
            .collect();
        assert_eq!(offs.len(), 2);
    }

    #[test]
    fn held_computer_keys_do_not_retrigger() {
        let (mut keyboard, mut device, log) = setup();

        assert!(keyboard.press_key(3, &mut device));
        assert!(!keyboard.press_key(3, &mut device));
        assert!(keyboard.release_key(3, &mut device));
        assert!(!keyboard.release_key(3, &mut device));

        assert_eq!(log.lock().unwrap().events.len(), 2);
    }

    #[test]
    fn keys_without_a_device_still_light_up() {
        let mut keyboard = Keyboard::new(60, 6);
        let mut device = DeviceBridge::new("piano");

        keyboard.handle_midi([144, 61, 80], &mut device);
        assert!(keyboard.tracker().is_pressed(1));
    }

    #[test]
    fn the_keyboard_is_cut_short_at_the_top_note() {
        let keyboard = Keyboard::new(126, 6);

        assert_eq!(keyboard.tracker().keys().len(), 2);
        assert_eq!(keyboard.layout().key_at(100.0), Some(1));
        assert_eq!(keyboard.layout().key_at(130.0), None);
    }
}
