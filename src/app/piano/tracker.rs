//! Per-key pressed state.

use crate::app::midi::MIDIEventRouter;

/// One key of the virtual piano.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PianoKey {
    pub index: usize,
    pub midi_note: u8,
    pub pressed: bool,
}

/// The pressed state of every key. This is what the piano highlights, and
/// what decides which note offs a release sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteLifecycleTracker {
    keys: Vec<PianoKey>,
}

impl NoteLifecycleTracker {
    /// One released key for every key `router` maps to.
    pub fn new(router: &MIDIEventRouter) -> Self {
        let keys = (0..router.key_count())
            .map_while(|index| {
                router.note_for_key(index).map(|midi_note| PianoKey {
                    index,
                    midi_note,
                    pressed: false,
                })
            })
            .collect();

        Self { keys }
    }

    pub fn keys(&self) -> &[PianoKey] {
        &self.keys
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.keys.get(index).is_some_and(|k| k.pressed)
    }

    pub fn pressed_count(&self) -> usize {
        self.keys.iter().filter(|k| k.pressed).count()
    }

    /// Marks the key at `index` pressed. Returns whether its state changed.
    pub fn note_on(&mut self, index: usize) -> bool {
        self.set_pressed(index, true)
    }

    /// Marks the key at `index` released. Returns whether its state changed.
    pub fn note_off(&mut self, index: usize) -> bool {
        self.set_pressed(index, false)
    }

    /// Releases every pressed key, returning the keys which were pressed.
    pub fn release_all(&mut self) -> Vec<PianoKey> {
        let mut released = Vec::new();

        for key in self.keys.iter_mut().filter(|k| k.pressed) {
            released.push(*key);
            key.pressed = false;
        }

        released
    }

    fn set_pressed(&mut self, index: usize, pressed: bool) -> bool {
        let Some(key) = self.keys.get_mut(index) else {
            return false;
        };

        let changed = key.pressed != pressed;
        key.pressed = pressed;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> NoteLifecycleTracker {
        NoteLifecycleTracker::new(&MIDIEventRouter::new(60, 6))
    }

    #[test]
    fn keys_follow_the_start_note() {
        let tracker = tracker();

        assert_eq!(tracker.keys().len(), 6);
        assert_eq!(tracker.keys()[0].midi_note, 60);
        assert_eq!(tracker.keys()[5].midi_note, 65);
        assert_eq!(tracker.pressed_count(), 0);
    }

    #[test]
    fn keys_stop_at_the_top_of_the_midi_range() {
        let tracker = NoteLifecycleTracker::new(&MIDIEventRouter::new(125, 6));
        assert_eq!(tracker.keys().len(), 3);
    }

    #[test]
    fn note_on_is_idempotent() {
        let mut tracker = tracker();

        assert!(tracker.note_on(2));
        assert!(!tracker.note_on(2));
        assert!(tracker.is_pressed(2));
        assert_eq!(tracker.pressed_count(), 1);
    }

    #[test]
    fn note_on_then_off_leaves_the_key_released() {
        let mut tracker = tracker();

        tracker.note_on(0);
        assert!(tracker.note_off(0));
        assert!(!tracker.is_pressed(0));
        assert!(tracker.release_all().is_empty());
    }

    #[test]
    fn release_all_is_idempotent() {
        let mut tracker = tracker();
        tracker.note_on(1);
        tracker.note_on(4);

        let released: Vec<_> =
            tracker.release_all().iter().map(|k| k.index).collect();
        assert_eq!(released, vec![1, 4]);

        let after_first = tracker.clone();
        assert!(tracker.release_all().is_empty());
        assert_eq!(tracker, after_first);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut tracker = tracker();

        assert!(!tracker.note_on(6));
        assert!(!tracker.is_pressed(6));
        assert_eq!(tracker.pressed_count(), 0);
    }
}
