//! Drives a [`Sketch`] through its lifecycle.

use super::*;
use tracing::{debug, info};

/// Runs `setup` once, then one `update` per tick, and routes input hooks to
/// the sketch. Every hook is safe to call before the device has loaded.
pub struct RenderLoop {
    sketch: Box<dyn Sketch>,
    is_set_up: bool,
    is_torn_down: bool,
}

impl RenderLoop {
    pub fn new(sketch: Box<dyn Sketch>) -> Self {
        Self { sketch, is_set_up: false, is_torn_down: false }
    }

    pub fn sketch(&self) -> &dyn Sketch {
        self.sketch.as_ref()
    }

    pub const fn is_torn_down(&self) -> bool {
        self.is_torn_down
    }

    /// Advances the sketch by one frame.
    pub fn tick(&mut self, input: &FrameInput) {
        if !self.ensure_set_up() {
            return;
        }

        if let Some(LoadOutcome::Loaded) = self.sketch.device_mut().poll() {
            self.sketch.device_ready();
        }

        self.sketch.update(input);
    }

    pub fn draw(&self, draw: &Draw, canvas: &Canvas) {
        self.sketch.draw(draw, canvas);
    }

    /// A press is the user gesture the host audio output waits for, so it is
    /// resumed here before the sketch sees the press.
    pub fn pointer_pressed(&mut self, sample: PointerSample) {
        if !self.ensure_set_up() {
            return;
        }

        if self.sketch.device_mut().resume_on_gesture() {
            debug!(sketch = self.sketch.name(), "resumed audio on press");
        }

        self.sketch.pointer_pressed(sample);
    }

    pub fn pointer_released(&mut self, sample: PointerSample) {
        if self.ensure_set_up() {
            self.sketch.pointer_released(sample);
        }
    }

    pub fn key_pressed(&mut self, key: Key) {
        if self.ensure_set_up() {
            self.sketch.key_pressed(key);
        }
    }

    pub fn key_released(&mut self, key: Key) {
        if self.ensure_set_up() {
            self.sketch.key_released(key);
        }
    }

    pub fn platform_event(&mut self, event: PlatformEvent) {
        if self.ensure_set_up() {
            self.sketch.platform_event(event);
        }
    }

    /// Tears the sketch down and closes its device. Only the first call has
    /// any effect.
    pub fn teardown(&mut self) {
        if self.is_torn_down {
            return;
        }

        self.is_torn_down = true;
        self.sketch.teardown();
        self.sketch.device_mut().close();

        info!(sketch = self.sketch.name(), "torn down");
    }

    /// Hints about the device and the sketch for the user.
    pub fn notices(&self) -> Vec<String> {
        let mut notices = Vec::new();

        match self.sketch.device().status() {
            BridgeStatus::Loading => {
                notices.push(String::from("loading audio device..."));
            }
            BridgeStatus::Failed(msg) => notices.push(format!(
                "audio unavailable ({msg}), controls still respond"
            )),
            _ => {}
        }

        notices.extend(self.sketch.notices());
        notices
    }

    /// Runs setup if it has not run yet. Returns `false` once torn down.
    fn ensure_set_up(&mut self) -> bool {
        if self.is_torn_down {
            return false;
        }

        if !self.is_set_up {
            self.is_set_up = true;
            self.sketch.setup();
            info!(sketch = self.sketch.name(), "set up");
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::audio::testing::{DeviceLog, HostLog, MockDevice, MockHost};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct Calls {
        setups: usize,
        readies: usize,
        updates: usize,
        keys: Vec<Key>,
        resizes: Vec<(f32, f32)>,
        teardowns: usize,
        resumes_at_press: Vec<usize>,
    }

    struct Recorder {
        device: DeviceBridge,
        calls: Arc<Mutex<Calls>>,
        host_log: Arc<Mutex<HostLog>>,
        descriptor: Option<&'static str>,
        pending: Option<MockDevice>,
    }

    struct Harness {
        render_loop: RenderLoop,
        calls: Arc<Mutex<Calls>>,
        host_log: Arc<Mutex<HostLog>>,
        device_log: Arc<Mutex<DeviceLog>>,
    }

    fn harness(descriptor: Option<&'static str>) -> Harness {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let (host, host_log) = MockHost::new();
        let (mock, device_log) = MockDevice::new(&[]);

        let mut device = DeviceBridge::new("recorder");
        device.set_host(Box::new(host));

        let sketch = Recorder {
            device,
            calls: Arc::clone(&calls),
            host_log: Arc::clone(&host_log),
            descriptor,
            pending: Some(mock),
        };

        Harness {
            render_loop: RenderLoop::new(Box::new(sketch)),
            calls,
            host_log,
            device_log,
        }
    }

    fn input() -> FrameInput {
        FrameInput {
            pointer: PointerSample::default(),
            canvas: Canvas::new(100.0, 100.0),
            frame: 0,
        }
    }

    /// Ticks until `done` holds, failing after a few seconds.
    fn tick_until(h: &mut Harness, done: impl Fn(&Harness) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);

        while !done(h) {
            assert!(Instant::now() < deadline, "condition never held");
            h.render_loop.tick(&input());
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    impl Sketch for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn canvas(&self) -> Canvas {
            Canvas::new(100.0, 100.0)
        }

        fn setup(&mut self) {
            self.calls.lock().unwrap().setups += 1;

            let (Some(text), Some(mock)) =
                (self.descriptor, self.pending.take())
            else {
                return;
            };

            self.device.load(DescriptorSource::Inline(text.into()), |_| {
                Ok(Box::new(mock))
            });
        }

        fn device(&self) -> &DeviceBridge {
            &self.device
        }

        fn device_mut(&mut self) -> &mut DeviceBridge {
            &mut self.device
        }

        fn device_ready(&mut self) {
            self.calls.lock().unwrap().readies += 1;
        }

        fn update(&mut self, _input: &FrameInput) {
            self.calls.lock().unwrap().updates += 1;
        }

        fn draw(&self, _draw: &Draw, _canvas: &Canvas) {}

        fn pointer_pressed(&mut self, _sample: PointerSample) {
            let resumes = self.host_log.lock().unwrap().resumes;
            self.calls.lock().unwrap().resumes_at_press.push(resumes);
        }

        fn key_pressed(&mut self, key: Key) {
            self.calls.lock().unwrap().keys.push(key);
        }

        fn platform_event(&mut self, event: PlatformEvent) {
            let PlatformEvent::Resized { width, height } = event;
            self.calls.lock().unwrap().resizes.push((width, height));
        }

        fn teardown(&mut self) {
            self.calls.lock().unwrap().teardowns += 1;
        }
    }

    #[test]
    fn setup_runs_once_before_the_first_update() {
        let mut h = harness(None);

        for _ in 0..3 {
            h.render_loop.tick(&input());
        }

        let calls = h.calls.lock().unwrap();
        assert_eq!(calls.setups, 1);
        assert_eq!(calls.updates, 3);
    }

    #[test]
    fn hooks_before_the_first_tick_still_run_setup() {
        let mut h = harness(None);

        h.render_loop.key_pressed(Key::Space);
        h.render_loop.platform_event(PlatformEvent::Resized {
            width: 640.0,
            height: 480.0,
        });

        let calls = h.calls.lock().unwrap();
        assert_eq!(calls.setups, 1);
        assert_eq!(calls.keys, vec![Key::Space]);
        assert_eq!(calls.resizes, vec![(640.0, 480.0)]);
    }

    #[test]
    fn presses_resume_audio_before_the_sketch_sees_them() {
        let mut h = harness(None);

        h.render_loop.pointer_pressed(PointerSample::new(1.0, 1.0, true));
        h.render_loop.pointer_pressed(PointerSample::new(1.0, 1.0, true));

        assert_eq!(h.calls.lock().unwrap().resumes_at_press, vec![1, 1]);
        assert_eq!(h.host_log.lock().unwrap().resumes, 1);
    }

    #[test]
    fn device_ready_follows_a_load_once() {
        let mut h = harness(Some(DESCRIPTOR));

        tick_until(&mut h, |h| h.calls.lock().unwrap().readies > 0);

        for _ in 0..3 {
            h.render_loop.tick(&input());
        }

        assert_eq!(h.calls.lock().unwrap().readies, 1);
        assert!(h.render_loop.sketch().device().is_ready());
        assert!(h.render_loop.notices().is_empty());
    }

    #[test]
    fn teardown_closes_the_device_once() {
        let mut h = harness(Some(DESCRIPTOR));
        tick_until(&mut h, |h| h.render_loop.sketch().device().is_ready());

        h.render_loop.teardown();
        h.render_loop.teardown();
        let updates = h.calls.lock().unwrap().updates;
        h.render_loop.tick(&input());

        let calls = h.calls.lock().unwrap();
        assert_eq!(calls.teardowns, 1);
        assert_eq!(calls.updates, updates);
        assert_eq!(h.device_log.lock().unwrap().closes, 1);
        assert_eq!(h.host_log.lock().unwrap().closes, 1);
        assert!(h.render_loop.is_torn_down());
    }

    #[test]
    fn failed_loads_become_notices() {
        let mut h = harness(Some("{ \"desc\": {} }"));

        tick_until(&mut h, |h| {
            matches!(
                h.render_loop.sketch().device().status(),
                BridgeStatus::Failed(_)
            )
        });

        let notices = h.render_loop.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].starts_with("audio unavailable"));
        assert_eq!(h.calls.lock().unwrap().readies, 0);
    }

    const DESCRIPTOR: &str = r#"{ "desc": { "parameters": [] } }"#;
}
