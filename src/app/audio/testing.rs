//! Recording doubles for [`AudioDevice`] and [`AudioHost`].

use super::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Everything a [`MockDevice`] was asked to do.
#[derive(Debug, Default)]
pub struct DeviceLog {
    pub sets: Vec<(String, f64)>,
    pub events: Vec<DeviceEvent>,
    pub closes: usize,
}

pub struct MockDevice {
    values: HashMap<String, f64>,
    log: Arc<Mutex<DeviceLog>>,
}

impl MockDevice {
    pub fn new(values: &[(&str, f64)]) -> (Self, Arc<Mutex<DeviceLog>>) {
        let log = Arc::new(Mutex::new(DeviceLog::default()));
        let values =
            values.iter().map(|&(name, v)| (name.to_string(), v)).collect();

        (Self { values, log: Arc::clone(&log) }, log)
    }
}

impl AudioDevice for MockDevice {
    fn normalized_value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    fn set_normalized_value(&mut self, name: &str, value: f64) {
        if let Some(v) = self.values.get_mut(name) {
            *v = value;
        }

        self.log.lock().unwrap().sets.push((name.to_string(), value));
    }

    fn schedule_event(&mut self, event: ScheduledEvent) {
        self.log.lock().unwrap().events.push(event.event);
    }

    fn close(&mut self) {
        self.log.lock().unwrap().closes += 1;
    }
}

/// Everything a [`MockHost`] was asked to do.
#[derive(Debug, Default)]
pub struct HostLog {
    pub resumes: usize,
    pub gains: Vec<f64>,
    pub closes: usize,
}

pub struct MockHost {
    state: HostState,
    log: Arc<Mutex<HostLog>>,
}

impl MockHost {
    /// A suspended host.
    pub fn new() -> (Self, Arc<Mutex<HostLog>>) {
        let log = Arc::new(Mutex::new(HostLog::default()));
        (Self { state: HostState::Suspended, log: Arc::clone(&log) }, log)
    }
}

impl AudioHost for MockHost {
    fn state(&self) -> HostState {
        self.state
    }

    fn resume(&mut self) -> Result<(), HostError> {
        self.state = HostState::Running;
        self.log.lock().unwrap().resumes += 1;
        Ok(())
    }

    fn set_gain(&mut self, gain: f64) {
        self.log.lock().unwrap().gains.push(gain);
    }

    fn close(&mut self) {
        self.state = HostState::Closed;
        self.log.lock().unwrap().closes += 1;
    }
}
