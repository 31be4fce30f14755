//! The bridge between a sketch and its (possibly not yet loaded) device.

use super::*;
use crate::prelude::*;
use crossbeam_channel::{SendError, TryRecvError};
use std::thread;
use tracing::{debug, error, info, warn};

/// What instantiating a device produces.
pub type LoadResult = Result<Box<dyn AudioDevice>, LoadError>;

/// How a pending load resolved.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded,
    Failed(LoadError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
    Closed,
}

impl std::fmt::Display for BridgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Owns the device handle for one sketch.
///
/// Until a load completes there is no handle, and every push is dropped
/// without error. Loading happens on a background thread; the result is
/// picked up by [`DeviceBridge::poll()`] on the render thread.
pub struct DeviceBridge {
    name: String,
    handle: Option<Box<dyn AudioDevice>>,
    host: Option<Box<dyn AudioHost>>,
    pending: Option<CCReceiver<LoadResult>>,
    status: BridgeStatus,
}

impl DeviceBridge {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            handle: None,
            host: None,
            pending: None,
            status: BridgeStatus::Idle,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn status(&self) -> &BridgeStatus {
        &self.status
    }

    /// Whether a device handle is present.
    pub fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    /// Hands the bridge the audio output its device renders through.
    pub fn set_host(&mut self, mut host: Box<dyn AudioHost>) {
        if self.status == BridgeStatus::Closed {
            host.close();
            return;
        }

        self.host = Some(host);
    }

    /// Starts loading a device from `source` on a background thread.
    ///
    /// The descriptor is fetched and parsed there, then handed to
    /// `instantiate`. Any load still in flight is abandoned; if it finishes
    /// anyway, its device is closed straight away.
    pub fn load<F>(&mut self, source: DescriptorSource, instantiate: F)
    where
        F: FnOnce(PatchDescriptor) -> LoadResult + Send + 'static,
    {
        if self.status == BridgeStatus::Closed {
            warn!(
                bridge = self.name.as_str(),
                "ignoring load on a closed bridge"
            );
            return;
        }

        let (tx, rx) = bounded_channel(1);
        let label = source.to_string();

        let spawned = thread::Builder::new()
            .name(format!("{}-loader", self.name))
            .spawn(move || {
                let result = source
                    .fetch()
                    .and_then(|text| PatchDescriptor::parse(&text))
                    .and_then(instantiate);

                // the bridge stopped waiting, so nobody else will close it
                if let Err(SendError(Ok(mut device))) = tx.send(result) {
                    device.close();
                }
            });

        match spawned {
            Ok(_) => {
                debug!(
                    bridge = self.name.as_str(),
                    source = label.as_str(),
                    "loading device"
                );
                self.pending = Some(rx);
                self.status = BridgeStatus::Loading;
            }
            Err(e) => {
                error!(
                    bridge = self.name.as_str(),
                    "failed to spawn loader: {e}"
                );
                self.status = BridgeStatus::Failed(e.to_string());
            }
        }
    }

    /// Picks up the result of a pending load, if it has arrived. Returns
    /// `None` while nothing has resolved.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let rx = self.pending.as_ref()?;

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::Aborted(
                String::from("loader exited without a result"),
            )),
        };

        self.pending = None;

        match result {
            Ok(device) => {
                self.attach(device);
                Some(LoadOutcome::Loaded)
            }
            Err(e) => {
                error!(
                    bridge = self.name.as_str(),
                    "device failed to load: {e}"
                );
                self.status = BridgeStatus::Failed(e.to_string());
                Some(LoadOutcome::Failed(e))
            }
        }
    }

    /// Installs an instantiated device, closing any device it replaces.
    pub fn attach(&mut self, mut device: Box<dyn AudioDevice>) {
        if self.status == BridgeStatus::Closed {
            device.close();
            return;
        }

        if let Some(mut old) = self.handle.replace(device) {
            old.close();
        }

        self.status = BridgeStatus::Ready;
        info!(bridge = self.name.as_str(), "device ready");
    }

    /// The device's current value for `name`, if there is a device and it
    /// knows the name.
    pub fn normalized_value(&self, name: &str) -> Option<f64> {
        self.handle.as_ref()?.normalized_value(name)
    }

    pub fn set_normalized_value(&mut self, name: &str, value: f64) {
        if let Some(device) = self.handle.as_mut() {
            device.set_normalized_value(name, value);
        }
    }

    /// Schedules `event` on the device for the current moment.
    pub fn schedule_event(&mut self, event: DeviceEvent) {
        if let Some(device) = self.handle.as_mut() {
            device.schedule_event(ScheduledEvent::now(event));
        }
    }

    /// Resumes a suspended audio output. Must be called from a user gesture.
    /// Returns whether the output was resumed by this call.
    pub fn resume_on_gesture(&mut self) -> bool {
        let Some(host) = self.host.as_mut() else {
            return false;
        };

        if host.state() != HostState::Suspended {
            return false;
        }

        match host.resume() {
            Ok(()) => true,
            Err(e) => {
                warn!(bridge = self.name.as_str(), "{e}");
                false
            }
        }
    }

    pub fn set_master_gain(&mut self, gain: f64) {
        if let Some(host) = self.host.as_mut() {
            host.set_gain(gain);
        }
    }

    /// Closes the device and the audio output. Calling this more than once
    /// has no extra effect.
    pub fn close(&mut self) {
        if self.status == BridgeStatus::Closed {
            return;
        }

        self.pending = None;

        if let Some(mut device) = self.handle.take() {
            device.close();
        }

        if let Some(mut host) = self.host.take() {
            host.close();
        }

        self.status = BridgeStatus::Closed;
        info!(bridge = self.name.as_str(), "closed");
    }
}

impl Drop for DeviceBridge {
    fn drop(&mut self) {
        self.close();
    }
}
