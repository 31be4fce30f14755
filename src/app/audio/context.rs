//! The host audio output.

use super::process::{process, GraphModel};
use super::*;
use crate::prelude::*;
use nannou_audio::Stream;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The platform output stream every device renders through.
///
/// The stream is built paused; it only starts once [`AudioHost::resume()`]
/// is called in response to a user gesture.
pub struct AudioContext {
    stream: Option<Stream<GraphModel>>,
    state: HostState,
    gain: Arc<AtomicF64>,
    link: GraphLink,
}

impl AudioContext {
    /// Builds the output stream, initially suspended, with master gain set to
    /// `gain`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Build`] if the platform refuses to open an output
    /// stream.
    pub fn new(gain: f64) -> Result<Self, HostError> {
        let gain = Arc::new(AtomicF64::new(clamp_unit(gain)));
        let (link, input) =
            GraphLink::new(MAX_GRAPH_PARAMETERS, GRAPH_EVENT_QUEUE_SIZE);
        let model = GraphModel::new(input, Arc::clone(&gain));

        let stream = nannou_audio::Host::new()
            .new_output_stream(model)
            .render(process)
            .channels(NUM_CHANNELS)
            .sample_rate(SAMPLE_RATE)
            .frames_per_buffer(BUFFER_SIZE)
            .build()
            .map_err(|e| HostError::Build(format!("{e:?}")))?;

        if let Err(e) = stream.pause() {
            warn!("failed to suspend new output stream: {e:?}");
        }

        debug!(
            sample_rate = SAMPLE_RATE,
            buffer_size = BUFFER_SIZE,
            "built output stream"
        );

        Ok(Self {
            stream: Some(stream),
            state: HostState::Suspended,
            gain,
            link,
        })
    }

    /// A link for devices rendering through this stream.
    pub fn graph_link(&self) -> GraphLink {
        self.link.clone()
    }
}

impl AudioHost for AudioContext {
    fn state(&self) -> HostState {
        self.state
    }

    fn resume(&mut self) -> Result<(), HostError> {
        let Some(stream) = self.stream.as_ref() else {
            return Err(HostError::Resume(String::from("stream is closed")));
        };

        stream.play().map_err(|e| HostError::Resume(format!("{e:?}")))?;
        self.state = HostState::Running;
        info!("audio output resumed");

        Ok(())
    }

    fn set_gain(&mut self, gain: f64) {
        self.gain.store(clamp_unit(gain), Relaxed);
    }

    fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                warn!("failed to pause output stream on close: {e:?}");
            }
        }

        self.state = HostState::Closed;
    }
}
