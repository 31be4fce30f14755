//! Audio processing callback.

use super::GraphInput;
use crate::prelude::*;
use nannou_audio::Buffer;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;

/// State owned by the audio thread.
pub struct GraphModel {
    input: GraphInput,
    /// The parameter values the graph renders with, refreshed every buffer.
    values: Vec<f64>,
    gain: Arc<AtomicF64>,
}

impl GraphModel {
    pub fn new(input: GraphInput, gain: Arc<AtomicF64>) -> Self {
        let values = vec![0.0; input.parameters.capacity()];
        Self { input, values, gain }
    }
}

/// The main audio processing callback.
///
/// The graph's DSP is opaque: the buffer arrives holding whatever it rendered
/// (silence for an idle graph) and only the master gain stage runs here.
pub fn process(graph: &mut GraphModel, buffer: &mut Buffer<f64>) {
    refresh_parameters(graph);
    drain_events(graph);

    let gain = graph.gain.load(Relaxed);

    for sample in buffer.iter_mut() {
        *sample *= gain;
    }
}

fn refresh_parameters(graph: &mut GraphModel) {
    for (i, value) in graph.values.iter_mut().enumerate() {
        *value = graph.input.parameters.load(i).unwrap_or(*value);
    }
}

/// Consumes every queued event, returning how many there were.
fn drain_events(graph: &GraphModel) -> usize {
    graph.input.events.try_iter().count()
}
