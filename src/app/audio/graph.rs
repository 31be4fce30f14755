//! The link between a device on the main thread and its processing graph on
//! the audio thread.
//!
//! Parameter values are shared through one atomic slot per parameter, so the
//! graph always reads the latest value no matter how long the stream has been
//! suspended. Discrete events go through a bounded queue and carry no heap
//! data.

use crate::prelude::*;
use crossbeam_channel::TrySendError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::Arc;
use std::time::Instant;
use tracing::{trace, warn};

/// The latest normalized value of every parameter of a graph.
#[derive(Debug)]
pub struct ParameterSlots {
    values: Vec<AtomicF64>,
}

impl ParameterSlots {
    pub fn new(capacity: usize) -> Self {
        Self { values: (0..capacity).map(|_| AtomicF64::new(0.0)).collect() }
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Stores `value` in slot `index`. Out-of-range indices are ignored.
    pub fn store(&self, index: usize, value: f64) {
        if let Some(slot) = self.values.get(index) {
            slot.store(value, Relaxed);
        }
    }

    pub fn load(&self, index: usize) -> Option<f64> {
        self.values.get(index).map(|slot| slot.load(Relaxed))
    }
}

// *** *** *** //

/// What a [`GraphEvent`] does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphEventKind {
    NoteOn {
        note: u8,
        velocity: u8,
    },
    NoteOff {
        note: u8,
        velocity: u8,
    },
    /// A message to the inport at index `inport`. Only the first `len`
    /// entries of `payload` are meaningful.
    Message {
        inport: usize,
        payload: [i32; MAX_EVENT_PAYLOAD],
        len: usize,
    },
}

/// A discrete event for the audio thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphEvent {
    pub kind: GraphEventKind,
    pub time: Instant,
}

impl GraphEventKind {
    /// A message event, keeping at most [`MAX_EVENT_PAYLOAD`] values.
    pub fn message(inport: usize, values: &[i32]) -> Self {
        let len = values.len().min(MAX_EVENT_PAYLOAD);
        let mut payload = [0; MAX_EVENT_PAYLOAD];
        payload[..len].copy_from_slice(&values[..len]);

        Self::Message { inport, payload, len }
    }
}

// *** *** *** //

/// The main-thread half of a graph link.
#[derive(Clone, Debug)]
pub struct GraphLink {
    parameters: Arc<ParameterSlots>,
    events: CCSender<GraphEvent>,
    overflowing: Arc<AtomicBool>,
}

/// The audio-thread half of a graph link.
#[derive(Debug)]
pub struct GraphInput {
    pub parameters: Arc<ParameterSlots>,
    pub events: CCReceiver<GraphEvent>,
}

impl GraphLink {
    /// Returns a link with `parameter_slots` parameter slots and room for
    /// `event_capacity` queued events, plus the half the audio thread reads.
    pub fn new(
        parameter_slots: usize,
        event_capacity: usize,
    ) -> (Self, GraphInput) {
        let parameters = Arc::new(ParameterSlots::new(parameter_slots));
        let (events, receiver) = bounded_channel(event_capacity);

        let link = Self {
            parameters: Arc::clone(&parameters),
            events,
            overflowing: Arc::new(AtomicBool::new(false)),
        };

        (link, GraphInput { parameters, events: receiver })
    }

    /// How many parameters the graph can hold.
    pub fn parameter_capacity(&self) -> usize {
        self.parameters.capacity()
    }

    pub fn set_parameter(&self, index: usize, value: f64) {
        self.parameters.store(index, value);
    }

    /// Queues `event` without blocking. A full queue drops it, and only the
    /// first drop of a run is logged.
    pub fn send_event(&self, event: GraphEvent) {
        match self.events.try_send(event) {
            Ok(()) => self.overflowing.store(false, Relaxed),
            Err(TrySendError::Full(_)) => {
                if !self.overflowing.swap(true, Relaxed) {
                    warn!("graph event queue is full, dropping events");
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                trace!("audio stream is gone, dropping graph event");
            }
        }
    }
}
