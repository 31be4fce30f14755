//! The concrete device built from a [`PatchDescriptor`].

use super::*;
use crate::prelude::*;
use std::collections::HashMap;
use tracing::trace;

/// A loaded processing-graph instance.
pub struct PatchDevice {
    descriptor: PatchDescriptor,
    values: Vec<f64>,
    lookup: HashMap<String, usize>,
    link: GraphLink,
    closed: bool,
}

impl PatchDevice {
    /// Instantiates a device for `descriptor`, rendering through `link`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Instantiate`] if the descriptor declares the same
    /// parameter twice, declares more parameters than `link` has slots for,
    /// or needs more output channels than the host has.
    pub fn instantiate(
        descriptor: PatchDescriptor,
        link: GraphLink,
    ) -> Result<Self, LoadError> {
        if descriptor.num_output_channels > NUM_CHANNELS {
            return Err(LoadError::Instantiate(format!(
                "graph needs {} output channels, host has {NUM_CHANNELS}",
                descriptor.num_output_channels
            )));
        }

        if descriptor.parameters.len() > link.parameter_capacity() {
            return Err(LoadError::Instantiate(format!(
                "graph declares {} parameters, host has room for {}",
                descriptor.parameters.len(),
                link.parameter_capacity()
            )));
        }

        let mut lookup = HashMap::with_capacity(descriptor.parameters.len());

        for (i, param) in descriptor.parameters.iter().enumerate() {
            if lookup.insert(param.param_id.clone(), i).is_some() {
                return Err(LoadError::Instantiate(format!(
                    "parameter \"{}\" is declared more than once",
                    param.param_id
                )));
            }
        }

        let values: Vec<f64> = descriptor
            .parameters
            .iter()
            .map(ParameterDescriptor::initial_normalized)
            .collect();

        for (index, &value) in values.iter().enumerate() {
            link.set_parameter(index, value);
        }

        Ok(Self { descriptor, values, lookup, link, closed: false })
    }
}

impl AudioDevice for PatchDevice {
    fn normalized_value(&self, name: &str) -> Option<f64> {
        self.lookup.get(name).map(|&i| self.values[i])
    }

    fn set_normalized_value(&mut self, name: &str, value: f64) {
        if self.closed {
            return;
        }

        let Some(&index) = self.lookup.get(name) else {
            trace!(name, "ignoring unknown parameter");
            return;
        };

        let value = clamp_unit(value);
        self.values[index] = value;
        self.link.set_parameter(index, value);
    }

    fn schedule_event(&mut self, event: ScheduledEvent) {
        if self.closed {
            return;
        }

        let kind = match &event.event {
            DeviceEvent::NoteOn { note, velocity } => {
                GraphEventKind::NoteOn { note: *note, velocity: *velocity }
            }
            DeviceEvent::NoteOff { note, velocity } => {
                GraphEventKind::NoteOff { note: *note, velocity: *velocity }
            }
            DeviceEvent::Message { tag, payload } => {
                let Some(inport) = self.descriptor.inport_index(tag) else {
                    trace!(event = %event.event, "dropping unknown inport");
                    return;
                };

                if payload.len() > MAX_EVENT_PAYLOAD {
                    trace!(event = %event.event, "truncating payload");
                }

                GraphEventKind::message(inport, payload)
            }
        };

        self.link.send_event(GraphEvent { kind, time: event.time });
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
