use super::types::*;
use crate::app::audio::DeviceBridge;
use crate::util::clamp_unit;
use std::sync::Arc;
use tracing::trace;

/// An ordered collection of [`Parameter`]s.
///
/// Every mutation replaces the backing list copy-on-write, so a snapshot
/// taken with [`ParameterStore::snapshot()`] never changes underneath its
/// holder. Mutations are visible to the very next read.
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    params: Arc<Vec<Parameter>>,
}

impl ParameterStore {
    pub fn new(params: Vec<Parameter>) -> Self {
        let params = params
            .into_iter()
            .map(|mut p| {
                p.value = clamp_unit(p.value);
                p
            })
            .collect();

        Self { params: Arc::new(params) }
    }

    /// The normalized value of the parameter called `name`, or `None` if no
    /// such parameter exists.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.params.iter().find(|p| p.name == name).map(|p| p.value)
    }

    /// The normalized value of the parameter at `index`.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.params.get(index).map(|p| p.value)
    }

    pub fn parameter(&self, index: usize) -> Option<&Parameter> {
        self.params.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// An immutable view of the current values.
    pub fn snapshot(&self) -> Arc<Vec<Parameter>> {
        Arc::clone(&self.params)
    }

    /// Sets the parameter at `index` to `value`, clamped to `0.0 - 1.0`, and
    /// pushes the same normalized value to `device`.
    ///
    /// The store is updated whether or not `device` has a loaded handle; if
    /// it does not, the push is simply dropped. Returns the stored value, or
    /// `None` if `index` is out of range.
    pub fn set(
        &mut self,
        index: usize,
        value: f64,
        device: &mut DeviceBridge,
    ) -> Option<f64> {
        let value = clamp_unit(value);

        let Some(current) = self.params.get(index) else {
            trace!(index, "ignoring set on unknown parameter index");
            return None;
        };

        if current.value.to_bits() == value.to_bits() {
            return Some(value);
        }

        let param = &mut Arc::make_mut(&mut self.params)[index];
        param.value = value;
        device.set_normalized_value(&param.name, value);

        Some(value)
    }

    /// Pulls the device's current value for every parameter it knows about.
    /// Nothing is pushed back to the device. Returns how many parameters were
    /// seeded.
    pub fn seed_from(&mut self, device: &DeviceBridge) -> usize {
        let mut seeded = 0;
        let params = Arc::make_mut(&mut self.params);

        for param in params.iter_mut() {
            if let Some(value) = device.normalized_value(&param.name) {
                param.value = clamp_unit(value);
                seeded += 1;
            }
        }

        seeded
    }
}
