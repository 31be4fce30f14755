//! Knob hit-targets and the drag state machine.

use crate::app::input::PointerSample;
use crate::app::params::{Category, ParameterStore};
use crate::prelude::*;

/// The clickable area of one knob, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobTarget {
    /// Index of the parameter in its store.
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl KnobTarget {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        distance(x, y, self.x, self.y) < self.radius
    }
}

/// Lays the parameters of `store` out in one equal-width column per
/// category. Targets come in category order, then store order within a
/// category, which is also the order knobs are drawn and hit-tested in.
pub fn layout_knobs(store: &ParameterStore, width: f32) -> Vec<KnobTarget> {
    let column_width = width / Category::ALL.len() as f32;
    let mut rows = [0_usize; Category::ALL.len()];

    let mut targets: Vec<_> = store
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let column = param.category.column();
            let row = rows[column];
            rows[column] += 1;

            let target = KnobTarget {
                index,
                x: column_width.mul_add(column as f32, column_width * 0.5),
                y: KNOB_ROW_SPACING.mul_add(row as f32, KNOB_FIRST_ROW_Y),
                radius: KNOB_RADIUS,
            };

            ((column, row), target)
        })
        .collect();

    targets.sort_by_key(|&(position, _)| position);
    targets.into_iter().map(|(_, target)| target).collect()
}

/// The rotation of a knob showing `value`, in radians clockwise from the
/// positive x-axis of the canvas.
pub fn knob_angle(value: f64) -> f32 {
    scale_f32(clamp_unit(value) as f32, -KNOB_ANGLE_RANGE, KNOB_ANGLE_RANGE)
}

/// The outer end of a knob's indicator line, in canvas coordinates.
pub fn indicator_end(target: &KnobTarget, value: f64) -> (f32, f32) {
    let (sin, cos) = knob_angle(value).sin_cos();

    (
        KNOB_INDICATOR_LENGTH.mul_add(cos, target.x),
        KNOB_INDICATOR_LENGTH.mul_add(sin, target.y),
    )
}

// *** *** *** //

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        index: usize,
        last_y: f32,
    },
}

/// A value change produced by a drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobUpdate {
    pub index: usize,
    pub value: f64,
}

/// Resolves pointer samples into drags of at most one knob at a time.
#[derive(Clone, Debug)]
pub struct KnobInteractionController {
    state: DragState,
    sensitivity: f64,
}

impl KnobInteractionController {
    pub fn new() -> Self {
        Self::with_sensitivity(KNOB_SENSITIVITY)
    }

    pub const fn with_sensitivity(sensitivity: f64) -> Self {
        Self { state: DragState::Idle, sensitivity }
    }

    pub const fn state(&self) -> DragState {
        self.state
    }

    /// The index of the knob being dragged, if any.
    pub const fn active(&self) -> Option<usize> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { index, .. } => Some(index),
        }
    }

    /// Advances the state machine by one pointer sample.
    ///
    /// A press over a knob starts dragging it if nothing else is being
    /// dragged. While dragging, upward travel since the previous tick raises
    /// the value. The tick on which the pointer is released still applies its
    /// travel before the drag ends. Returns the new value for the dragged
    /// knob if it moved.
    pub fn tick(
        &mut self,
        sample: PointerSample,
        targets: &[KnobTarget],
        store: &ParameterStore,
    ) -> Option<KnobUpdate> {
        match self.state {
            DragState::Idle => {
                if sample.pressed {
                    if let Some(target) =
                        targets.iter().find(|t| t.contains(sample.x, sample.y))
                    {
                        self.state = DragState::Dragging {
                            index: target.index,
                            last_y: sample.y,
                        };
                    }
                }

                None
            }
            DragState::Dragging { index, last_y } => {
                let delta = f64::from(last_y - sample.y);

                self.state = if sample.pressed {
                    DragState::Dragging { index, last_y: sample.y }
                }
                else {
                    DragState::Idle
                };

                if delta == 0.0 {
                    return None;
                }

                let current = store.value(index)?;

                Some(KnobUpdate {
                    index,
                    value: clamp_unit(delta.mul_add(self.sensitivity, current)),
                })
            }
        }
    }
}

impl Default for KnobInteractionController {
    fn default() -> Self {
        Self::new()
    }
}
