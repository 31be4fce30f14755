//! Parameter data types.

use std::fmt::{Display, Formatter, Result};

/// The group a parameter is shown under. Each category gets its own column
/// on a knob panel, in declaration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Global,
    Pitch,
    Filter,
    Delay,
}

impl Category {
    /// Every category, in column order.
    pub const ALL: [Self; 4] =
        [Self::Global, Self::Pitch, Self::Filter, Self::Delay];

    /// The column this category occupies.
    pub const fn column(self) -> usize {
        match self {
            Self::Global => 0,
            Self::Pitch => 1,
            Self::Filter => 2,
            Self::Delay => 3,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Pitch => write!(f, "pitch"),
            Self::Filter => write!(f, "filter"),
            Self::Delay => write!(f, "delay"),
        }
    }
}

// *** //

/// A single named control value.
///
/// `value` is always the *normalized* representation in `0.0 - 1.0`; `min`
/// and `max` only describe the range the audio engine maps it onto.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub category: Category,
}

impl Parameter {
    /// A parameter with a `0.0 - 1.0` descriptive range.
    pub fn new(name: &str, value: f64, category: Category) -> Self {
        Self {
            name: String::from(name),
            value: crate::util::clamp_unit(value),
            min: 0.0,
            max: 1.0,
            category,
        }
    }
}
