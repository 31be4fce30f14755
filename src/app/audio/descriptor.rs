//! Processing-graph descriptors.

use super::LoadError;
use lazy_static::lazy_static;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

const PATCH_SCHEMA: &str =
    include_str!("../../../assets/json/patch_schema.json");

lazy_static! {
    static ref PATCH_SCHEMA_VALIDATOR: jsonschema::Validator = {
        let schema: Value = serde_json::from_str(PATCH_SCHEMA)
            .expect("failed to parse patch schema to JSON");
        jsonschema::Validator::new(&schema)
            .expect("failed to create patch schema validator")
    };
}

const fn default_output_channels() -> usize {
    2
}

/// Where a descriptor is read from.
#[derive(Clone, Debug)]
pub enum DescriptorSource {
    File(PathBuf),
    Inline(String),
}

impl DescriptorSource {
    /// Reads the raw descriptor text.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Fetch`] if the file cannot be read.
    pub fn fetch(&self) -> Result<String, LoadError> {
        match self {
            Self::File(path) => std::fs::read_to_string(path).map_err(
                |source| LoadError::Fetch { path: path.clone(), source },
            ),
            Self::Inline(text) => Ok(text.clone()),
        }
    }
}

impl Display for DescriptorSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline(_) => write!(f, "<inline>"),
        }
    }
}

// *** *** *** //

#[derive(Deserialize)]
struct RawPatch {
    desc: PatchDescriptor,
}

/// Everything the app needs to know about a processing graph: the names and
/// ranges of its parameters and the names of its message inports.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatchDescriptor {
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default)]
    pub inports: Vec<InportDescriptor>,
    #[serde(default = "default_output_channels")]
    pub num_output_channels: usize,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub param_id: String,
    pub minimum: f64,
    pub maximum: f64,
    pub initial_value: f64,
    #[serde(default)]
    pub steps: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct InportDescriptor {
    pub tag: String,
}

impl PatchDescriptor {
    /// Parses and validates a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] if `text` is not valid JSON or does not
    /// deserialize, and [`LoadError::Schema`] if it does not match the patch
    /// schema.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let json: Value = serde_json::from_str(text)?;

        let errors: Vec<String> = PATCH_SCHEMA_VALIDATOR
            .iter_errors(&json)
            .map(|e| e.to_string())
            .collect();

        if !errors.is_empty() {
            return Err(LoadError::Schema(errors.join("; ")));
        }

        let raw: RawPatch = serde_json::from_value(json)?;

        Ok(raw.desc)
    }

    /// The position of the inport called `tag`.
    pub fn inport_index(&self, tag: &str) -> Option<usize> {
        self.inports.iter().position(|i| i.tag == tag)
    }
}

impl ParameterDescriptor {
    /// The initial value mapped into `0.0 - 1.0`. A degenerate range maps to
    /// `0.0`.
    pub fn initial_normalized(&self) -> f64 {
        let range = self.maximum - self.minimum;

        if range.abs() < f64::EPSILON {
            return 0.0;
        }

        crate::util::clamp_unit((self.initial_value - self.minimum) / range)
    }
}
