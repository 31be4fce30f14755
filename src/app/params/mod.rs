//! Named, normalized control parameters.

mod store;
pub mod types;

pub use store::ParameterStore;
pub use types::*;
