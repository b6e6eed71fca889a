//! Core domain types

pub mod descriptor;
pub mod error;
pub mod output;

pub use descriptor::{ModelDescriptor, TaskKind};
pub use error::ModelError;
pub use output::{ImageSource, ModelInput, Prediction, RunOutput};
