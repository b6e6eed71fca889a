//! # Models
//!
//! The shared model contract, the concrete variants and the label → model factory.
//!
//! Every variant owns a [`LazyPipeline`]: `load` builds the inference pipeline on
//! first use and `run` loads on demand before delegating to it.

pub mod classification;
pub mod factory;
pub mod lazy;
pub mod text_to_image;

#[cfg(test)]
pub(crate) mod stub;

use anyhow::Result;

use crate::core::{ModelDescriptor, ModelInput, RunOutput};

pub use classification::ImageClassificationModel;
pub use factory::{descriptor_for, get_model, get_model_with, model_info, IMAGE_CLASSIFICATION, MODEL_CHOICES, TEXT_TO_IMAGE};
pub use lazy::LazyPipeline;
pub use text_to_image::TextToImageModel;

/// Uniform contract for every model variant
pub trait Model {
	fn descriptor(&self) -> &ModelDescriptor;

	fn is_loaded(&self) -> bool;

	/// Build the pipeline if it is not built yet. Repeat calls are no-ops;
	/// a failed build leaves the model unloaded so the next call retries.
	fn load(&mut self) -> Result<()>;

	/// Load on demand, then run the pipeline on `input`
	fn run(&mut self, input: ModelInput) -> Result<RunOutput>;
}
