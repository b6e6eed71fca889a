//! # Inference Pipelines
//!
//! Task-level seams between the model variants and the inference runtime.
//! A [`Backend`] builds pipelines from a descriptor; [`OnnxBackend`] builds
//! them from exported ONNX files on disk.

pub mod classifier;
pub mod diffusion;
pub mod scheduler;

use anyhow::Result;
use image::DynamicImage;

use crate::config;
use crate::core::{ModelDescriptor, Prediction};

pub use classifier::VitClassifier;
pub use diffusion::SdTurboGenerator;

/// Knobs for a text-to-image call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
	pub steps: usize,
	pub guidance_scale: f32,
	pub seed: Option<u64>,
}

impl Default for GenerationParams {
	fn default() -> Self {
		Self {
			steps: config::INFERENCE_STEPS,
			guidance_scale: config::GUIDANCE_SCALE,
			seed: config::seed(),
		}
	}
}

/// Image → ranked labels
pub trait ImageClassifier {
	/// Predictions ordered by descending score
	fn classify(&mut self, image: &DynamicImage) -> Result<Vec<Prediction>>;
}

/// Prompt → images
pub trait ImageGenerator {
	fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<Vec<DynamicImage>>;
}

/// Constructs task pipelines for a model descriptor
pub trait Backend {
	fn image_classifier(&self, descriptor: &ModelDescriptor) -> Result<Box<dyn ImageClassifier>>;
	fn image_generator(&self, descriptor: &ModelDescriptor) -> Result<Box<dyn ImageGenerator>>;
}

/// Loads ONNX exports from the configured models directory
#[derive(Debug, Default, Clone, Copy)]
pub struct OnnxBackend;

impl Backend for OnnxBackend {
	fn image_classifier(&self, descriptor: &ModelDescriptor) -> Result<Box<dyn ImageClassifier>> {
		let dir = config::model_dir(descriptor.model_id());
		Ok(Box::new(VitClassifier::load(&dir)?))
	}

	fn image_generator(&self, descriptor: &ModelDescriptor) -> Result<Box<dyn ImageGenerator>> {
		let dir = config::model_dir(descriptor.model_id());
		Ok(Box::new(SdTurboGenerator::load(&dir)?))
	}
}
