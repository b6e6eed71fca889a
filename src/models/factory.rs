//! Label → fresh model instance

use anyhow::Result;
use std::rc::Rc;

use super::{ImageClassificationModel, Model, TextToImageModel};
use crate::config::{IMAGE_CLASSIFICATION_MODEL, TEXT_TO_IMAGE_MODEL};
use crate::core::{ModelDescriptor, ModelError, TaskKind};
use crate::pipelines::{Backend, OnnxBackend};

pub const TEXT_TO_IMAGE: ModelDescriptor = ModelDescriptor::new(
	"Text-to-Image (SD-Turbo)",
	TaskKind::TextToImage,
	TEXT_TO_IMAGE_MODEL,
	"Category: Text → Image. Stable Diffusion Turbo for fast 512×512 image synthesis. Use short prompts; 1–4 steps recommended.",
);

pub const IMAGE_CLASSIFICATION: ModelDescriptor = ModelDescriptor::new(
	"Image Classification (ViT-Base-16)",
	TaskKind::ImageClassification,
	IMAGE_CLASSIFICATION_MODEL,
	"Category: Image → Label. Vision Transformer model to predict the main object.",
);

/// Every selectable model, in display order
pub static MODEL_CHOICES: [ModelDescriptor; 2] = [TEXT_TO_IMAGE, IMAGE_CLASSIFICATION];

pub fn descriptor_for(label: &str) -> Option<&'static ModelDescriptor> {
	MODEL_CHOICES.iter().find(|d| d.label() == label)
}

/// Info text for a label, empty when unknown
pub fn model_info(label: &str) -> &'static str {
	descriptor_for(label).map_or("", |d| d.info())
}

/// New, unloaded model backed by the ONNX runtime
pub fn get_model(label: &str) -> Result<Box<dyn Model>, ModelError> {
	get_model_with(label, Rc::new(OnnxBackend))
}

/// New, unloaded model backed by `backend`
pub fn get_model_with(label: &str, backend: Rc<dyn Backend>) -> Result<Box<dyn Model>, ModelError> {
	let descriptor = descriptor_for(label)
		.cloned()
		.ok_or_else(|| ModelError::InvalidSelection(label.to_string()))?;

	let model: Box<dyn Model> = match descriptor.task() {
		TaskKind::TextToImage => Box::new(TextToImageModel::new(descriptor, backend)),
		TaskKind::ImageClassification => Box::new(ImageClassificationModel::new(descriptor, backend)),
	};
	Ok(model)
}
