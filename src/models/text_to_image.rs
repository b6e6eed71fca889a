//! Text-to-image variant: a few fast denoising steps, no guidance

use anyhow::Result;
use std::rc::Rc;

use super::{LazyPipeline, Model};
use crate::config::DEFAULT_PROMPT;
use crate::core::{ModelDescriptor, ModelError, ModelInput, RunOutput, TaskKind};
use crate::pipelines::{Backend, GenerationParams, ImageGenerator};
use crate::ui::timed;

pub struct TextToImageModel {
	descriptor: ModelDescriptor,
	backend: Rc<dyn Backend>,
	pipeline: LazyPipeline<dyn ImageGenerator>,
	params: GenerationParams,
}

impl TextToImageModel {
	pub fn new(descriptor: ModelDescriptor, backend: Rc<dyn Backend>) -> Self {
		Self {
			descriptor,
			backend,
			pipeline: LazyPipeline::new(),
			params: GenerationParams::default(),
		}
	}

	pub fn params(&self) -> &GenerationParams {
		&self.params
	}

	fn pipeline(&mut self) -> Result<&mut (dyn ImageGenerator + 'static)> {
		let Self { descriptor, backend, pipeline, .. } = self;
		pipeline.get_or_load(|| timed("load", || backend.image_generator(descriptor)))
	}
}

impl Model for TextToImageModel {
	fn descriptor(&self) -> &ModelDescriptor {
		&self.descriptor
	}

	fn is_loaded(&self) -> bool {
		self.pipeline.is_loaded()
	}

	fn load(&mut self) -> Result<()> {
		self.pipeline().map(|_| ())
	}

	fn run(&mut self, input: ModelInput) -> Result<RunOutput> {
		let kind = input.kind();
		let ModelInput::Prompt(prompt) = input else {
			return Err(ModelError::UnsupportedInput { task: TaskKind::TextToImage, input: kind }.into());
		};

		let prompt = effective_prompt(&prompt);
		let params = self.params.clone();
		let pipeline = self.pipeline()?;
		let images = timed(TaskKind::TextToImage.as_str(), || pipeline.generate(prompt, &params))?;

		let first = images.into_iter().next().ok_or(ModelError::EmptyOutput(TaskKind::TextToImage))?;
		Ok(RunOutput::Image(first))
	}
}

/// Blank prompts fall back to the built-in default
pub fn effective_prompt(prompt: &str) -> &str {
	if prompt.trim().is_empty() {
		DEFAULT_PROMPT
	} else {
		prompt
	}
}
