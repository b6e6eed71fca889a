//! In-memory backend for exercising models without ONNX files

use anyhow::Result;
use image::DynamicImage;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::{ModelDescriptor, Prediction};
use crate::pipelines::{Backend, GenerationParams, ImageClassifier, ImageGenerator};

#[derive(Default)]
pub struct StubBackend {
	predictions: Vec<Prediction>,
	images: Cell<usize>,
	fail_builds: Cell<usize>,
	classifier_builds: Cell<usize>,
	generator_builds: Cell<usize>,
	calls: Rc<RefCell<Vec<(String, GenerationParams)>>>,
}

impl StubBackend {
	pub fn new() -> Rc<Self> {
		Self::with_predictions(Vec::new())
	}

	pub fn with_predictions(predictions: Vec<Prediction>) -> Rc<Self> {
		Rc::new(Self { predictions, images: Cell::new(1), ..Default::default() })
	}

	/// Number of images each generate call returns
	pub fn generating(self: Rc<Self>, count: usize) -> Rc<Self> {
		self.images.set(count);
		self
	}

	/// Make the next `count` pipeline constructions fail
	pub fn failing(self: Rc<Self>, count: usize) -> Rc<Self> {
		self.fail_builds.set(count);
		self
	}

	pub fn classifier_builds(&self) -> usize {
		self.classifier_builds.get()
	}

	pub fn generator_builds(&self) -> usize {
		self.generator_builds.get()
	}

	pub fn prompts(&self) -> Vec<String> {
		self.calls.borrow().iter().map(|(prompt, _)| prompt.clone()).collect()
	}

	pub fn last_params(&self) -> Option<GenerationParams> {
		self.calls.borrow().last().map(|(_, params)| params.clone())
	}

	fn build(&self, counter: &Cell<usize>) -> Result<()> {
		counter.set(counter.get() + 1);
		let remaining = self.fail_builds.get();
		if remaining > 0 {
			self.fail_builds.set(remaining - 1);
			anyhow::bail!("stub weights unavailable");
		}
		Ok(())
	}
}

struct StubClassifier(Vec<Prediction>);

impl ImageClassifier for StubClassifier {
	fn classify(&mut self, _image: &DynamicImage) -> Result<Vec<Prediction>> {
		Ok(self.0.clone())
	}
}

struct StubGenerator {
	images: usize,
	calls: Rc<RefCell<Vec<(String, GenerationParams)>>>,
}

impl ImageGenerator for StubGenerator {
	fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<Vec<DynamicImage>> {
		self.calls.borrow_mut().push((prompt.to_string(), params.clone()));
		Ok((0..self.images).map(|i| DynamicImage::new_rgb8(i as u32 + 1, 1)).collect())
	}
}

impl Backend for StubBackend {
	fn image_classifier(&self, _descriptor: &ModelDescriptor) -> Result<Box<dyn ImageClassifier>> {
		self.build(&self.classifier_builds)?;
		Ok(Box::new(StubClassifier(self.predictions.clone())))
	}

	fn image_generator(&self, _descriptor: &ModelDescriptor) -> Result<Box<dyn ImageGenerator>> {
		self.build(&self.generator_builds)?;
		Ok(Box::new(StubGenerator {
			images: self.images.get(),
			calls: Rc::clone(&self.calls),
		}))
	}
}
