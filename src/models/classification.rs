//! Image classification variant: best label for a picture

use anyhow::{Context, Result};
use image::DynamicImage;
use std::rc::Rc;

use super::{LazyPipeline, Model};
use crate::core::{ImageSource, ModelDescriptor, ModelError, ModelInput, Prediction, RunOutput, TaskKind};
use crate::pipelines::{Backend, ImageClassifier};
use crate::ui::timed;

pub struct ImageClassificationModel {
	descriptor: ModelDescriptor,
	backend: Rc<dyn Backend>,
	pipeline: LazyPipeline<dyn ImageClassifier>,
}

impl ImageClassificationModel {
	pub fn new(descriptor: ModelDescriptor, backend: Rc<dyn Backend>) -> Self {
		Self {
			descriptor,
			backend,
			pipeline: LazyPipeline::new(),
		}
	}

	fn pipeline(&mut self) -> Result<&mut (dyn ImageClassifier + 'static)> {
		let Self { descriptor, backend, pipeline } = self;
		pipeline.get_or_load(|| timed("load", || backend.image_classifier(descriptor)))
	}
}

impl Model for ImageClassificationModel {
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
		let ModelInput::Image(source) = input else {
			return Err(ModelError::UnsupportedInput { task: TaskKind::ImageClassification, input: kind }.into());
		};

		let image = open_source(source)?;
		let pipeline = self.pipeline()?;
		let predictions = timed(TaskKind::ImageClassification.as_str(), || pipeline.classify(&image))?;

		let best = best_prediction(predictions).ok_or(ModelError::EmptyOutput(TaskKind::ImageClassification))?;
		Ok(RunOutput::Prediction(best))
	}
}

fn open_source(source: ImageSource) -> Result<DynamicImage> {
	match source {
		ImageSource::Buffer(image) => Ok(image),
		ImageSource::Path(path) => crate::processing::image::open(&path)
			.with_context(|| format!("Cannot classify {}", path.display())),
	}
}

/// Highest score wins; on a tie the earlier entry is kept
pub fn best_prediction(predictions: Vec<Prediction>) -> Option<Prediction> {
	predictions.into_iter().fold(None, |best, candidate| match best {
		Some(best) if best.score >= candidate.score => Some(best),
		_ => Some(candidate),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::models::stub::StubBackend;
	use crate::models::IMAGE_CLASSIFICATION;

	fn preds(items: &[(&str, f32)]) -> Vec<Prediction> {
		items.iter().map(|&(label, score)| Prediction::new(label, score)).collect()
	}

	fn pixel() -> ModelInput {
		ModelInput::Image(ImageSource::Buffer(DynamicImage::new_rgb8(1, 1)))
	}

	#[test]
	fn picks_highest_score() {
		let best = best_prediction(preds(&[("x", 0.2), ("y", 0.9), ("z", 0.5)])).unwrap();
		assert_eq!(best, Prediction::new("y", 0.9));
	}

	#[test]
	fn tie_keeps_first() {
		let best = best_prediction(preds(&[("a", 0.4), ("b", 0.7), ("c", 0.7)])).unwrap();
		assert_eq!(best.label, "b");
	}

	#[test]
	fn empty_predictions_have_no_best() {
		assert!(best_prediction(Vec::new()).is_none());
	}

	#[test]
	fn run_returns_best_stub_prediction() {
		let backend = StubBackend::with_predictions(preds(&[("x", 0.2), ("y", 0.9), ("z", 0.5)]));
		let mut model = ImageClassificationModel::new(IMAGE_CLASSIFICATION, backend.clone());

		let out = model.run(pixel()).unwrap().into_prediction().unwrap();
		assert_eq!(out, Prediction::new("y", 0.9));
		assert_eq!(backend.classifier_builds(), 1);
	}

	#[test]
	fn run_loads_lazily_once() {
		let backend = StubBackend::with_predictions(preds(&[("x", 1.0)]));
		let mut model = ImageClassificationModel::new(IMAGE_CLASSIFICATION, backend.clone());

		assert!(!model.is_loaded());
		model.run(pixel()).unwrap();
		model.run(pixel()).unwrap();
		assert!(model.is_loaded());
		assert_eq!(backend.classifier_builds(), 1);
	}

	#[test]
	fn empty_pipeline_output_is_an_error() {
		let backend = StubBackend::with_predictions(Vec::new());
		let mut model = ImageClassificationModel::new(IMAGE_CLASSIFICATION, backend);

		let err = model.run(pixel()).unwrap_err();
		assert_eq!(
			err.downcast_ref::<ModelError>(),
			Some(&ModelError::EmptyOutput(TaskKind::ImageClassification))
		);
	}

	#[test]
	fn prompt_input_is_rejected_before_loading() {
		let backend = StubBackend::new();
		let mut model = ImageClassificationModel::new(IMAGE_CLASSIFICATION, backend.clone());

		let err = model.run(ModelInput::Prompt("a cat".into())).unwrap_err();
		assert!(matches!(
			err.downcast_ref::<ModelError>(),
			Some(ModelError::UnsupportedInput { input: "prompt", .. })
		));
		assert_eq!(backend.classifier_builds(), 0);
	}

	#[test]
	fn missing_image_file_fails_run() {
		let backend = StubBackend::with_predictions(preds(&[("x", 1.0)]));
		let mut model = ImageClassificationModel::new(IMAGE_CLASSIFICATION, backend);

		let input = ModelInput::Image(ImageSource::Path("does/not/exist.png".into()));
		assert!(model.run(input).is_err());
	}
}
