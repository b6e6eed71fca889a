//! Model inputs and run results

use image::DynamicImage;
use std::fmt;
use std::path::PathBuf;

/// Where a classification input comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
	Path(PathBuf),
	Buffer(DynamicImage),
}

/// Input handed to `Model::run`; which variant is valid depends on the model
#[derive(Debug, Clone)]
pub enum ModelInput {
	Prompt(String),
	Image(ImageSource),
}

impl ModelInput {
	pub fn kind(&self) -> &'static str {
		match self {
			ModelInput::Prompt(_) => "prompt",
			ModelInput::Image(_) => "image",
		}
	}
}

/// A single classifier guess
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
	pub label: String,
	pub score: f32,
}

impl Prediction {
	pub fn new(label: impl Into<String>, score: f32) -> Self {
		Self { label: label.into(), score }
	}
}

impl fmt::Display for Prediction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Label: {}\nScore: {:.4}", self.label, self.score)
	}
}

/// What a model run produced; callers match on the variant
#[derive(Debug, Clone)]
pub enum RunOutput {
	Image(DynamicImage),
	Prediction(Prediction),
}

impl RunOutput {
	pub fn into_image(self) -> Option<DynamicImage> {
		match self {
			RunOutput::Image(img) => Some(img),
			RunOutput::Prediction(_) => None,
		}
	}

	pub fn into_prediction(self) -> Option<Prediction> {
		match self {
			RunOutput::Prediction(p) => Some(p),
			RunOutput::Image(_) => None,
		}
	}
}
