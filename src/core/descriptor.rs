//! Model identity: display label, inference task and pretrained weights

use std::fmt;

/// Kind of inference pipeline a model is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
	TextToImage,
	ImageClassification,
}

impl TaskKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			TaskKind::TextToImage => "text-to-image",
			TaskKind::ImageClassification => "image-classification",
		}
	}
}

impl fmt::Display for TaskKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Immutable (label, task, model id) triple identifying a model variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
	label: &'static str,
	task: TaskKind,
	model_id: &'static str,
	info: &'static str,
}

impl ModelDescriptor {
	pub const fn new(label: &'static str, task: TaskKind, model_id: &'static str, info: &'static str) -> Self {
		Self { label, task, model_id, info }
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn task(&self) -> TaskKind {
		self.task
	}

	pub fn model_id(&self) -> &'static str {
		self.model_id
	}

	/// Short human description shown next to the model
	pub fn info(&self) -> &'static str {
		self.info
	}
}

impl fmt::Display for ModelDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} [{} · {}]", self.label, self.task, self.model_id)
	}
}
