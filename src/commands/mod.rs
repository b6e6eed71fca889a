//! # Command Implementations
//!
//! Each submodule handles one CLI command (list, run, studio).

pub mod list;
pub mod run;
pub mod studio;

use std::path::Path;

use crate::core::{ImageSource, ModelInput, TaskKind};

/// Input for a task from what the user supplied, or `None` when a required piece is missing
pub fn build_input(task: TaskKind, prompt: &str, image: Option<&Path>) -> Option<ModelInput> {
	match task {
		TaskKind::TextToImage => Some(ModelInput::Prompt(prompt.trim().to_string())),
		TaskKind::ImageClassification => {
			image.map(|path| ModelInput::Image(ImageSource::Path(path.to_path_buf())))
		}
	}
}

/// Flags the user passed that the task has no use for
pub fn ignored_flags(task: TaskKind, prompt: Option<&str>, image: Option<&Path>) -> Vec<&'static str> {
	let mut ignored = Vec::new();
	match task {
		TaskKind::TextToImage if image.is_some() => ignored.push("--image"),
		TaskKind::ImageClassification if prompt.is_some() => ignored.push("--prompt"),
		_ => {}
	}
	ignored
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_to_image_always_has_input() {
		let input = build_input(TaskKind::TextToImage, "  fox \n", None).unwrap();
		assert!(matches!(input, ModelInput::Prompt(p) if p == "fox"));
	}

	#[test]
	fn classification_needs_an_image() {
		assert!(build_input(TaskKind::ImageClassification, "ignored", None).is_none());
		let input = build_input(TaskKind::ImageClassification, "", Some(Path::new("cat.png"))).unwrap();
		assert!(matches!(input, ModelInput::Image(ImageSource::Path(p)) if p == Path::new("cat.png")));
	}

	#[test]
	fn unused_flags_are_reported() {
		let cat = Some(Path::new("cat.png"));
		assert_eq!(ignored_flags(TaskKind::TextToImage, Some("fox"), cat), vec!["--image"]);
		assert_eq!(ignored_flags(TaskKind::ImageClassification, Some("fox"), cat), vec!["--prompt"]);
		assert!(ignored_flags(TaskKind::TextToImage, Some("fox"), None).is_empty());
		assert!(ignored_flags(TaskKind::ImageClassification, None, cat).is_empty());
	}
}
