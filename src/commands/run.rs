//! Run command - load one model and run it once

use anyhow::{bail, Result};
use std::path::Path;
use std::time::Instant;

use super::{build_input, ignored_flags};
use crate::core::{RunOutput, TaskKind};
use crate::models::get_model;
use crate::processing;
use crate::ui;

pub fn run(label: &str, prompt: Option<&str>, image: Option<&Path>, output: &Path, open_result: bool) -> Result<()> {
	let mut model = get_model(label)?;
	let task = model.descriptor().task();

	for flag in ignored_flags(task, prompt, image) {
		ui::warn(&format!("{} does not use {}, ignoring it", label, flag));
	}

	let Some(input) = build_input(task, prompt.unwrap_or_default(), image) else {
		bail!("{} needs an image: pass --image <PATH>", label);
	};

	if task == TaskKind::ImageClassification {
		if let Some(path) = image.filter(|p| !processing::image::is_supported(p)) {
			ui::warn(&format!("Unrecognised image extension: {}", path.display()));
		}
	}

	ui::info(&format!("Loading {}...", label));
	let load_start = Instant::now();
	model.load()?;
	ui::success(&format!("Model ready in {:.2}s", load_start.elapsed().as_secs_f32()));

	let run_start = Instant::now();
	match model.run(input)? {
		RunOutput::Prediction(prediction) => {
			ui::header("Result");
			println!("{}", prediction);
		}
		RunOutput::Image(image) => {
			let written = processing::image::save(&image, output)?;
			ui::success(&format!(
				"Image generated in {:.2}s: {}",
				run_start.elapsed().as_secs_f32(),
				ui::path_link(&written)
			));

			if open_result {
				ui::info(&format!("Opening: {}", written.display()));
				if let Err(e) = open::that(&written) {
					ui::warn(&format!("Failed to open: {}", e));
				}
			}
		}
	}

	Ok(())
}
