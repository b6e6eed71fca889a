//! List command - show selectable models

use colored::Colorize;

use crate::config;
use crate::models::MODEL_CHOICES;
use crate::ui;

pub fn run() {
	ui::header("Models");

	for (i, choice) in MODEL_CHOICES.iter().enumerate() {
		let dir = config::model_dir(choice.model_id());
		let status = if dir.is_dir() {
			"installed".bright_green()
		} else {
			"missing".bright_red()
		};

		println!(
			"{} {} {}",
			format!("{:2}.", i + 1).bright_blue().bold(),
			choice.label().bright_white(),
			format!("[{}]", status).dimmed()
		);
		println!("    {} {}", choice.task().as_str().yellow(), choice.model_id().dimmed());
		println!("    {}", choice.info().dimmed());
	}

	println!();
	ui::debug(&format!("Models directory: {}", config::models_dir().display()));
}
