//! Studio mode - interactive select / load / run / save session

use anyhow::{Context, Result};
use colored::Colorize;
use image::DynamicImage;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::build_input;
use crate::config::DEFAULT_OUTPUT;
use crate::core::{ModelDescriptor, ModelError, Prediction, RunOutput};
use crate::models::{get_model_with, model_info, Model, MODEL_CHOICES};
use crate::pipelines::{Backend, OnnxBackend};
use crate::processing;
use crate::ui;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	Models,
	Select(String),
	Load,
	Image(PathBuf),
	Prompt(String),
	Run,
	Save(Option<PathBuf>),
	Info,
	Help,
	Exit,
	Unknown(String),
}

impl Action {
	pub fn parse(line: &str) -> Option<Self> {
		let line = line.trim();
		if line.is_empty() {
			return None;
		}

		let (cmd, rest) = match line.split_once(char::is_whitespace) {
			Some((cmd, rest)) => (cmd, rest.trim()),
			None => (line, ""),
		};

		Some(match cmd.to_lowercase().as_str() {
			"models" | "list" => Action::Models,
			"select" | "use" if !rest.is_empty() => Action::Select(rest.to_string()),
			"load" => Action::Load,
			"image" | "open" if !rest.is_empty() => Action::Image(PathBuf::from(rest)),
			"prompt" => Action::Prompt(rest.to_string()),
			"run" => Action::Run,
			"save" => Action::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
			"info" => Action::Info,
			"help" | "?" => Action::Help,
			"exit" | "quit" | "q" => Action::Exit,
			_ => Action::Unknown(line.to_string()),
		})
	}
}

/// What a `run` request amounted to
#[derive(Debug, Clone, PartialEq)]
pub enum RunReport {
	/// Nothing loaded yet
	NoModel,
	/// Classification asked for without a chosen image
	NeedsImage,
	Generated { width: u32, height: u32 },
	Classified(Prediction),
}

/// Session state: the selected label, the active model and the working inputs/outputs
pub struct Session {
	backend: Rc<dyn Backend>,
	selected: &'static ModelDescriptor,
	active: Option<Box<dyn Model>>,
	image_path: Option<PathBuf>,
	prompt: String,
	generated: Option<DynamicImage>,
}

impl Session {
	pub fn new(backend: Rc<dyn Backend>) -> Self {
		Self {
			backend,
			selected: &MODEL_CHOICES[0],
			active: None,
			image_path: None,
			prompt: String::new(),
			generated: None,
		}
	}

	pub fn selected(&self) -> &'static ModelDescriptor {
		self.selected
	}

	pub fn active(&self) -> Option<&dyn Model> {
		self.active.as_deref()
	}

	pub fn image_path(&self) -> Option<&Path> {
		self.image_path.as_deref()
	}

	pub fn generated(&self) -> Option<&DynamicImage> {
		self.generated.as_ref()
	}

	/// Pick a model by 1-based index or exact label; the active model is untouched until `load`
	pub fn select(&mut self, choice: &str) -> Result<&'static ModelDescriptor, ModelError> {
		let by_index = choice
			.parse::<usize>()
			.ok()
			.and_then(|n| n.checked_sub(1))
			.and_then(|i| MODEL_CHOICES.get(i));
		let found = by_index.or_else(|| MODEL_CHOICES.iter().find(|d| d.label() == choice));

		self.selected = found.ok_or_else(|| ModelError::InvalidSelection(choice.to_string()))?;
		Ok(self.selected)
	}

	/// Replace the active model with a fresh, loaded instance of the selection.
	/// On failure the previous model stays active.
	pub fn load(&mut self) -> Result<()> {
		let mut model = get_model_with(self.selected.label(), Rc::clone(&self.backend))?;
		ui::info(&format!("Loading {}...", self.selected.label()));
		model.load()?;
		self.active = Some(model);
		Ok(())
	}

	/// Choose the classifier input; drops any previously generated image
	pub fn choose_image(&mut self, path: &Path) -> Result<DynamicImage> {
		let img = processing::image::open(path)?;
		self.image_path = Some(path.to_path_buf());
		self.generated = None;
		Ok(processing::image::preview(&img))
	}

	pub fn set_prompt(&mut self, prompt: &str) {
		self.prompt = prompt.to_string();
	}

	pub fn run(&mut self) -> Result<RunReport> {
		let Some(model) = self.active.as_mut() else {
			return Ok(RunReport::NoModel);
		};

		let task = model.descriptor().task();
		let Some(input) = build_input(task, &self.prompt, self.image_path.as_deref()) else {
			return Ok(RunReport::NeedsImage);
		};

		Ok(match model.run(input)? {
			RunOutput::Image(image) => {
				let report = RunReport::Generated { width: image.width(), height: image.height() };
				self.generated = Some(image);
				report
			}
			RunOutput::Prediction(prediction) => RunReport::Classified(prediction),
		})
	}

	/// Save the generated image; `None` when there is nothing to save
	pub fn save(&self, path: &Path) -> Result<Option<PathBuf>> {
		match &self.generated {
			Some(image) => processing::image::save(image, path).map(Some),
			None => Ok(None),
		}
	}
}

pub fn run() -> Result<()> {
	ui::print_logo();
	ui::info("Type 'help' for commands, 'exit' to quit");

	let mut session = Session::new(Rc::new(OnnxBackend));
	show_info(session.selected());
	println!();

	let stdin = io::stdin();
	let mut lines = stdin.lock().lines();

	loop {
		print!("{} ", "studio>".bright_blue().bold());
		io::stdout().flush()?;

		let Some(line) = lines.next() else { break };
		let line = line.context("Failed to read input")?;

		let Some(action) = Action::parse(&line) else { continue };
		if action == Action::Exit {
			ui::info("Goodbye!");
			break;
		}

		if let Err(e) = dispatch(&mut session, action) {
			ui::error(&format!("{:#}", e));
		}
		println!();
	}

	Ok(())
}

fn dispatch(session: &mut Session, action: Action) -> Result<()> {
	match action {
		Action::Models => show_models(session.selected()),
		Action::Select(choice) => {
			let selected = session.select(&choice)?;
			show_info(selected);
		}
		Action::Load => {
			session.load()?;
			ui::success(&format!("{} loaded successfully.", session.selected().label()));
		}
		Action::Image(path) => {
			let preview = session.choose_image(&path)?;
			ui::success(&format!(
				"Image selected: {} (preview {}×{})",
				ui::path_link(&path),
				preview.width(),
				preview.height()
			));
		}
		Action::Prompt(text) => {
			session.set_prompt(&text);
			if text.is_empty() {
				ui::info("Prompt cleared; the built-in prompt will be used");
			} else {
				ui::success("Prompt set");
			}
		}
		Action::Run => match session.run()? {
			RunReport::NoModel => ui::warn("Please load a model first."),
			RunReport::NeedsImage => ui::info("Choose an image first."),
			RunReport::Generated { width, height } => {
				ui::success(&format!(
					"Image generated successfully ({}×{}). Use 'save' to export.",
					width, height
				));
			}
			RunReport::Classified(prediction) => {
				ui::header("Output");
				println!("{}", prediction);
			}
		},
		Action::Save(path) => {
			let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
			match session.save(&path)? {
				Some(written) => ui::success(&format!("Saved to: {}", ui::path_link(&written))),
				None => ui::info("No generated image to save."),
			}
		}
		Action::Info => {
			show_info(session.selected());
			match session.active() {
				Some(model) => ui::info(&format!("Active: {}", model.descriptor())),
				None => ui::info("No model loaded"),
			}
			if let Some(path) = session.image_path() {
				ui::info(&format!("Image: {}", path.display()));
			}
		}
		Action::Help => show_help(),
		Action::Unknown(line) => ui::warn(&format!("Unknown command: {} (try 'help')", line)),
		Action::Exit => {}
	}

	Ok(())
}

fn show_models(selected: &ModelDescriptor) {
	for (i, choice) in MODEL_CHOICES.iter().enumerate() {
		let marker = if choice == selected { "▸".bright_green().bold() } else { " ".normal() };
		println!("{} {} {}", marker, format!("{}.", i + 1).bright_blue().bold(), choice.label());
	}
}

fn show_info(selected: &ModelDescriptor) {
	ui::info(&format!("Model: {}", selected.label()));
	println!("  {}", model_info(selected.label()).dimmed());
}

fn show_help() {
	println!("{}", "Studio Commands:".bright_blue().bold());
	println!("  {}       List models", "models".dimmed());
	println!("  {}   Select a model by number or label", "select <n>".dimmed());
	println!("  {}         Load the selected model", "load".dimmed());
	println!("  {} Choose an image to classify", "image <path>".dimmed());
	println!("  {} Set the text-to-image prompt", "prompt <text>".dimmed());
	println!("  {}          Run the loaded model", "run".dimmed());
	println!("  {}  Save the generated image (default {})", "save [path]".dimmed(), DEFAULT_OUTPUT);
	println!("  {}         Show the current selection", "info".dimmed());
	println!("  {}         Exit studio", "exit".dimmed());
}
