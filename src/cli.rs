use clap::builder::styling::{AnsiColor, Color, Style};
use clap::{builder::Styles, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

/// Execution provider for ONNX Runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
	/// Auto-detect best available (TensorRT → CUDA → CoreML → XNNPACK → CPU)
	#[default]
	Auto,
	/// CPU only
	Cpu,
	/// NVIDIA CUDA GPU
	Cuda,
	/// NVIDIA TensorRT (optimized inference)
	Tensorrt,
	/// Apple CoreML (macOS only)
	Coreml,
	/// XNNPACK (optimized CPU kernels)
	Xnnpack,
}

const GENERATE_EXAMPLE: &str = "-m \"Text-to-Image (SD-Turbo)\" --prompt \"a red fox\" -o fox.png";
const CLASSIFY_EXAMPLE: &str = "-m \"Image Classification (ViT-Base-16)\" -i cat.jpg";

fn color(c: AnsiColor) -> Style {
	Style::new().fg_color(Some(Color::Ansi(c)))
}

fn styles() -> Styles {
	Styles::styled()
		.header(color(AnsiColor::Blue).bold())
		.usage(color(AnsiColor::Blue).bold())
		.literal(color(AnsiColor::Blue))
		.placeholder(color(AnsiColor::Yellow))
		.valid(color(AnsiColor::Blue))
		.invalid(color(AnsiColor::Red))
}

#[derive(Parser, Debug)]
#[command(
	name = "modeldesk",
	author,
	version,
	about = "Pick a pretrained model, run it on your input, keep the result",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {app} {list}{pad_list}{list_desc}
  {app} {run} {run_t2i_args}   {run_t2i_desc}
  {app} {run} {run_cls_args}{pad_cls}{run_cls_desc}
  {app} {studio}{pad_studio}{studio_desc}",
		title = "Examples:".bright_blue().bold(),
		app = "modeldesk".bright_blue(),
		list = "list".yellow(),
		pad_list = " ".repeat(GENERATE_EXAMPLE.len() + 3),
		list_desc = "Show available models".dimmed(),
		run = "run".yellow(),
		run_t2i_args = GENERATE_EXAMPLE,
		run_t2i_desc = "Generate an image".dimmed(),
		run_cls_args = CLASSIFY_EXAMPLE,
		pad_cls = " ".repeat(GENERATE_EXAMPLE.len() - CLASSIFY_EXAMPLE.len() + 3),
		run_cls_desc = "Classify an image".dimmed(),
		studio = "studio".yellow(),
		pad_studio = " ".repeat(GENERATE_EXAMPLE.len() + 1),
		studio_desc = "Interactive session".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output (includes call timings)
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Execution provider: auto, cpu, cuda, tensorrt, coreml, xnnpack
	#[arg(short = 'p', long = "provider", global = true, default_value = "auto")]
	pub provider: Provider,

	/// Directory holding exported ONNX models
	#[arg(long = "models-dir", global = true, value_name = "DIR")]
	pub models_dir: Option<PathBuf>,

	/// Fixed seed for text-to-image noise
	#[arg(long = "seed", global = true)]
	pub seed: Option<u64>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// List selectable models
	List,

	/// Load a model and run it once
	Run {
		/// Model label (see `modeldesk list`)
		#[arg(short = 'm', long = "model", value_name = "LABEL")]
		model: String,

		/// Prompt for text-to-image (blank uses a built-in prompt)
		#[arg(long = "prompt", value_name = "TEXT")]
		prompt: Option<String>,

		/// Image to classify
		#[arg(short = 'i', long = "image", value_name = "PATH")]
		image: Option<PathBuf>,

		/// Where to save a generated image
		#[arg(short = 'o', long = "output", value_name = "PATH", default_value = crate::config::DEFAULT_OUTPUT)]
		output: PathBuf,

		/// Open the saved image in the default viewer
		#[arg(long = "open")]
		open: bool,
	},

	/// Interactive session: select, load, run and save
	Studio,

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
