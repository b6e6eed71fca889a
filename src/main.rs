//! modeldesk - run pretrained text-to-image and image classification models
//!
//! A command-line front end for selecting a model, loading it, running it on
//! user input and saving the result.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use modeldesk::cli::{Cli, Command};
use modeldesk::{commands, config, runtime, ui};

fn main() -> Result<()> {
	let cli = Cli::parse();

	ui::Log::set_verbose(cli.verbose);
	runtime::set_provider(cli.provider);
	if let Some(dir) = cli.models_dir {
		config::set_models_dir(dir);
	}
	if let Some(seed) = cli.seed {
		config::set_seed(seed);
	}

	match cli.command {
		Command::List => {
			commands::list::run();
			Ok(())
		}
		Command::Run { model, prompt, image, output, open } => {
			commands::run::run(&model, prompt.as_deref(), image.as_deref(), &output, open)
		}
		Command::Studio => commands::studio::run(),
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			match subcommand {
				Some(sub) => match cmd.find_subcommand_mut(&sub) {
					Some(sub_cmd) => sub_cmd.print_help()?,
					None => {
						ui::error(&format!("Unknown subcommand: {}", sub));
						cmd.print_help()?;
					}
				},
				None => cmd.print_help()?,
			}
			Ok(())
		}
	}
}
