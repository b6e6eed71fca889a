//! Domain errors callers need to tell apart

use thiserror::Error;

use super::TaskKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
	#[error("Unknown model selection: {0:?}")]
	InvalidSelection(String),

	#[error("{task} model cannot run on {input} input")]
	UnsupportedInput { task: TaskKind, input: &'static str },

	#[error("{0} pipeline returned no output")]
	EmptyOutput(TaskKind),
}
