//! # User Interface
//!
//! Colored terminal output, clickable file links and call timing.

pub mod log;
pub mod timer;

pub use log::{debug, error, header, info, path_link, print_logo, success, warn, Log};
pub use timer::timed;
