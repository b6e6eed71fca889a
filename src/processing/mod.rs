//! Media file processing

pub mod image;
