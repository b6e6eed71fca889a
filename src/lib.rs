//! # modeldesk Library
//!
//! Pick a pretrained model by label, load it once, run it on a prompt or an image.
//! Inference runs through ONNX Runtime; models share one `Model` contract with
//! lazily built pipelines.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod models;
pub mod pipelines;
pub mod processing;
pub mod runtime;
pub mod ui;
