//! Vision Transformer (ViT) image classifier

use anyhow::{Context, Result};
use image::DynamicImage;
use ort::session::Session;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::ImageClassifier;
use crate::config::{
	CLASSIFIER_INPUT_SIZE, CLASSIFIER_MEAN, CLASSIFIER_STD, CLASSIFIER_TOP_K, MODEL_CONFIG, ONNX_MODEL,
};
use crate::core::Prediction;

#[derive(Debug, Deserialize)]
struct ClassifierConfig {
	id2label: HashMap<String, String>,
}

pub struct VitClassifier {
	session: Session,
	labels: Vec<String>,
}

impl VitClassifier {
	pub fn load(model_dir: &Path) -> Result<Self> {
		let model_path = model_dir.join(ONNX_MODEL);
		if !model_path.exists() {
			anyhow::bail!("Classifier model file does not exist: {}", model_path.display());
		}

		let labels = load_labels(&model_dir.join(MODEL_CONFIG))?;
		let session = crate::runtime::create_session(&model_path)
			.context("Failed to load classification model")?;

		crate::ui::debug(&format!("Classifier ready with {} labels", labels.len()));
		Ok(Self { session, labels })
	}
}

impl ImageClassifier for VitClassifier {
	fn classify(&mut self, image: &DynamicImage) -> Result<Vec<Prediction>> {
		let pixels = preprocess(image);
		let input = ort::value::Value::from_array(pixels)?;

		let outputs = self.session.run(ort::inputs!["pixel_values" => input])?;
		let logits = outputs.get("logits").context("No logits output found")?;
		let (_, data) = logits.try_extract_tensor::<f32>()?;

		Ok(top_k(&softmax(data), &self.labels, CLASSIFIER_TOP_K))
	}
}

fn load_labels(config_path: &Path) -> Result<Vec<String>> {
	let raw = std::fs::read_to_string(config_path)
		.with_context(|| format!("Failed to read {}", config_path.display()))?;
	let config: ClassifierConfig = serde_json::from_str(&raw)
		.with_context(|| format!("Invalid classifier config: {}", config_path.display()))?;
	Ok(labels_from_map(config.id2label))
}

/// Dense id → label table; gaps become `LABEL_<id>`
fn labels_from_map(id2label: HashMap<String, String>) -> Vec<String> {
	let indexed: HashMap<usize, String> = id2label
		.into_iter()
		.filter_map(|(id, label)| id.parse().ok().map(|id| (id, label)))
		.collect();
	let len = indexed.keys().max().map_or(0, |max| max + 1);

	(0..len)
		.map(|id| indexed.get(&id).cloned().unwrap_or_else(|| format!("LABEL_{}", id)))
		.collect()
}

/// Resize, rescale to [0, 1] and normalize into an NCHW tensor
fn preprocess(img: &DynamicImage) -> (Vec<usize>, Vec<f32>) {
	use image::imageops::FilterType;

	let resized = img.resize_exact(CLASSIFIER_INPUT_SIZE, CLASSIFIER_INPUT_SIZE, FilterType::Triangle);
	let rgb = resized.to_rgb8();
	let size = CLASSIFIER_INPUT_SIZE as usize;
	let plane = size * size;

	let mut data = vec![0.0f32; 3 * plane];
	for (x, y, px) in rgb.enumerate_pixels() {
		let idx = y as usize * size + x as usize;
		for c in 0..3 {
			data[c * plane + idx] = (px[c] as f32 / 255.0 - CLASSIFIER_MEAN) / CLASSIFIER_STD;
		}
	}

	(vec![1, 3, size, size], data)
}

fn softmax(logits: &[f32]) -> Vec<f32> {
	let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
	let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
	let sum: f32 = exps.iter().sum();
	exps.into_iter().map(|v| v / sum).collect()
}

fn top_k(scores: &[f32], labels: &[String], k: usize) -> Vec<Prediction> {
	let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
	// Stable sort keeps lower ids first on equal scores
	ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

	ranked
		.into_iter()
		.take(k)
		.map(|(id, score)| {
			let label = labels.get(id).cloned().unwrap_or_else(|| format!("LABEL_{}", id));
			Prediction::new(label, score)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn softmax_sums_to_one_and_keeps_order() {
		let probs = softmax(&[1.0, 3.0, 2.0]);
		let sum: f32 = probs.iter().sum();
		assert!((sum - 1.0).abs() < 1e-5);
		assert!(probs[1] > probs[2] && probs[2] > probs[0]);
	}

	#[test]
	fn softmax_survives_large_logits() {
		let probs = softmax(&[1000.0, 1000.0]);
		assert!((probs[0] - 0.5).abs() < 1e-5);
	}

	#[test]
	fn top_k_ranks_by_score() {
		let labels: Vec<String> = ["cat", "dog", "muffin", "owl"].iter().map(|s| s.to_string()).collect();
		let preds = top_k(&[0.1, 0.6, 0.2, 0.1], &labels, 3);

		let names: Vec<&str> = preds.iter().map(|p| p.label.as_str()).collect();
		assert_eq!(names, ["dog", "muffin", "cat"]);
	}

	#[test]
	fn labels_fill_gaps() {
		let map = HashMap::from([
			("0".to_string(), "tench".to_string()),
			("2".to_string(), "goldfish".to_string()),
		]);
		assert_eq!(labels_from_map(map), ["tench", "LABEL_1", "goldfish"]);
	}

	#[test]
	fn preprocess_produces_normalized_nchw() {
		let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(10, 10, image::Rgb([255, 0, 128])));
		let (shape, data) = preprocess(&img);
		let size = CLASSIFIER_INPUT_SIZE as usize;
		let plane = size * size;

		assert_eq!(shape, vec![1, 3, size, size]);
		assert!((data[0] - 1.0).abs() < 1e-5);
		assert!((data[plane] + 1.0).abs() < 1e-5);
		assert!(data[2 * plane].abs() < 0.01);
	}

	#[test]
	fn load_fails_without_model_file() {
		let dir = tempfile::tempdir().unwrap();
		let err = VitClassifier::load(dir.path()).err().unwrap();
		assert!(err.to_string().contains("does not exist"));
	}
}
