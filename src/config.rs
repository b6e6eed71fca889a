//! Application configuration and constants

use std::path::PathBuf;
use std::sync::OnceLock;

static CUSTOM_MODELS_DIR: OnceLock<PathBuf> = OnceLock::new();
static SEED: OnceLock<u64> = OnceLock::new();

pub const MODELS_DIR_ENV: &str = "MODELDESK_MODELS_DIR";

// === Model Identifiers ===
pub const TEXT_TO_IMAGE_MODEL: &str = "stabilityai/sd-turbo";
pub const IMAGE_CLASSIFICATION_MODEL: &str = "google/vit-base-patch16-224";

// === Model Files ===
pub const ONNX_MODEL: &str = "model.onnx";
pub const MODEL_CONFIG: &str = "config.json";
pub const TEXT_ENCODER_DIR: &str = "text_encoder";
pub const UNET_DIR: &str = "unet";
pub const VAE_DECODER_DIR: &str = "vae_decoder";
pub const TOKENIZER: &str = "tokenizer/tokenizer.json";

// === Classification Parameters ===
pub const CLASSIFIER_INPUT_SIZE: u32 = 224;
pub const CLASSIFIER_MEAN: f32 = 0.5;
pub const CLASSIFIER_STD: f32 = 0.5;
pub const CLASSIFIER_TOP_K: usize = 5;

// === Diffusion Parameters ===
pub const DEFAULT_PROMPT: &str = "A watercolor painting of a lighthouse on a cliff at sunset";
pub const INFERENCE_STEPS: usize = 1;
pub const GUIDANCE_SCALE: f32 = 0.0;
pub const TEXT_MAX_TOKENS: usize = 77;
pub const TEXT_PAD_TOKEN: u32 = 0;
pub const LATENT_CHANNELS: usize = 4;
pub const LATENT_SIZE: usize = 64;
pub const VAE_SCALE_FACTOR: f32 = 0.18215;
pub const TRAIN_TIMESTEPS: usize = 1000;
pub const BETA_START: f64 = 0.00085;
pub const BETA_END: f64 = 0.012;

// === Presentation ===
pub const PREVIEW_SIZE: u32 = 360;
pub const DEFAULT_OUTPUT: &str = "output.png";

pub fn set_models_dir(path: PathBuf) {
	let _ = CUSTOM_MODELS_DIR.set(path);
}

pub fn set_seed(seed: u64) {
	let _ = SEED.set(seed);
}

/// Seed for the diffusion noise, if one was pinned on the command line
pub fn seed() -> Option<u64> {
	SEED.get().copied()
}

/// Models directory (--models-dir, MODELDESK_MODELS_DIR, next to the executable, or ./models)
pub fn models_dir() -> PathBuf {
	if let Some(custom) = CUSTOM_MODELS_DIR.get() {
		crate::ui::debug(&format!("Using custom models dir: {}", custom.display()));
		return custom.clone();
	}

	if let Ok(env_path) = std::env::var(MODELS_DIR_ENV) {
		let path = PathBuf::from(&env_path);
		if path.is_dir() {
			crate::ui::debug(&format!("Using {}: {}", MODELS_DIR_ENV, env_path));
			return path;
		}
	}

	if let Ok(exe) = std::env::current_exe() {
		if let Some(dir) = exe.parent() {
			let models = dir.join("models");
			if models.is_dir() {
				crate::ui::debug(&format!("Found models at: {}", models.display()));
				return models;
			}
		}
	}

	PathBuf::from("models")
}

/// Directory holding the exported files for a model id, e.g. `models/google/vit-base-patch16-224`
pub fn model_dir(model_id: &str) -> PathBuf {
	model_id
		.split('/')
		.fold(models_dir(), |dir, part| dir.join(part))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn model_dir_nests_organisation_and_name() {
		let dir = model_dir(IMAGE_CLASSIFICATION_MODEL);
		assert!(dir.ends_with("google/vit-base-patch16-224"));
	}

	#[test]
	fn speed_budget_is_small() {
		assert!(INFERENCE_STEPS <= 4);
		assert_eq!(GUIDANCE_SCALE, 0.0);
		assert!(!DEFAULT_PROMPT.trim().is_empty());
	}
}
