//! SD-Turbo text-to-image: CLIP text encoder, UNet denoiser and VAE decoder

use anyhow::{Context, Result};
use image::{DynamicImage, RgbImage};
use ort::session::Session;
use ort::value::Value;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::path::Path;
use tokenizers::Tokenizer;

use super::scheduler::{gaussian, EulerAncestral};
use super::{GenerationParams, ImageGenerator};
use crate::config::{
	LATENT_CHANNELS, LATENT_SIZE, ONNX_MODEL, TEXT_ENCODER_DIR, TEXT_MAX_TOKENS, TEXT_PAD_TOKEN, TOKENIZER,
	UNET_DIR, VAE_DECODER_DIR, VAE_SCALE_FACTOR,
};

pub struct SdTurboGenerator {
	text_encoder: Session,
	unet: Session,
	vae_decoder: Session,
	tokenizer: Tokenizer,
}

impl SdTurboGenerator {
	pub fn load(model_dir: &Path) -> Result<Self> {
		let part = |dir: &str| -> Result<Session> {
			let path = model_dir.join(dir).join(ONNX_MODEL);
			if !path.exists() {
				anyhow::bail!("Diffusion model file does not exist: {}", path.display());
			}
			crate::ui::debug(&format!("Loading {}: {}", dir, path.display()));
			crate::runtime::create_session(&path).with_context(|| format!("Failed to load {}", dir))
		};

		let tokenizer_path = model_dir.join(TOKENIZER);
		let tokenizer = Tokenizer::from_file(&tokenizer_path)
			.map_err(|e| anyhow::anyhow!("Failed to load tokenizer {}: {}", tokenizer_path.display(), e))?;

		Ok(Self {
			text_encoder: part(TEXT_ENCODER_DIR)?,
			unet: part(UNET_DIR)?,
			vae_decoder: part(VAE_DECODER_DIR)?,
			tokenizer,
		})
	}

	fn encode_prompt(&mut self, prompt: &str) -> Result<Vec<f32>> {
		let encoding = self.tokenizer
			.encode(prompt, true)
			.map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

		let ids = pad_tokens(encoding.get_ids());
		let input = Value::from_array((vec![1, TEXT_MAX_TOKENS], ids))?;

		let outputs = self.text_encoder.run(ort::inputs!["input_ids" => input])?;
		let hidden = outputs.get("last_hidden_state").context("No last_hidden_state output found")?;
		let (_, data) = hidden.try_extract_tensor::<f32>()?;

		Ok(data.to_vec())
	}

	fn predict_noise(&mut self, latent: Vec<f32>, timestep: i64, hidden: &[f32]) -> Result<Vec<f32>> {
		let hidden_dim = hidden.len() / TEXT_MAX_TOKENS;
		let sample = Value::from_array((latent_shape(), latent))?;
		let timestep = Value::from_array((vec![1], vec![timestep]))?;
		let states = Value::from_array((vec![1, TEXT_MAX_TOKENS, hidden_dim], hidden.to_vec()))?;

		let outputs = self.unet.run(ort::inputs![
			"sample" => sample,
			"timestep" => timestep,
			"encoder_hidden_states" => states
		])?;
		let noise = outputs.get("out_sample").context("No out_sample output found")?;
		let (_, data) = noise.try_extract_tensor::<f32>()?;

		Ok(data.to_vec())
	}

	fn decode(&mut self, latent: &[f32]) -> Result<DynamicImage> {
		let scaled: Vec<f32> = latent.iter().map(|v| v / VAE_SCALE_FACTOR).collect();
		let input = Value::from_array((latent_shape(), scaled))?;

		let outputs = self.vae_decoder.run(ort::inputs!["latent_sample" => input])?;
		let sample = outputs.get("sample").context("No sample output found")?;
		let (shape, data) = sample.try_extract_tensor::<f32>()?;
		let dims: Vec<usize> = shape.iter().map(|&x| x as usize).collect();

		to_image(&dims, data)
	}
}

impl ImageGenerator for SdTurboGenerator {
	fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<Vec<DynamicImage>> {
		let scheduler = EulerAncestral::new(params.steps);
		let guided = params.guidance_scale > 1.0;
		let mut rng = match params.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::seed_from_u64(rand::rng().random_range(0..u64::MAX)),
		};

		let cond = self.encode_prompt(prompt)?;
		let uncond = if guided { Some(self.encode_prompt("")?) } else { None };

		let init_sigma = scheduler.init_noise_sigma();
		let mut latent: Vec<f32> = (0..latent_len()).map(|_| gaussian(&mut rng) * init_sigma).collect();

		for (step, &timestep) in scheduler.timesteps().iter().enumerate() {
			crate::ui::debug(&format!("Denoising step {} (t={})", step + 1, timestep));
			let input = scheduler.scale_input(&latent, step);

			let noise = match &uncond {
				Some(uncond) => {
					let text = self.predict_noise(input.clone(), timestep, &cond)?;
					let empty = self.predict_noise(input, timestep, uncond)?;
					guide(&empty, &text, params.guidance_scale)
				}
				None => self.predict_noise(input, timestep, &cond)?,
			};

			latent = scheduler.step(&noise, step, &latent, &mut rng);
		}

		Ok(vec![self.decode(&latent)?])
	}
}

fn latent_shape() -> Vec<usize> {
	vec![1, LATENT_CHANNELS, LATENT_SIZE, LATENT_SIZE]
}

fn latent_len() -> usize {
	LATENT_CHANNELS * LATENT_SIZE * LATENT_SIZE
}

/// Fixed-length CLIP input: truncate (keeping the end-of-text token) or pad
fn pad_tokens(ids: &[u32]) -> Vec<i32> {
	let mut ids = ids.to_vec();
	if ids.len() > TEXT_MAX_TOKENS {
		let eos = ids[ids.len() - 1];
		ids.truncate(TEXT_MAX_TOKENS - 1);
		ids.push(eos);
	}
	ids.resize(TEXT_MAX_TOKENS, TEXT_PAD_TOKEN);
	ids.into_iter().map(|id| id as i32).collect()
}

/// Classifier-free guidance
fn guide(uncond: &[f32], cond: &[f32], scale: f32) -> Vec<f32> {
	uncond
		.iter()
		.zip(cond)
		.map(|(u, c)| u + scale * (c - u))
		.collect()
}

/// NCHW decoder output in [-1, 1] → RGB image
fn to_image(dims: &[usize], data: &[f32]) -> Result<DynamicImage> {
	let [_, 3, height, width] = dims else {
		anyhow::bail!("Unexpected decoder output shape: {:?}", dims);
	};
	let (height, width) = (*height, *width);
	let plane = height * width;
	if data.len() < 3 * plane {
		anyhow::bail!("Decoder output too short: {} values for {:?}", data.len(), dims);
	}

	let img = RgbImage::from_fn(width as u32, height as u32, |x, y| {
		let idx = y as usize * width + x as usize;
		let channel = |c: usize| ((data[c * plane + idx] / 2.0 + 0.5).clamp(0.0, 1.0) * 255.0).round() as u8;
		image::Rgb([channel(0), channel(1), channel(2)])
	});

	Ok(DynamicImage::ImageRgb8(img))
}
