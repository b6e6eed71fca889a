//! Euler-ancestral sampler with trailing timestep spacing (SD-Turbo schedule)

use rand::{Rng, RngExt};

use crate::config::{BETA_END, BETA_START, TRAIN_TIMESTEPS};

pub struct EulerAncestral {
	timesteps: Vec<i64>,
	/// One sigma per timestep plus a trailing 0.0
	sigmas: Vec<f32>,
}

impl EulerAncestral {
	pub fn new(steps: usize) -> Self {
		let steps = steps.clamp(1, TRAIN_TIMESTEPS);
		let train_sigmas = train_sigmas();

		let stride = TRAIN_TIMESTEPS as f64 / steps as f64;
		let timesteps: Vec<i64> = (0..steps)
			.map(|k| (TRAIN_TIMESTEPS as f64 - k as f64 * stride).round() as i64 - 1)
			.collect();

		let mut sigmas: Vec<f32> = timesteps
			.iter()
			.map(|&t| train_sigmas[t as usize] as f32)
			.collect();
		sigmas.push(0.0);

		Self { timesteps, sigmas }
	}

	pub fn timesteps(&self) -> &[i64] {
		&self.timesteps
	}

	pub fn sigmas(&self) -> &[f32] {
		&self.sigmas
	}

	/// Scale for the initial Gaussian latent
	pub fn init_noise_sigma(&self) -> f32 {
		self.sigmas.iter().copied().fold(0.0, f32::max)
	}

	/// Divide the latent by sqrt(sigma² + 1) before feeding the UNet
	pub fn scale_input(&self, sample: &[f32], step: usize) -> Vec<f32> {
		let sigma = self.sigmas[step];
		let scale = (sigma * sigma + 1.0).sqrt();
		sample.iter().map(|v| v / scale).collect()
	}

	/// Advance `sample` one step given the predicted noise
	pub fn step<R: Rng>(&self, noise_pred: &[f32], step: usize, sample: &[f32], rng: &mut R) -> Vec<f32> {
		let sigma = self.sigmas[step];
		let sigma_to = self.sigmas[step + 1];

		let sigma_up = (sigma_to * sigma_to * (sigma * sigma - sigma_to * sigma_to) / (sigma * sigma)).sqrt();
		let sigma_down = (sigma_to * sigma_to - sigma_up * sigma_up).max(0.0).sqrt();
		let dt = sigma_down - sigma;

		sample
			.iter()
			.zip(noise_pred)
			.map(|(&x, &eps)| {
				let denoised = x - sigma * eps;
				let derivative = (x - denoised) / sigma;
				let mut next = x + derivative * dt;
				if sigma_up > 0.0 {
					next += gaussian(rng) * sigma_up;
				}
				next
			})
			.collect()
	}
}

/// Noise level for every training timestep under the scaled-linear beta schedule
fn train_sigmas() -> Vec<f64> {
	let (start, end) = (BETA_START.sqrt(), BETA_END.sqrt());
	let last = (TRAIN_TIMESTEPS - 1) as f64;

	let mut alpha_cumprod = 1.0;
	(0..TRAIN_TIMESTEPS)
		.map(|i| {
			let beta = (start + (end - start) * i as f64 / last).powi(2);
			alpha_cumprod *= 1.0 - beta;
			((1.0 - alpha_cumprod) / alpha_cumprod).sqrt()
		})
		.collect()
}

/// Standard normal sample (Box-Muller)
pub fn gaussian<R: Rng>(rng: &mut R) -> f32 {
	let u1: f32 = rng.random_range(f32::EPSILON..1.0);
	let u2: f32 = rng.random_range(0.0..1.0);
	(-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}
