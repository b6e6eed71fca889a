//! Image file helpers

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};

use crate::config::PREVIEW_SIZE;

/// Extensions accepted for classifier input
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// Open an image file as RGB
pub fn open(path: &Path) -> Result<DynamicImage> {
	crate::ui::debug(&format!("Opening image: {}", path.display()));
	let img = image::open(path).with_context(|| {
		format!(
			"Failed to open image. File may be corrupted or in an unsupported format: {}",
			path.display()
		)
	})?;
	Ok(DynamicImage::ImageRgb8(img.to_rgb8()))
}

pub fn is_supported(path: &Path) -> bool {
	path.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// Downscaled copy that fits the preview box, keeping aspect ratio
pub fn preview(img: &DynamicImage) -> DynamicImage {
	if img.width() <= PREVIEW_SIZE && img.height() <= PREVIEW_SIZE {
		return img.clone();
	}
	img.thumbnail(PREVIEW_SIZE, PREVIEW_SIZE)
}

/// Path with `.png` appended when it has no extension
pub fn with_default_extension(path: &Path) -> PathBuf {
	if path.extension().is_some() {
		path.to_path_buf()
	} else {
		path.with_extension("png")
	}
}

/// Save in the format implied by the extension (PNG when missing); returns the written path
pub fn save(img: &DynamicImage, path: &Path) -> Result<PathBuf> {
	let path = with_default_extension(path);
	img.save(&path)
		.with_context(|| format!("Failed to save image: {}", path.display()))?;
	Ok(path)
}
