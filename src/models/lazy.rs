//! Memoized pipeline handle

use anyhow::Result;

/// A pipeline built on first use and kept for the life of its model.
///
/// A failed construction stores nothing, so the next call tries again.
pub struct LazyPipeline<P: ?Sized> {
	handle: Option<Box<P>>,
}

impl<P: ?Sized> LazyPipeline<P> {
	pub fn new() -> Self {
		Self { handle: None }
	}

	pub fn is_loaded(&self) -> bool {
		self.handle.is_some()
	}

	/// Return the handle, running `construct` only if there is none yet
	pub fn get_or_load(&mut self, construct: impl FnOnce() -> Result<Box<P>>) -> Result<&mut P> {
		let handle = match self.handle.take() {
			Some(handle) => handle,
			None => construct()?,
		};
		Ok(&mut **self.handle.insert(handle))
	}
}

impl<P: ?Sized> Default for LazyPipeline<P> {
	fn default() -> Self {
		Self::new()
	}
}
