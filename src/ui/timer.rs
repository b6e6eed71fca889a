//! Elapsed-time logging around blocking model calls

use std::time::{Duration, Instant};

/// Run `action`, log how long it took under `label`, and hand back its result.
pub fn timed<T>(label: &str, action: impl FnOnce() -> T) -> T {
	let start = Instant::now();
	let out = action();
	super::debug(&format!("[timer] {}: {}", label, format_elapsed(start.elapsed())));
	out
}

fn format_elapsed(elapsed: Duration) -> String {
	format!("{:.1} ms", elapsed.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn returns_the_action_result() {
		let value = timed("answer", || 6 * 7);
		assert_eq!(value, 42);
	}

	#[test]
	fn runs_the_action_exactly_once() {
		let mut calls = 0;
		timed("count", || calls += 1);
		assert_eq!(calls, 1);
	}

	#[test]
	fn passes_errors_through() {
		let out: anyhow::Result<()> = timed("fail", || anyhow::bail!("boom"));
		assert_eq!(out.unwrap_err().to_string(), "boom");
	}

	#[test]
	fn formats_milliseconds_with_one_decimal() {
		assert_eq!(format_elapsed(Duration::from_micros(1500)), "1.5 ms");
	}
}
