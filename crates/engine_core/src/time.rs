//! Time management for the simulation loop.
//!
//! The host frame callback supplies the elapsed milliseconds of each frame;
//! everything time-driven reads from here instead of a wall clock.

use std::time::Duration;

/// Accumulates per-frame elapsed time.
#[derive(Debug, Clone)]
pub struct Time {
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Advance by one frame of `elapsed_ms` milliseconds. Negative or
    /// non-finite values count as a zero-length frame.
    pub fn advance(&mut self, elapsed_ms: f32) {
        let ms = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
        self.delta = Duration::from_secs_f64(f64::from(ms) / 1000.0);
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second implied by the last frame.
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_elapsed_seconds() {
        let mut time = Time::new();
        for _ in 0..60 {
            time.advance(1000.0 / 60.0);
        }
        assert_eq!(time.frame_count(), 60);
        assert!((time.elapsed_seconds() - 1.0).abs() < 1e-4);
        assert!((time.fps() - 60.0).abs() < 0.01);
    }

    #[test]
    fn bad_frame_lengths_count_as_zero() {
        let mut time = Time::new();
        time.advance(-5.0);
        time.advance(f32::NAN);
        assert_eq!(time.frame_count(), 2);
        assert_eq!(time.elapsed_seconds(), 0.0);
        assert_eq!(time.fps(), 0.0);
    }
}
