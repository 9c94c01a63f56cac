//! Animation helpers
//!
//! Easing curves and a fade tracker driven by frame deltas rather than the
//! wall clock, so the same code runs under the event loop and in tests.

use ratatui::prelude::*;
use std::time::Duration;

/// Fade tracker for screen transitions
#[derive(Clone, Debug)]
pub struct FadeState {
    elapsed: Duration,
    duration: Duration,
    direction: FadeDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeDirection {
    In,
    Out,
}

impl FadeState {
    /// Fade from dark to visible
    pub fn fade_in(duration_ms: u64) -> Self {
        Self::new(duration_ms, FadeDirection::In)
    }

    /// Fade from visible to dark
    pub fn fade_out(duration_ms: u64) -> Self {
        Self::new(duration_ms, FadeDirection::Out)
    }

    fn new(duration_ms: u64, direction: FadeDirection) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: Duration::from_millis(duration_ms),
            direction,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = (self.elapsed + delta).min(self.duration);
    }

    pub fn progress(&self) -> f32 {
        progress(self.elapsed, self.duration)
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Alpha value (0.0 to 1.0)
    pub fn alpha(&self) -> f32 {
        let p = self.progress();
        match self.direction {
            FadeDirection::In => ease_out_cubic(p),
            FadeDirection::Out => 1.0 - ease_in_cubic(p),
        }
    }
}

/// Fraction of `total` covered by `elapsed`, clamped to 0..=1
pub fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_cubic(t: f32) -> f32 {
    t.powi(3)
}

/// Apply alpha to a color (simple dimming)
pub fn apply_alpha(color: Color, alpha: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * alpha) as u8;
            let g = (g as f32 * alpha) as u8;
            let b = (b as f32 * alpha) as u8;
            Color::Rgb(r, g, b)
        }
        // Indexed colors have no channels to scale
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_reaches_full_alpha() {
        let mut fade = FadeState::fade_in(200);
        assert_eq!(fade.alpha(), 0.0);

        fade.advance(Duration::from_millis(100));
        assert!(fade.alpha() > 0.5 && fade.alpha() < 1.0);
        assert!(!fade.is_done());

        fade.advance(Duration::from_millis(500));
        assert!(fade.is_done());
        assert_eq!(fade.alpha(), 1.0);
    }

    #[test]
    fn test_zero_length_is_complete() {
        assert_eq!(progress(Duration::ZERO, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_apply_alpha_scales_rgb() {
        assert_eq!(apply_alpha(Color::Rgb(200, 100, 50), 0.5), Color::Rgb(100, 50, 25));
        assert_eq!(apply_alpha(Color::Red, 0.5), Color::Red);
    }
}
