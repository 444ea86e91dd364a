//! Indeterminate progress animation
//!
//! The bar carries no completion value. A highlighted segment sweeps across
//! the track and wraps around; its position is a pure function of elapsed
//! time so any surface can redraw a frame at any moment.

use std::time::Duration;

/// Default time for one sweep across the track
pub const DEFAULT_SWEEP: Duration = Duration::from_millis(1_400);

/// Fraction of the track covered by the moving segment
pub const DEFAULT_SEGMENT_FRACTION: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndeterminateBar {
    sweep: Duration,
    segment_fraction: f32,
}

impl IndeterminateBar {
    pub fn new(sweep: Duration, segment_fraction: f32) -> Self {
        Self {
            sweep: sweep.max(Duration::from_millis(1)),
            segment_fraction: segment_fraction.clamp(0.05, 1.0),
        }
    }

    /// Animation phase in [0, 1)
    pub fn phase(&self, elapsed: Duration) -> f32 {
        let sweep = self.sweep.as_nanos();
        (elapsed.as_nanos() % sweep) as f32 / sweep as f32
    }

    /// Visible part of the segment as (offset, width) within a track of
    /// `track_width`, clipped to the track.
    pub fn segment(&self, elapsed: Duration, track_width: f32) -> (f32, f32) {
        if track_width <= 0.0 {
            return (0.0, 0.0);
        }

        let seg = track_width * self.segment_fraction;
        // Travel from fully off the left edge to fully off the right edge.
        let start = -seg + self.phase(elapsed) * (track_width + seg);
        let end = start + seg;

        let left = start.max(0.0);
        let right = end.min(track_width);
        (left, (right - left).max(0.0))
    }
}

impl Default for IndeterminateBar {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP, DEFAULT_SEGMENT_FRACTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACK: f32 = 260.0;

    #[test]
    fn phase_wraps_each_sweep() {
        let bar = IndeterminateBar::default();
        assert_eq!(bar.phase(Duration::ZERO), 0.0);
        assert!((bar.phase(Duration::from_millis(700)) - 0.5).abs() < 1e-4);
        assert_eq!(bar.phase(DEFAULT_SWEEP), 0.0);
    }

    #[test]
    fn segment_starts_off_track() {
        let bar = IndeterminateBar::default();
        let (_, width) = bar.segment(Duration::ZERO, TRACK);
        assert_eq!(width, 0.0);
    }

    #[test]
    fn segment_is_always_within_track() {
        let bar = IndeterminateBar::default();
        for ms in (0..3_000).step_by(17) {
            let (x, w) = bar.segment(Duration::from_millis(ms), TRACK);
            assert!(x >= 0.0);
            assert!(w >= 0.0);
            assert!(x + w <= TRACK + 1e-3);
        }
    }

    #[test]
    fn segment_moves_over_time() {
        let bar = IndeterminateBar::default();
        let (a, _) = bar.segment(Duration::from_millis(500), TRACK);
        let (b, _) = bar.segment(Duration::from_millis(900), TRACK);
        assert!(b > a);
    }

    #[test]
    fn full_width_mid_sweep() {
        let bar = IndeterminateBar::default();
        let (_, w) = bar.segment(Duration::from_millis(700), TRACK);
        assert!((w - TRACK * DEFAULT_SEGMENT_FRACTION).abs() < 1e-3);
    }

    #[test]
    fn empty_track() {
        let bar = IndeterminateBar::default();
        assert_eq!(bar.segment(Duration::from_millis(300), 0.0), (0.0, 0.0));
    }
}
