//! Frame-driven smooth scrolling
//!
//! The animation is a plain value sampled with the current frame time. The
//! first sampled frame fixes the start time.

use super::easing::ease_in_out_quad;

/// One in-flight smooth scroll
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollAnimation {
    /// Scroll offset when the animation was requested
    pub start: f64,
    /// Signed distance to travel
    pub distance: f64,
    /// Duration in ms
    pub duration_ms: f64,
    /// Timestamp of the first frame, set on the first [`step`](Self::step)
    pub start_time: Option<f64>,
}

impl ScrollAnimation {
    pub fn new(start: f64, target: f64, duration_ms: f64) -> Self {
        Self {
            start,
            distance: target - start,
            duration_ms,
            start_time: None,
        }
    }

    /// Final scroll offset
    pub fn target(&self) -> f64 {
        self.start + self.distance
    }

    /// Offset at `elapsed` ms, holding the target once the duration is reached
    ///
    /// A frame arriving after the duration lands exactly on the target
    /// instead of the slightly short value the raw curve gives there.
    pub fn position_at(&self, elapsed: f64) -> f64 {
        let t = elapsed.clamp(0.0, self.duration_ms);
        ease_in_out_quad(t, self.start, self.distance, self.duration_ms)
    }

    /// Advance to a frame timestamp
    ///
    /// Returns the offset to scroll to and whether another frame is needed.
    pub fn step(&mut self, timestamp: f64) -> (f64, bool) {
        let start_time = *self.start_time.get_or_insert(timestamp);
        let elapsed = timestamp - start_time;
        (self.position_at(elapsed), elapsed < self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_stays_at_start() {
        let mut anim = ScrollAnimation::new(100.0, 900.0, 800.0);
        let (pos, more) = anim.step(5_000.0);
        assert_eq!(pos, 100.0);
        assert!(more);
        assert_eq!(anim.start_time, Some(5_000.0));
    }

    #[test]
    fn test_final_frame_lands_on_target() {
        let mut anim = ScrollAnimation::new(100.0, 900.0, 800.0);
        anim.step(0.0);
        let (mid, more) = anim.step(400.0);
        assert!((mid - 500.0).abs() < 1e-9);
        assert!(more);

        // A late frame past the duration still lands exactly on the target
        let (end, more) = anim.step(816.7);
        assert_eq!(end, 900.0);
        assert!(!more);
    }

    #[test]
    fn test_exact_duration_frame_ends() {
        let mut anim = ScrollAnimation::new(0.0, 300.0, 800.0);
        anim.step(10.0);
        assert_eq!(anim.step(810.0), (300.0, false));
    }

    #[test]
    fn test_target() {
        let anim = ScrollAnimation::new(640.0, 120.0, 800.0);
        assert_eq!(anim.distance, -520.0);
        assert_eq!(anim.target(), 120.0);
    }
}
