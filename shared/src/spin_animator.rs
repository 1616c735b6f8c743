use serde::{Deserialize, Serialize};

// Easing function for smooth deceleration: 1 - (1-t)^4
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSample {
    pub angle: f64,
    pub progress: f64,
    pub finished: bool,
}

/// One spin timeline. The first sample anchors the start time; later samples use the
/// elapsed wall-clock time, so a stalled host resumes at the right point rather than late.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinAnimator {
    start_angle: f64,
    target_angle: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl SpinAnimator {
    pub fn new(start_angle: f64, target_angle: f64, duration_ms: f64) -> Self {
        Self {
            start_angle,
            target_angle,
            duration_ms,
            started_at: None,
        }
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn target_angle(&self) -> f64 {
        self.target_angle
    }

    pub fn started_at(&self) -> Option<f64> {
        self.started_at
    }

    /// Angle at host time `now_ms`. Once the duration has elapsed the angle is exactly the target.
    pub fn sample(&mut self, now_ms: f64) -> AnimationSample {
        let started_at = *self.started_at.get_or_insert(now_ms);
        // f64::max drops NaN, so a bogus timestamp reads as no progress
        let elapsed = (now_ms - started_at).max(0.0);

        let progress = if self.duration_ms > 0.0 {
            (elapsed / self.duration_ms).min(1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            return AnimationSample {
                angle: self.target_angle,
                progress: 1.0,
                finished: true,
            };
        }

        let eased = ease_out_quart(progress);
        AnimationSample {
            angle: self.start_angle + (self.target_angle - self.start_angle) * eased,
            progress,
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_quart() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert_eq!(ease_out_quart(0.5), 0.9375);
    }

    #[test]
    fn test_first_sample_anchors_start() {
        let mut animator = SpinAnimator::new(10.0, 1990.0, 4500.0);
        let first = animator.sample(12_345.0);
        assert_eq!(first.angle, 10.0);
        assert_eq!(first.progress, 0.0);
        assert!(!first.finished);
        assert_eq!(animator.started_at(), Some(12_345.0));

        let halfway = animator.sample(12_345.0 + 2250.0);
        assert_eq!(halfway.progress, 0.5);
        assert_eq!(halfway.angle, 10.0 + 1980.0 * 0.9375);
    }

    #[test]
    fn test_finishes_exactly_on_target() {
        let pairs = [(0.0, 1980.0), (123.456, 2847.1234567), (-720.1, 1.0e5 + 0.3)];
        for (start, target) in pairs {
            for late in [4500.0, 4500.0001, 60_000.0, 1.0e12] {
                let mut animator = SpinAnimator::new(start, target, 4500.0);
                animator.sample(1000.0);
                let done = animator.sample(1000.0 + late);
                assert_eq!(done.angle, target);
                assert_eq!(done.progress, 1.0);
                assert!(done.finished);
            }
        }
    }

    #[test]
    fn test_frames_never_move_backwards() {
        let mut animator = SpinAnimator::new(0.0, 2340.0, 4500.0);
        let mut last = animator.sample(0.0).angle;
        let mut now = 0.0;
        while now < 5000.0 {
            now += 16.7;
            let sample = animator.sample(now);
            assert!(sample.angle >= last);
            last = sample.angle;
        }
        assert_eq!(last, 2340.0);
    }

    #[test]
    fn test_clock_going_backwards_or_nan() {
        let mut animator = SpinAnimator::new(0.0, 720.0, 4500.0);
        animator.sample(5000.0);
        assert_eq!(animator.sample(4000.0).angle, 0.0);
        assert_eq!(animator.sample(f64::NAN).progress, 0.0);
    }

    #[test]
    fn test_zero_duration_settles_immediately() {
        let mut animator = SpinAnimator::new(0.0, 720.0, 0.0);
        assert!(animator.sample(1.0).finished);
    }
}
