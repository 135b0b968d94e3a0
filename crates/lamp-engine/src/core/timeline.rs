use std::time::Duration;

/// Clock of a single animation.
/// Tracks time since start; never runs backwards, even if timestamps do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    /// Timestamp the animation started at.
    start: Duration,
    /// Length of the animation.
    duration: Duration,
    /// Time elapsed as of the latest update.
    elapsed: Duration,
}

impl Timeline {
    pub fn new(start: Duration, duration: Duration) -> Self {
        Self {
            start,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Move the clock to `now`. Timestamps before the start count as zero,
    /// and a timestamp older than the last one leaves the clock where it was.
    pub fn update(&mut self, now: Duration) -> Duration {
        let elapsed = now.saturating_sub(self.start);
        self.elapsed = self.elapsed.max(elapsed);
        self.elapsed
    }

    pub fn start(&self) -> Duration {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Normalized progress (0.0 to 1.0).
    pub fn progress(&self) -> f32 {
        fraction(self.elapsed, self.duration)
    }

    pub fn done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// `part / whole`, clamped to [0, 1]. A zero `whole` counts as finished.
pub fn fraction(part: Duration, whole: Duration) -> f32 {
    if whole.is_zero() {
        1.0
    } else {
        (part.as_secs_f64() / whole.as_secs_f64()).clamp(0.0, 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn progresses_linearly() {
        let mut tl = Timeline::new(ms(1000), ms(200));
        tl.update(ms(1050));
        assert!((tl.progress() - 0.25).abs() < 1e-6);
        assert!(!tl.done());
        tl.update(ms(1200));
        assert!(tl.done());
    }

    #[test]
    fn clamps_past_the_end() {
        let mut tl = Timeline::new(ms(0), ms(100));
        tl.update(ms(10_000));
        assert_eq!(tl.progress(), 1.0);
    }

    #[test]
    fn timestamps_before_start_clamp_to_zero() {
        let mut tl = Timeline::new(ms(500), ms(100));
        assert_eq!(tl.update(ms(400)), Duration::ZERO);
        assert_eq!(tl.progress(), 0.0);
    }

    #[test]
    fn never_runs_backwards() {
        let mut tl = Timeline::new(ms(0), ms(100));
        tl.update(ms(60));
        tl.update(ms(30));
        assert_eq!(tl.elapsed(), ms(60));
    }

    #[test]
    fn zero_whole_is_finished() {
        assert_eq!(fraction(ms(0), Duration::ZERO), 1.0);
    }
}
