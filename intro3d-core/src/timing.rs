//! Frame rate bookkeeping for the window title.

use std::time::{Duration, Instant};

/// Averages frame rate over fixed windows of wall-clock time.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    started: Option<Instant>,
    frames: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            started: None,
            frames: 0,
        }
    }

    /// Counts one frame. Returns the average rate each time a window closes.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let Some(started) = self.started else {
            self.started = Some(now);
            return None;
        };

        self.frames += 1;
        let elapsed = now.saturating_duration_since(started);
        if elapsed < self.window {
            return None;
        }

        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.started = Some(now);
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_window() {
        let mut counter = FpsCounter::default();
        let t0 = Instant::now();
        assert_eq!(counter.tick(t0), None);

        let frame = Duration::from_millis(20);
        let mut reports = Vec::new();
        for i in 1..=100 {
            if let Some(fps) = counter.tick(t0 + frame * i) {
                reports.push(fps);
            }
        }
        assert_eq!(reports.len(), 2);
        assert!((reports[0] - 50.0).abs() < 0.01);
    }

    #[test]
    fn clock_going_backwards_does_not_report() {
        let mut counter = FpsCounter::default();
        let t0 = Instant::now() + Duration::from_secs(5);
        counter.tick(t0);
        assert_eq!(counter.tick(t0 - Duration::from_secs(2)), None);
    }
}
