//! Time management utilities

use std::time::{Duration, Instant};

/// Upper bound on a single measured frame, so a stall does not flood the
/// fixed-step loop with catch-up ticks
const MAX_FRAME_TIME: f32 = 0.25;

/// Fixed-timestep frame clock
///
/// Accumulates measured (or injected) frame time and hands out whole fixed
/// steps. Gameplay runs on the fixed step; rendering happens once per frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    fixed_step: f32,
    accumulator: f32,
    total_time: f32,
    frame_count: u64,
    last_frame: Option<Instant>,
}

impl FrameClock {
    /// Create a clock that ticks every `fixed_step` seconds
    pub fn new(fixed_step: f32) -> Self {
        Self {
            fixed_step,
            accumulator: 0.0,
            total_time: 0.0,
            frame_count: 0,
            last_frame: None,
        }
    }

    /// Measure wall-clock time since the previous call and feed it in
    ///
    /// The first call only starts the clock and yields no steps.
    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_frame = Some(now);
        self.advance(elapsed.as_secs_f32())
    }

    /// Feed `delta_time` seconds into the accumulator and return how many
    /// fixed steps are now due
    pub fn advance(&mut self, delta_time: f32) -> u32 {
        let delta_time = delta_time.clamp(0.0, MAX_FRAME_TIME);
        self.accumulator += delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;

        let mut steps = 0;
        while self.accumulator >= self.fixed_step {
            self.accumulator -= self.fixed_step;
            steps += 1;
        }
        steps
    }

    /// Length of one fixed step in seconds
    pub fn fixed_step(&self) -> f32 {
        self.fixed_step
    }

    /// Get the total elapsed time fed into the clock
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.fixed_step
    }

    /// Drop any pending time and restart wall-clock measurement
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_frame = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_yields_whole_steps() {
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(0.125), 0);
        assert_eq!(clock.advance(0.25), 1);
        assert_eq!(clock.advance(0.25), 1);
        assert!((clock.alpha() - 0.5).abs() < f32::EPSILON);
        assert_eq!(clock.frame_count(), 3);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut clock = FrameClock::new(0.125);
        assert_eq!(clock.advance(10.0), 2);
        assert!((clock.total_time() - MAX_FRAME_TIME).abs() < f32::EPSILON);

        // Half a second is still a stall: only a quarter of it counts
        let mut clock = FrameClock::new(0.25);
        assert_eq!(clock.advance(0.125), 0);
        assert_eq!(clock.advance(0.5), 1);
        assert!((clock.alpha() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_first_tick_starts_clock() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(), 0);
    }
}
