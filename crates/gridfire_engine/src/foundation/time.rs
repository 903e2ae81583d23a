//! Time management utilities

use std::time::Instant;

/// Wall-clock stopwatch for measuring how long a run took
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Start measuring now
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Seconds since the stopwatch started
    pub fn elapsed_secs(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }
}

/// Fixed-step accumulator for deterministic simulation ticks
///
/// Variable frame deltas go in, a whole number of fixed steps comes out.
/// The number of steps per frame is capped so a long stall cannot trigger an
/// unbounded catch-up burst.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
}

impl FixedTimestep {
    /// Create an accumulator producing steps of `step` seconds
    pub fn new(step: f32, max_steps_per_frame: u32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps_per_frame: max_steps_per_frame.max(1),
        }
    }

    /// Size of one step in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame delta and return how many fixed steps are now due
    pub fn accumulate(&mut self, frame_delta: f32) -> u32 {
        if self.step <= 0.0 {
            return 0;
        }

        self.accumulator += frame_delta.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps_per_frame {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps_per_frame && self.accumulator >= self.step {
            log::warn!(
                "Simulation fell behind by {:.3}s, dropping the backlog",
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        steps
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        if self.step > 0.0 {
            self.accumulator / self.step
        } else {
            0.0
        }
    }
}

/// Count-down timer used for respawns and fire intervals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f32,
    remaining: f32,
}

impl Countdown {
    /// Create a countdown that starts full
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: duration,
        }
    }

    /// Advance the countdown, returning true on the tick it reaches zero
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= delta;
        self.remaining <= 0.0
    }

    /// Restart from the full duration
    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    /// Whether the countdown has run out
    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds left before the countdown finishes
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    /// Full duration of the countdown
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_timestep_accumulates_whole_steps() {
        let mut stepper = FixedTimestep::new(0.5, 8);
        assert_eq!(stepper.accumulate(0.25), 0);
        assert_eq!(stepper.accumulate(0.25), 1);
        assert_eq!(stepper.accumulate(1.1), 2);
        assert_relative_eq!(stepper.alpha(), 0.2, epsilon = 1e-4);
    }

    #[test]
    fn test_fixed_timestep_caps_catch_up() {
        let mut stepper = FixedTimestep::new(0.1, 3);
        assert_eq!(stepper.accumulate(10.0), 3);
        assert_relative_eq!(stepper.alpha(), 0.0);
    }

    #[test]
    fn test_stopwatch_never_runs_backwards() {
        let stopwatch = Stopwatch::start();
        let first = stopwatch.elapsed_secs();
        assert!(first >= 0.0);
        assert!(stopwatch.elapsed_secs() >= first);
    }

    #[test]
    fn test_countdown_fires_once() {
        let mut countdown = Countdown::new(1.0);
        assert!(!countdown.tick(0.6));
        assert!(countdown.tick(0.6));
        assert!(countdown.is_finished());
        assert!(!countdown.tick(0.6));

        countdown.reset();
        assert!(!countdown.is_finished());
        assert_relative_eq!(countdown.remaining(), 1.0);
    }
}
