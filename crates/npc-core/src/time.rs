//! Simulation time model.
//!
//! # Design
//!
//! The authoritative side runs on a fixed step (60 Hz by default) that is
//! independent of the render rate.  The host hands us variable frame times;
//! `FixedStep` accumulates them and reports how many whole steps to run:
//!
//!   steps = floor((accumulator + frame_secs) / step_secs)
//!
//! Counting steps as an integer `Tick` keeps elapsed time exact
//! (`tick * step_secs`) instead of summing floats every frame.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute fixed-step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

/// Ticks from `rhs` to `self`; `0` when `rhs` is later.
impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0.saturating_sub(rhs.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── FixedStep ─────────────────────────────────────────────────────────────────

/// Converts variable frame times into a whole number of fixed steps.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedStep {
    /// Length of one step in seconds (`1 / tick_rate_hz`).
    pub step_secs: f32,
    /// Upper bound on steps reported by one `advance` call.  Frame time
    /// beyond this is dropped rather than replayed later.
    pub max_steps_per_frame: u32,
    /// Unconsumed frame time, always `< step_secs` after `advance`.
    pub accumulator: f32,
    /// Steps taken so far.
    pub current_tick: Tick,
}

impl FixedStep {
    /// Default authoritative step rate.
    pub const DEFAULT_HZ: u32 = 60;

    /// A stepper running at `tick_rate_hz`, catching up at most 8 steps per
    /// frame.
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            step_secs:           1.0 / tick_rate_hz.max(1) as f32,
            max_steps_per_frame: 8,
            accumulator:         0.0,
            current_tick:        Tick::ZERO,
        }
    }

    /// Override the per-frame catch-up limit.
    pub fn with_max_steps(mut self, max_steps_per_frame: u32) -> Self {
        self.max_steps_per_frame = max_steps_per_frame.max(1);
        self
    }

    /// Feed `frame_secs` of wall time; returns how many fixed steps to run
    /// now.  `current_tick` is advanced by the same amount.
    pub fn advance(&mut self, frame_secs: f32) -> u32 {
        self.accumulator += frame_secs.max(0.0);
        let mut steps = 0;
        while self.accumulator >= self.step_secs && steps < self.max_steps_per_frame {
            self.accumulator -= self.step_secs;
            steps += 1;
        }
        if self.accumulator >= self.step_secs {
            // Spiral guard: drop the backlog instead of replaying it.
            self.accumulator %= self.step_secs;
        }
        self.current_tick = self.current_tick.offset(steps as u64);
        steps
    }

    /// Simulated seconds covered by the steps taken so far.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.step_secs as f64
    }

    /// How many steps span `secs` seconds (rounds up).
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (secs / self.step_secs).ceil().max(0.0) as u64
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HZ)
    }
}

impl fmt::Display for FixedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_tick, self.elapsed_secs())
    }
}
