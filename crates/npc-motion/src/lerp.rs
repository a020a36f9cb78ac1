//! Buffered linear interpolation toward the latest pushed sample.

use std::collections::VecDeque;

use glam::Vec3;

/// Maximum number of samples a [`SampleBuffer`] keeps.
pub const SAMPLE_CAPACITY: usize = 4;

/// One pushed position and the local time it arrived at.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Sample {
    pub position: Vec3,
    pub time:     f32,
}

/// Recent samples, oldest first.
///
/// Samples older than the window are discarded on every push and every
/// update, except the most recent one, which is always kept.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self { samples: VecDeque::with_capacity(SAMPLE_CAPACITY) }
    }
}

impl SampleBuffer {
    /// Record `sample`, then drop what fell out of `window` before it.
    pub fn push(&mut self, sample: Sample, window: f32) {
        if self.samples.len() == SAMPLE_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.prune(sample.time, window);
    }

    /// Drop samples that arrived more than `window` seconds before `now`.
    pub fn prune(&mut self, now: f32, window: f32) {
        let horizon = now - window;
        while self.samples.len() > 1 && self.samples.front().is_some_and(|s| s.time < horizon) {
            self.samples.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

/// Smooths a stream of low-rate position samples into continuous motion.
///
/// Each [`push`][Self::push] restarts interpolation from wherever the output
/// currently is (possibly mid-flight) toward the new sample, so a sample that
/// arrives early never causes a jump.  [`update`][Self::update] covers the
/// distance linearly over `window` seconds and then holds the target exactly.
#[derive(Clone, Debug)]
pub struct BufferedLerp {
    start:    Vec3,
    target:   Vec3,
    output:   Vec3,
    progress: f32,
    window:   f32,
    clock:    f32,
    buffer:   SampleBuffer,
}

impl BufferedLerp {
    /// Start at rest on `initial`.  A non-positive `window` snaps straight to
    /// each new target.
    pub fn new(initial: Vec3, window: f32) -> Self {
        Self {
            start:    initial,
            target:   initial,
            output:   initial,
            progress: 1.0,
            window,
            clock:    0.0,
            buffer:   SampleBuffer::default(),
        }
    }

    /// Retarget toward `sample` from the current output.
    pub fn push(&mut self, sample: Vec3) {
        self.start = self.output;
        self.target = sample;
        self.progress = 0.0;
        self.buffer.push(Sample { position: sample, time: self.clock }, self.window);
    }

    /// Advance by `delta` seconds and return the new output.
    pub fn update(&mut self, delta: f32) -> Vec3 {
        self.clock += delta;
        self.buffer.prune(self.clock, self.window);
        if self.window > 0.0 {
            self.progress = (self.progress + delta / self.window).min(1.0);
        } else {
            self.progress = 1.0;
        }
        self.output = if self.progress >= 1.0 {
            self.target
        } else {
            self.start.lerp(self.target, self.progress.max(0.0))
        };
        self.output
    }

    /// Current interpolated position.
    pub fn value(&self) -> Vec3 {
        self.output
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Fraction of the window covered since the last push, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn window(&self) -> f32 {
        self.window
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }
}
