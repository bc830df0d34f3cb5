// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::iter::FusedIterator;

use log::{debug, trace, warn};

use super::sink::{SampleSink, WalkTrace};
use super::{Sample, Termination, MAX_STEP_COUNT};
use crate::error::SimulationError;
use crate::math::{Quaternion, Vec3, EPSILON};

/// Interpolates an orientation between two rotations and walks along it.
///
/// Construction validates the configuration; sampling itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSimulator {
    start: Quaternion,
    end: Quaternion,
    step_count: usize,
    local_step: Vec3,
    termination: Termination,
}

impl PathSimulator {
    /// Creates a simulator walking `step_count` steps of `local_step` while
    /// turning from `start` to `end`.
    ///
    /// Both endpoints are normalized. Returns
    /// [`SimulationError::InvalidStepCount`] when `step_count` is zero or
    /// above [`MAX_STEP_COUNT`], and
    /// [`SimulationError::Degenerate`] when an endpoint has no direction.
    pub fn new(
        start: Quaternion,
        end: Quaternion,
        step_count: usize,
        local_step: Vec3,
    ) -> Result<Self, SimulationError> {
        if step_count == 0 || step_count > MAX_STEP_COUNT {
            return Err(SimulationError::InvalidStepCount(step_count));
        }
        let start = unit_endpoint("start", start)?;
        let end = unit_endpoint("end", end)?;

        debug!(
            "Walk configured: {} steps of {:?} from {} to {}",
            step_count, local_step, start, end
        );

        Ok(Self {
            start,
            end,
            step_count,
            local_step,
            termination: Termination::default(),
        })
    }

    /// Sets which samples at the `t = 1` boundary are produced.
    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// The normalized start orientation.
    pub fn start(&self) -> Quaternion {
        self.start
    }

    /// The normalized end orientation.
    pub fn end(&self) -> Quaternion {
        self.end
    }

    /// Number of steps the interpolation is divided into.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// The per-step translation in the walker's local frame.
    pub fn local_step(&self) -> Vec3 {
        self.local_step
    }

    /// The boundary policy.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Number of samples a walk produces.
    pub fn sample_count(&self) -> usize {
        self.termination.sample_count(self.step_count)
    }

    /// The increment of `t` between two samples, `1 / step_count`.
    pub fn time_step(&self) -> f32 {
        1.0 / self.step_count as f32
    }

    /// Orientation at parameter `t`.
    pub fn orientation_at(&self, t: f32) -> Quaternion {
        Quaternion::slerp(self.start, self.end, t)
    }

    /// Lazily iterates over the samples of the walk.
    pub fn samples(&self) -> PathSamples {
        PathSamples {
            simulator: *self,
            index: 0,
            total: self.sample_count(),
            position: Vec3::ZERO,
        }
    }

    /// Streams every sample into `sink` and returns the final one.
    ///
    /// Stops at the first sink error.
    pub fn run<S>(&self, sink: &mut S) -> Result<Sample, S::Error>
    where
        S: SampleSink + ?Sized,
    {
        let mut last = Sample {
            index: 0,
            t: 0.0,
            orientation: self.start,
            position: Vec3::ZERO,
        };
        for sample in self.samples() {
            sink.record(&sample)?;
            last = sample;
        }
        debug!(
            "Walk finished after {} samples at {:?} facing {}",
            last.index + 1,
            last.position,
            last.orientation
        );
        Ok(last)
    }

    /// Runs the walk and keeps every sample.
    pub fn trace(&self) -> WalkTrace {
        let mut trace = WalkTrace::with_capacity(self.sample_count());
        match self.run(&mut trace) {
            Ok(_) => trace,
            Err(never) => match never {},
        }
    }
}

fn unit_endpoint(label: &str, q: Quaternion) -> Result<Quaternion, SimulationError> {
    let unit = q.try_normalize()?;
    if !unit.approx_eq(q, EPSILON) {
        warn!("{label} orientation {q} is not a unit quaternion; normalized to {unit}");
    }
    Ok(unit)
}

/// Runs a walk with the default boundary policy and returns its full trace.
///
/// The trace has exactly `step_count + 1` samples at `t = i / step_count`.
pub fn simulate(
    start: Quaternion,
    end: Quaternion,
    step_count: usize,
    local_step: Vec3,
) -> Result<WalkTrace, SimulationError> {
    Ok(PathSimulator::new(start, end, step_count, local_step)?.trace())
}

/// Iterator over the samples of a walk. See [`PathSimulator::samples`].
#[derive(Debug, Clone)]
pub struct PathSamples {
    simulator: PathSimulator,
    index: usize,
    total: usize,
    position: Vec3,
}

impl Iterator for PathSamples {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.index >= self.total {
            return None;
        }
        let sim = &self.simulator;
        // Integer counter: no drift in t, the last inclusive sample is exactly 1.
        // Distinct for every i while step_count <= 2^24.
        let t = self.index as f32 / sim.step_count as f32;
        let orientation = sim.orientation_at(t);
        self.position += orientation.rotate(sim.local_step);

        let sample = Sample {
            index: self.index,
            t,
            orientation,
            position: self.position,
        };
        trace!("{:>6} t={:.6} {}", sample.index, sample.t, sample.orientation);
        self.index += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PathSamples {}

impl FusedIterator for PathSamples {}
