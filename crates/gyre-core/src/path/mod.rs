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

//! Walking-path simulation driven by slerp.
//!
//! A [`PathSimulator`] interpolates from a start orientation to an end
//! orientation over a fixed number of steps. At every sample it rotates a
//! step vector, expressed in the walker's local frame, by the interpolated
//! orientation and accumulates the result into a world-space position.

use serde::{Deserialize, Serialize};

use crate::math::{Quaternion, Vec3};

mod simulator;
mod sink;

pub use self::simulator::{simulate, PathSamples, PathSimulator};
pub use self::sink::{FnSink, NullSink, SampleSink, WalkTrace};

/// The largest accepted step count.
///
/// Past 2^24 an `f32` cannot represent every `i / step_count`, so samples near
/// the end of the walk would share the same `t`.
pub const MAX_STEP_COUNT: usize = 1 << 24;

/// One point of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Zero-based sample index.
    pub index: usize,
    /// Interpolation parameter, `index / step_count`.
    pub t: f32,
    /// Orientation at `t`.
    pub orientation: Quaternion,
    /// Position after taking this sample's step.
    pub position: Vec3,
}

/// Which samples of `t = i / step_count` a walk produces.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Termination {
    /// `i = 0..=step_count`: `step_count + 1` samples, ending exactly at `t = 1`.
    #[default]
    Inclusive,
    /// `i = 0..step_count`: `step_count` samples, `t < 1`.
    Exclusive,
}

impl Termination {
    /// Number of samples produced for `step_count` steps.
    #[inline]
    pub fn sample_count(self, step_count: usize) -> usize {
        match self {
            Termination::Inclusive => step_count + 1,
            Termination::Exclusive => step_count,
        }
    }
}
