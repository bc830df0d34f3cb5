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

//! Error types for the algebra and the path simulator.

use thiserror::Error;

/// An error raised by a quaternion operation that cannot produce a rotation.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// The quaternion is too close to zero to be normalized.
    #[error("cannot normalize a degenerate quaternion (magnitude {magnitude})")]
    DegenerateQuaternion {
        /// The magnitude of the rejected quaternion.
        magnitude: f32,
    },
}

/// An error raised while configuring a walking-path simulation.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SimulationError {
    /// The step count must be between one and [`MAX_STEP_COUNT`](crate::path::MAX_STEP_COUNT).
    #[error(
        "invalid step count {0}: expected between 1 and {max} steps",
        max = crate::path::MAX_STEP_COUNT
    )]
    InvalidStepCount(usize),

    /// One of the endpoint orientations could not be normalized.
    #[error("invalid endpoint orientation: {0}")]
    Degenerate(#[from] MathError),
}
