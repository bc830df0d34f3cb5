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

//! # Gyre Core
//!
//! Quaternion algebra and the walking-path simulator built on top of it.
//!
//! The [`math`] module provides the value types ([`Quaternion`], [`Vec3`]) and
//! spherical linear interpolation. The [`path`] module drives those types over
//! a fixed number of steps, rotating a local step vector by each interpolated
//! orientation and accumulating it into a world-space position.

#![warn(missing_docs)]

pub mod error;
pub mod math;
pub mod path;
pub mod report;

pub use error::{MathError, SimulationError};
pub use math::{Quaternion, Vec3};
pub use path::{simulate, PathSimulator, MAX_STEP_COUNT, Sample, SampleSink, Termination, WalkTrace};
