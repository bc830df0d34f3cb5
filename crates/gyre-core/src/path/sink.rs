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

//! Output sinks for walk samples.

use std::convert::Infallible;

use super::Sample;

/// Receives the samples of a walk, in order.
pub trait SampleSink {
    /// The error a sink can fail with while recording.
    type Error;

    /// Records one sample.
    fn record(&mut self, sample: &Sample) -> Result<(), Self::Error>;
}

impl SampleSink for Vec<Sample> {
    type Error = Infallible;

    fn record(&mut self, sample: &Sample) -> Result<(), Self::Error> {
        self.push(*sample);
        Ok(())
    }
}

/// A sink that discards every sample. Use it when only the final state matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SampleSink for NullSink {
    type Error = Infallible;

    fn record(&mut self, _sample: &Sample) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Adapts a closure into a [`SampleSink`].
pub struct FnSink<F>(pub F);

impl<F, E> SampleSink for FnSink<F>
where
    F: FnMut(&Sample) -> Result<(), E>,
{
    type Error = E;

    fn record(&mut self, sample: &Sample) -> Result<(), Self::Error> {
        (self.0)(sample)
    }
}

/// The full sequence of samples of one walk.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WalkTrace {
    samples: Vec<Sample>,
}

impl WalkTrace {
    /// Creates an empty trace with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    /// All recorded samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The last sample, if any.
    pub fn final_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Orientation of the last sample.
    pub fn final_orientation(&self) -> Option<crate::math::Quaternion> {
        self.final_sample().map(|s| s.orientation)
    }

    /// Position of the last sample.
    pub fn final_position(&self) -> Option<crate::math::Vec3> {
        self.final_sample().map(|s| s.position)
    }

    /// Consumes the trace and returns the samples.
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl SampleSink for WalkTrace {
    type Error = Infallible;

    fn record(&mut self, sample: &Sample) -> Result<(), Self::Error> {
        self.samples.push(*sample);
        Ok(())
    }
}
