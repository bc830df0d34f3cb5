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

//! Text parsing for the values given on the command line.

use gyre_core::Vec3;
use thiserror::Error;

/// A malformed command-line value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The list did not have the required number of components.
    #[error("expected {expected} comma-separated numbers, found {found}")]
    WrongCount {
        /// Required number of components.
        expected: usize,
        /// Number of components found.
        found: usize,
    },
    /// A component was not a finite number.
    #[error("component {index} ('{token}') is not a finite number")]
    NotANumber {
        /// Zero-based position of the component.
        index: usize,
        /// The offending text.
        token: String,
    },
    /// A negative step count.
    #[error("step count must not be negative, got {0}")]
    NegativeStepCount(i64),
    /// A step direction with no length.
    #[error("step direction {0:?} has no length")]
    ZeroStepDirection([f32; 3]),
}

/// Parses exactly `N` comma-separated numbers, e.g. `"1, 0, 0, 0"`.
///
/// One pair of surrounding parentheses is accepted, so rendered
/// quaternions can be fed back in.
pub fn components<const N: usize>(text: &str) -> Result<[f32; N], ParseError> {
    let text = text.trim();
    let text = text
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(text);

    let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
    if tokens.len() != N {
        return Err(ParseError::WrongCount {
            expected: N,
            found: tokens.len(),
        });
    }

    let mut values = [0.0; N];
    for (index, (slot, token)) in values.iter_mut().zip(&tokens).enumerate() {
        *slot = token
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::NotANumber {
                index,
                token: (*token).to_string(),
            })?;
    }
    Ok(values)
}

/// Converts a signed step count. Zero is passed through; the simulator
/// rejects it.
pub fn step_count(steps: i64) -> Result<usize, ParseError> {
    usize::try_from(steps).map_err(|_| ParseError::NegativeStepCount(steps))
}

/// Converts a step direction into a unit vector.
pub fn step_direction(direction: [f32; 3]) -> Result<Vec3, ParseError> {
    let v = Vec3::from_array(direction);
    let len = v.length();
    if len > f32::EPSILON && len.is_finite() {
        Ok(v / len)
    } else {
        Err(ParseError::ZeroStepDirection(direction))
    }
}
