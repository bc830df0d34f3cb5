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

//! Fixed-width text rendering of orientations, positions and samples.
//!
//! These renderings are the observable output format of a walk, so they
//! reproduce C `printf` conversions exactly: `% 9.6f` for quaternion
//! components and `% 08.3f` for position components.

use crate::math::{Quaternion, Vec3};
use crate::path::Sample;

/// Width of a rendered quaternion component.
pub const QUATERNION_FIELD_WIDTH: usize = 9;
/// Decimals of a rendered quaternion component.
pub const QUATERNION_PRECISION: usize = 6;
/// Width of a rendered position component.
pub const POSITION_FIELD_WIDTH: usize = 8;
/// Decimals of a rendered position component.
pub const POSITION_PRECISION: usize = 3;

/// Renders `value` like a C `% <width>.<precision>f` conversion, or
/// `% 0<width>.<precision>f` when `zero_pad` is set.
///
/// Non-negative values get a leading space in place of the sign. Negative
/// zero keeps its `-`, as C does.
pub fn signed_fixed(value: f32, width: usize, precision: usize, zero_pad: bool) -> String {
    let sign = if value.is_sign_negative() { '-' } else { ' ' };
    let magnitude = value.abs();
    if zero_pad {
        let digits = width.saturating_sub(1);
        format!("{sign}{magnitude:0digits$.precision$}")
    } else {
        let body = format!("{sign}{magnitude:.precision$}");
        format!("{body:>width$}")
    }
}

/// Renders a quaternion as `(w, x, y, z)`.
pub fn format_quaternion(q: &Quaternion) -> String {
    let fields: Vec<String> = q
        .to_array()
        .iter()
        .map(|c| signed_fixed(*c, QUATERNION_FIELD_WIDTH, QUATERNION_PRECISION, false))
        .collect();
    format!("({})", fields.join(", "))
}

/// Renders a position as `(x, y, z)`.
pub fn format_position(p: Vec3) -> String {
    let fields: Vec<String> = p
        .to_array()
        .iter()
        .map(|c| signed_fixed(*c, POSITION_FIELD_WIDTH, POSITION_PRECISION, true))
        .collect();
    format!("({})", fields.join(", "))
}

/// Renders the two-line summary printed at the end of a walk.
pub fn render_state(sample: &Sample) -> String {
    format!(
        "Character position:    {}\nCharacter orientation: {}",
        format_position(sample.position),
        format_quaternion(&sample.orientation)
    )
}

/// Renders one trace line: the orientation immediately followed by the position.
pub fn render_trace_line(sample: &Sample) -> String {
    format!(
        "{}{}",
        format_quaternion(&sample.orientation),
        format_position(sample.position)
    )
}
