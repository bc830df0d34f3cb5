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

//! Walk settings: the TOML manifest and the resolved run settings.

use anyhow::{Context, Result};
use clap::ValueEnum;
use gyre_core::math::degrees_to_radians;
use gyre_core::{Quaternion, Termination, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::parse::{self, ParseError};

/// How samples are written to standard output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width text, `printf` compatible.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Represents the structure of a walk manifest file.
///
/// Every field is optional in the file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkManifest {
    /// Start orientation, `[w, x, y, z]`.
    pub start: [f32; 4],
    /// End orientation, `[w, x, y, z]`. When absent the end is reached by
    /// applying `turns` rotations of `turn_degrees` about Z to `start`.
    pub end: Option<[f32; 4]>,
    /// Angle of one turn about Z, in degrees.
    pub turn_degrees: f32,
    /// Number of turns applied when `end` is absent.
    pub turns: u32,
    /// Number of interpolation steps.
    pub steps: i64,
    /// Distance covered by one step.
    pub step_size: f32,
    /// Walking direction in the walker's local frame.
    pub step_direction: [f32; 3],
    /// Print every sample, not only the final state.
    pub trace: bool,
    /// Stop before `t = 1` instead of including it.
    pub exclusive: bool,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for WalkManifest {
    /// Half a circle: two left turns of 90 degrees, 10000 steps of 3.14 cm.
    fn default() -> Self {
        Self {
            start: Quaternion::IDENTITY.to_array(),
            end: None,
            turn_degrees: 90.0,
            turns: 2,
            steps: 10_000,
            step_size: 0.0314,
            step_direction: [1.0, 0.0, 0.0],
            trace: false,
            exclusive: false,
            format: OutputFormat::Text,
        }
    }
}

impl WalkManifest {
    /// Loads a manifest from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read walk manifest '{}'", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse walk manifest '{}'", path.display()))
    }

    /// Parses a manifest from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Fully resolved settings for one walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSettings {
    /// Start orientation.
    pub start: Quaternion,
    /// End orientation.
    pub end: Quaternion,
    /// The single turn the end was derived from, if it was.
    pub turn: Option<Quaternion>,
    /// Number of interpolation steps.
    pub steps: usize,
    /// Per-step translation in the local frame.
    pub local_step: Vec3,
    /// Print every sample.
    pub trace: bool,
    /// Boundary policy.
    pub termination: Termination,
    /// Output format.
    pub format: OutputFormat,
}

impl TryFrom<&WalkManifest> for WalkSettings {
    type Error = ParseError;

    fn try_from(manifest: &WalkManifest) -> Result<Self, Self::Error> {
        let start = Quaternion::from_array(manifest.start);
        let (end, turn) = match manifest.end {
            Some(end) => (Quaternion::from_array(end), None),
            None => {
                let turn = Quaternion::from_z_rotation(degrees_to_radians(manifest.turn_degrees));
                let mut end = start;
                for _ in 0..manifest.turns {
                    end = turn * end;
                }
                (end, Some(turn))
            }
        };

        let termination = if manifest.exclusive {
            Termination::Exclusive
        } else {
            Termination::Inclusive
        };

        Ok(Self {
            start,
            end,
            turn,
            steps: parse::step_count(manifest.steps)?,
            local_step: parse::step_direction(manifest.step_direction)? * manifest.step_size,
            trace: manifest.trace,
            termination,
            format: manifest.format,
        })
    }
}
