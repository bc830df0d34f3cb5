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

//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{OutputFormat, WalkManifest};
use crate::parse::{self, ParseError};

/// Walk a character along a heading interpolated with slerp.
///
/// Without arguments, walks half a circle: two left turns of 90 degrees
/// over 10000 steps of 3.14 cm.
#[derive(Parser, Debug)]
#[command(name = "gyre")]
#[command(version)]
pub struct Cli {
    /// TOML walk manifest; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Start orientation as `w,x,y,z`
    #[arg(long, value_name = "W,X,Y,Z", allow_hyphen_values = true)]
    pub start: Option<String>,

    /// End orientation as `w,x,y,z`
    #[arg(long, value_name = "W,X,Y,Z", allow_hyphen_values = true)]
    pub end: Option<String>,

    /// Number of interpolation steps
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub steps: Option<i64>,

    /// Distance covered by one step
    #[arg(short = 's', long)]
    pub step_size: Option<f32>,

    /// Print every sample, not only the final state
    #[arg(short, long)]
    pub trace: bool,

    /// Stop before t = 1 instead of including it
    #[arg(long)]
    pub exclusive: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Overlays the flags that were given onto `manifest`.
    pub fn apply(&self, mut manifest: WalkManifest) -> Result<WalkManifest, ParseError> {
        if let Some(start) = &self.start {
            manifest.start = parse::components(start)?;
        }
        if let Some(end) = &self.end {
            manifest.end = Some(parse::components(end)?);
        }
        if let Some(steps) = self.steps {
            manifest.steps = steps;
        }
        if let Some(step_size) = self.step_size {
            manifest.step_size = step_size;
        }
        if let Some(format) = self.format {
            manifest.format = format;
        }
        manifest.trace |= self.trace;
        manifest.exclusive |= self.exclusive;
        Ok(manifest)
    }
}
