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

//! Writes walks to an output stream.

use anyhow::{Context, Result};
use gyre_core::path::NullSink;
use gyre_core::report::{format_quaternion, render_state, render_trace_line};
use gyre_core::{PathSimulator, Sample, SampleSink};
use std::io::{self, Write};

use crate::config::{OutputFormat, WalkSettings};

/// Writes one fixed-width text line per sample.
pub struct TextTraceSink<W> {
    out: W,
}

impl<W: Write> TextTraceSink<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> SampleSink for TextTraceSink<W> {
    type Error = io::Error;

    fn record(&mut self, sample: &Sample) -> Result<(), Self::Error> {
        writeln!(self.out, "{}", render_trace_line(sample))
    }
}

/// Writes one JSON object per sample.
pub struct JsonLinesSink<W> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> SampleSink for JsonLinesSink<W> {
    type Error = serde_json::Error;

    fn record(&mut self, sample: &Sample) -> Result<(), Self::Error> {
        serde_json::to_writer(&mut self.out, sample)?;
        writeln!(self.out).map_err(serde_json::Error::io)
    }
}

/// Runs the walk described by `settings`, writing to `out`.
///
/// Returns the final sample.
pub fn run_walk<W: Write>(settings: &WalkSettings, out: &mut W) -> Result<Sample> {
    let simulator = PathSimulator::new(
        settings.start,
        settings.end,
        settings.steps,
        settings.local_step,
    )
    .context("Invalid walk configuration")?
    .with_termination(settings.termination);

    log::info!(
        "Walking {} samples from {} to {}",
        simulator.sample_count(),
        simulator.start(),
        simulator.end()
    );

    let last = match settings.format {
        OutputFormat::Text => {
            if let Some(turn) = settings.turn {
                writeln!(out, "{}", format_quaternion(&turn))?;
            }
            let last = if settings.trace {
                simulator.run(&mut TextTraceSink::new(&mut *out))?
            } else {
                run_silently(&simulator)
            };
            writeln!(out, "{}", render_state(&last))?;
            last
        }
        OutputFormat::Json => {
            let mut sink = JsonLinesSink::new(&mut *out);
            if settings.trace {
                simulator.run(&mut sink)?
            } else {
                let last = run_silently(&simulator);
                sink.record(&last)?;
                last
            }
        }
    };

    out.flush().context("Failed to flush output")?;
    Ok(last)
}

fn run_silently(simulator: &PathSimulator) -> Sample {
    match simulator.run(&mut NullSink) {
        Ok(last) => last,
        Err(never) => match never {},
    }
}
