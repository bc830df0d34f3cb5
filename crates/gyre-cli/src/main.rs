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

//! `gyre`: walks a character along a slerp-interpolated heading and prints
//! where it ends up.

mod cli;
mod config;
mod output;
mod parse;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter};

use crate::cli::Cli;
use crate::config::{WalkManifest, WalkSettings};

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let manifest = match &cli.config {
        Some(path) => {
            log::info!("Loading walk manifest from '{}'", path.display());
            WalkManifest::load(path)?
        }
        None => WalkManifest::default(),
    };
    let manifest = cli.apply(manifest).context("Invalid command-line value")?;
    let settings = WalkSettings::try_from(&manifest).context("Invalid walk settings")?;
    log::debug!("Resolved settings: {:?}", settings);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    output::run_walk(&settings, &mut out)?;
    Ok(())
}
