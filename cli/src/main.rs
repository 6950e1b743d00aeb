#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::correctness)]
#![warn(rust_2018_idioms)]
#![warn(clippy::pedantic)]
/**
 * MIT License
 *
 * plfilter - Copyright (c) 2024 plfilter contributors
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
mod cli;
mod logger;

use anyhow::{bail, Context, Result};
use clap::Parser;
use plfilterlib::config::{config_extra, Settings};
use plfilterlib::resolver::YtDlpResolver;
#[macro_use]
extern crate log;

/// Handles CLI args, loads the config, then runs the playlist pass
fn main() -> Result<()> {
    let args = cli::Args::parse();
    let _logger = logger::setup(&args.log_options)?;

    if let Some(action) = args.action {
        return execute_action(action);
    }

    let settings = get_config(&args)?;
    info!(
        "Processing \"{}\" into \"{}\", policy on resolve errors: {}",
        settings.input_path().display(),
        settings.output_path().display(),
        settings.on_resolve_error
    );

    let resolver = YtDlpResolver::new(&settings.ytdlp)?;
    let stdout = std::io::stdout();
    plfilterlib::run(&settings, &resolver, stdout.lock())?;

    Ok(())
}

/// Load the config file and apply the cli overrides on top
fn get_config(args: &cli::Args) -> Result<Settings> {
    let mut config = config_extra::load(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    Ok(config)
}

fn apply_overrides(config: &mut Settings, args: &cli::Args) {
    if let Some(input) = &args.input {
        config.input_file.clone_from(input);
    }
    if let Some(output) = &args.output {
        config.output_file.clone_from(output);
    }
    if !args.keywords.is_empty() {
        config.keywords.clone_from(&args.keywords);
    }
    if let Some(policy) = args.on_resolve_error {
        config.on_resolve_error = policy;
    }
}

fn execute_action(action: cli::Action) -> Result<()> {
    match action {
        cli::Action::InitConfig { file, force } => {
            let path = match file {
                Some(p) => p,
                None => config_extra::default_config_path()?,
            };

            if path.exists() && !force {
                bail!(
                    "Config file \"{}\" already exists, use --force to replace it",
                    path.display()
                );
            }

            config_extra::save_file(&path, &Settings::default())
                .with_context(|| format!("Writing config \"{}\"", path.display()))?;
            println!("Wrote default config to \"{}\"", path.display());
        }
    };

    Ok(())
}
