//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the logger
//! - parses CLI arguments
//! - runs the fit pipeline
//! - prints parameters, reports and plots

use std::io::{self, Write};

use clap::Parser;
use log::warn;

use crate::cli::{Command, FitArgs, SweepArgs, TrainArgs};
use crate::domain::{DataSource, FitConfig, Params, TrainConfig};
use crate::error::AppError;
use crate::plot::{AsciiRenderer, Renderer};

pub mod pipeline;

/// Entry point for the `planefit` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` first so it can provide `RUST_LOG` and the `PLANEFIT_*` defaults.
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("ignoring unreadable .env file: {e}");
        }
    }

    // `planefit` and `planefit --lr 0.1` behave like `planefit fit ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::View(args) => handle_view(args),
        Command::Sweep(args) => handle_sweep(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    let mut stdout = io::stdout().lock();
    if config.json {
        let json = crate::report::format_json(&run, &config)?;
        writeln!(stdout, "{json}").map_err(write_err)?;
        return Ok(());
    }

    write!(stdout, "{}", crate::report::format_params(&run.outcome.params)).map_err(write_err)?;
    if config.summary {
        write!(stdout, "\n{}", crate::report::format_run_summary(&run, &config)).map_err(write_err)?;
    }
    if config.plot {
        writeln!(stdout).map_err(write_err)?;
        AsciiRenderer::new(stdout, config.plot_width, config.plot_height)
            .render(&run.outcome.params, &run.dataset)?;
    }

    Ok(())
}

fn handle_view(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    crate::tui::TuiRenderer.render(&run.outcome.params, &run.dataset)?;

    // Printed after the alternate screen is gone so it stays visible.
    print!("{}", crate::report::format_params(&run.outcome.params));
    Ok(())
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let config = FitConfig {
        source: data_source(&args.train),
        shuffle_seed: args.train.shuffle_seed,
        initial: initial_params(&args.train),
        ..FitConfig::default()
    };
    let dataset = crate::data::resolve_dataset(&config)?;
    let result = crate::fit::sweep_learning_rates(&dataset, config.initial, &args.rates, args.train.epochs)?;

    print!("{}", crate::report::format_sweep(&result, dataset.len()));
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        source: data_source(&args.train),
        shuffle_seed: args.train.shuffle_seed,
        initial: initial_params(&args.train),
        train: TrainConfig {
            learning_rate: args.learning_rate,
            epochs: args.train.epochs,
        },
        trace: args.trace,
        summary: args.summary,
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        json: args.json,
    }
}

fn data_source(args: &TrainArgs) -> DataSource {
    match args.synthetic {
        Some(count) => DataSource::Synthetic {
            count,
            seed: args.seed,
            noise: args.noise,
        },
        None => DataSource::Builtin,
    }
}

fn initial_params(args: &TrainArgs) -> Params {
    Params::new(args.w0, args.w1, args.w2)
}

fn write_err(e: io::Error) -> AppError {
    AppError::new(4, format!("Failed to write output: {e}"))
}

/// Rewrite argv so `planefit` defaults to `planefit fit`.
///
/// Rules:
/// - `planefit`                      -> `planefit fit`
/// - `planefit --lr 0.1 ...`         -> `planefit fit --lr 0.1 ...`
/// - `planefit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "view" | "sweep");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "fit flags".
    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_fit() {
        assert_eq!(rewrite_args(argv(&["planefit"])), argv(&["planefit", "fit"]));
        assert_eq!(
            rewrite_args(argv(&["planefit", "--lr", "0.1"])),
            argv(&["planefit", "fit", "--lr", "0.1"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [&["planefit", "sweep"][..], &["planefit", "--help"][..], &["planefit", "view", "--plot"][..]] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }

    #[test]
    fn config_from_args_selects_synthetic_source() {
        let cli = crate::cli::Cli::parse_from(["planefit", "fit", "--synthetic", "25", "--seed", "9", "--noise", "0.1"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        let config = fit_config_from_args(&args);
        assert_eq!(
            config.source,
            DataSource::Synthetic { count: 25, seed: 9, noise: 0.1 }
        );
        assert_eq!(config.initial, Params::new(2.0, 4.0, 6.0));
    }
}
