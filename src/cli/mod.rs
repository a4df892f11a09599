//! Command-line parsing for the plane fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_EPOCHS, DEFAULT_INITIAL_PARAMS, DEFAULT_LEARNING_RATE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "planefit",
    version,
    about = "Fit a plane out = w0 + w1*x1 + w2*x2 with per-record gradient descent"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the plane and print w0, w1, w2 (one per line).
    Fit(FitArgs),
    /// Fit the plane, then show it interactively in the terminal.
    View(FitArgs),
    /// Compare several learning rates (fits run in parallel).
    Sweep(SweepArgs),
}

/// Data selection, starting point and training length.
#[derive(Debug, Args, Clone)]
pub struct TrainArgs {
    /// Number of epochs (full passes over the data).
    #[arg(short = 'e', long, env = "PLANEFIT_EPOCHS", default_value_t = DEFAULT_EPOCHS)]
    pub epochs: usize,

    /// Initial intercept.
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_INITIAL_PARAMS.w0)]
    pub w0: f64,

    /// Initial weight for x1.
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_INITIAL_PARAMS.w1)]
    pub w1: f64,

    /// Initial weight for x2.
    #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_INITIAL_PARAMS.w2)]
    pub w2: f64,

    /// Train on N synthetic records instead of the built-in table.
    #[arg(long, value_name = "N")]
    pub synthetic: Option<usize>,

    /// Random seed for synthetic records.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Standard deviation of the synthetic target noise.
    #[arg(long, default_value_t = 1.0)]
    pub noise: f64,

    /// Visit rows in a seeded random order.
    #[arg(long, value_name = "SEED")]
    pub shuffle_seed: Option<u64>,
}

/// Options for fitting and viewing.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Learning rate (step size).
    #[arg(short = 'l', long = "lr", env = "PLANEFIT_LEARNING_RATE", default_value_t = DEFAULT_LEARNING_RATE)]
    pub learning_rate: f64,

    /// Append dataset stats, SSE, the exact least-squares plane and residuals.
    #[arg(long)]
    pub summary: bool,

    /// Append an ASCII rendering of the plane and the records.
    #[arg(long)]
    pub plot: bool,

    /// Print a JSON report instead of the plain parameter lines.
    #[arg(long, conflicts_with_all = ["summary", "plot"])]
    pub json: bool,

    /// Record the SSE after every epoch (included in the JSON report).
    #[arg(long)]
    pub trace: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,
}

/// Options for the learning-rate sweep.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Comma-separated learning rates to compare.
    #[arg(long, value_delimiter = ',', default_values_t = [0.0001, 0.001, 0.005, 0.01, 0.02])]
    pub rates: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fit_defaults_match_builtin_run() {
        let cli = Cli::parse_from(["planefit", "fit"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.learning_rate, 0.01);
        assert_eq!(args.train.epochs, 4000);
        assert_eq!((args.train.w0, args.train.w1, args.train.w2), (2.0, 4.0, 6.0));
        assert!(args.train.synthetic.is_none());
        assert!(!args.summary && !args.plot && !args.json);
    }

    #[test]
    fn negative_initial_weights_parse() {
        let cli = Cli::parse_from(["planefit", "fit", "--w1", "-3.5", "--lr", "0.02"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.train.w1, -3.5);
        assert_eq!(args.learning_rate, 0.02);
    }

    #[test]
    fn sweep_rates_are_comma_separated() {
        let cli = Cli::parse_from(["planefit", "sweep", "--rates", "0.1,0.01", "-e", "10"]);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.rates, vec![0.1, 0.01]);
        assert_eq!(args.train.epochs, 10);
    }

    #[test]
    fn json_conflicts_with_text_extras() {
        assert!(Cli::try_parse_from(["planefit", "fit", "--json", "--plot"]).is_err());
    }
}
