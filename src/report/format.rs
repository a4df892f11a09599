//! Text and JSON formatting of fit results.

use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::{DataSource, DatasetStats, FitConfig, Params, RecordResidual, TrainConfig};
use crate::error::AppError;
use crate::fit::{FitOutcome, SweepResult};

/// The stdout contract: `w0`, `w1`, `w2`, one per line, default float formatting.
pub fn format_params(params: &Params) -> String {
    format!("{}\n{}\n{}\n", params.w0, params.w1, params.w2)
}

/// Format the full run summary (dataset stats + hyperparameters + fit diagnostics).
pub fn format_run_summary(run: &RunOutput, config: &FitConfig) -> String {
    let stats = run.dataset.stats();
    let outcome = &run.outcome;
    let mut out = String::new();

    out.push_str("=== planefit - SGD plane fit ===\n");
    out.push_str(&format!("Data: {}", source_label(config.source)));
    if let Some(seed) = config.shuffle_seed {
        out.push_str(&format!(" (rows shuffled, seed={seed})"));
    }
    out.push('\n');
    out.push_str(&format!(
        "Records: n={} | x1=[{:.2}, {:.2}] | x2=[{:.2}, {:.2}] | target=[{:.2}, {:.2}]\n",
        stats.n_records, stats.x1_min, stats.x1_max, stats.x2_min, stats.x2_max, stats.target_min, stats.target_max,
    ));
    out.push_str(&format!(
        "Training: lr={} | epochs={} | steps={}\n",
        config.train.learning_rate, outcome.epochs, outcome.steps
    ));

    out.push_str("\nParameters:\n");
    out.push_str(&format!("  initial: {}\n", fmt_params(&outcome.initial)));
    out.push_str(&format!("  fitted : {}\n", fmt_params(&outcome.params)));
    match &run.reference {
        Some(p) => out.push_str(&format!("  exact  : {}\n", fmt_params(p))),
        None => out.push_str("  exact  : (not identifiable)\n"),
    }

    out.push_str(&format!(
        "\nSSE: {:.6e} -> {:.6e} | RMSE={:.6e}\n",
        outcome.sse_initial,
        outcome.sse_final,
        outcome.rmse(stats.n_records)
    ));
    if let Some(first) = outcome.history.first() {
        out.push_str(&format!("SSE after epoch 1: {first:.6e}\n"));
    }

    out.push('\n');
    out.push_str(&format_residuals(&run.residuals));
    out
}

/// Per-record fitted values and residuals.
pub fn format_residuals(rows: &[RecordResidual]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>4} {:>10} {:>10} {:>12} {:>12} {:>12}\n",
            "row", "x1", "x2", "target", "fitted", "residual"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<4} {:-<10} {:-<10} {:-<12} {:-<12} {:-<12}", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for (i, r) in rows.iter().enumerate() {
        out.push_str(
            format!(
                "{:>4} {:>10.3} {:>10.3} {:>12.4} {:>12.4} {:>12.4}",
                i, r.record.x1, r.record.x2, r.record.target, r.fitted, r.residual
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Learning-rate sweep table; the chosen rate is marked with `*`.
pub fn format_sweep(result: &SweepResult, n_records: usize) -> String {
    let mut out = String::new();
    out.push_str("Learning-rate sweep:\n");
    for (i, c) in result.candidates.iter().enumerate() {
        let chosen = if i == result.best { "*" } else { " " };
        let p = &c.outcome.params;
        out.push_str(&format!(
            "{chosen} lr={:<10} SSE={:<14.6e} RMSE={:<14.6e} w=[{}, {}, {}]\n",
            c.learning_rate,
            c.outcome.sse_final,
            c.outcome.rmse(n_records),
            p.w0,
            p.w1,
            p.w2,
        ));
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: String,
    shuffle_seed: Option<u64>,
    train: TrainConfig,
    stats: DatasetStats,
    fit: &'a FitOutcome,
    rmse: f64,
    reference: Option<Params>,
    residuals: &'a [RecordResidual],
}

/// Machine-readable report for `fit --json`.
pub fn format_json(run: &RunOutput, config: &FitConfig) -> Result<String, AppError> {
    let stats = run.dataset.stats();
    let report = JsonReport {
        source: source_label(config.source),
        shuffle_seed: config.shuffle_seed,
        train: config.train,
        stats,
        fit: &run.outcome,
        rmse: run.outcome.rmse(stats.n_records),
        reference: run.reference,
        residuals: &run.residuals,
    };
    serde_json::to_string_pretty(&report).map_err(|e| AppError::new(4, format!("Failed to encode JSON report: {e}")))
}

fn source_label(source: DataSource) -> String {
    match source {
        DataSource::Builtin => "builtin".to_string(),
        DataSource::Synthetic { count, seed, noise } => {
            format!("synthetic (n={count}, seed={seed}, noise={noise})")
        }
    }
}

fn fmt_params(p: &Params) -> String {
    format!("w0={:.6} w1={:.6} w2={:.6}", p.w0, p.w1, p.w2)
}
