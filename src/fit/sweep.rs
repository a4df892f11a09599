//! Learning-rate sweep.
//!
//! Each candidate rate is an independent, sequential fit over the same
//! dataset and starting point, so candidates are evaluated in parallel.
//! Selection is deterministic: lowest final SSE, ties keep the earlier
//! candidate, non-finite SSE ranks last.

use log::info;
use rayon::prelude::*;

use crate::domain::{Dataset, Params, TrainConfig};
use crate::error::FitError;
use crate::fit::fitter::{FitOptions, FitOutcome, fit_plane};

/// One evaluated learning rate.
#[derive(Debug, Clone)]
pub struct SweepCandidate {
    pub idx: usize,
    pub learning_rate: f64,
    pub outcome: FitOutcome,
}

/// All candidates in input order plus the index of the best one.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub candidates: Vec<SweepCandidate>,
    pub best: usize,
}

impl SweepResult {
    pub fn best(&self) -> &SweepCandidate {
        &self.candidates[self.best]
    }
}

pub fn sweep_learning_rates(
    dataset: &Dataset,
    initial: Params,
    rates: &[f64],
    epochs: usize,
) -> Result<SweepResult, FitError> {
    if rates.is_empty() {
        return Err(FitError::InvalidInput("no learning rates to sweep".to_string()));
    }

    let candidates: Vec<SweepCandidate> = rates
        .par_iter()
        .enumerate()
        .map(|(idx, &learning_rate)| {
            let train = TrainConfig { learning_rate, epochs };
            fit_plane(dataset, initial, &train, &FitOptions::default()).map(|outcome| SweepCandidate {
                idx,
                learning_rate,
                outcome,
            })
        })
        .collect::<Result<_, _>>()?;

    let best = select_best(&candidates);
    info!(
        "sweep: {} rates, best lr={} sse={:.6e}",
        candidates.len(),
        candidates[best].learning_rate,
        candidates[best].outcome.sse_final
    );

    Ok(SweepResult { candidates, best })
}

fn select_best(candidates: &[SweepCandidate]) -> usize {
    let key = |c: &SweepCandidate| {
        let sse = c.outcome.sse_final;
        if sse.is_finite() { sse } else { f64::INFINITY }
    };

    let mut best = 0;
    for (i, c) in candidates.iter().enumerate().skip(1) {
        if key(c) < key(&candidates[best]) {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_dataset;
    use crate::domain::DEFAULT_INITIAL_PARAMS;

    #[test]
    fn sweep_keeps_input_order_and_picks_lowest_sse() {
        let ds = builtin_dataset().unwrap();
        let rates = [0.0001, 0.01, 0.001];
        let res = sweep_learning_rates(&ds, DEFAULT_INITIAL_PARAMS, &rates, 500).unwrap();

        let got: Vec<f64> = res.candidates.iter().map(|c| c.learning_rate).collect();
        assert_eq!(got, rates.to_vec());
        assert_eq!(res.best().learning_rate, 0.01);
    }

    #[test]
    fn diverging_rate_is_never_selected() {
        let ds = builtin_dataset().unwrap();
        let res = sweep_learning_rates(&ds, DEFAULT_INITIAL_PARAMS, &[5.0, 0.001], 100).unwrap();
        assert_eq!(res.best().learning_rate, 0.001);
    }

    #[test]
    fn ties_keep_the_earlier_candidate() {
        let ds = builtin_dataset().unwrap();
        let res = sweep_learning_rates(&ds, DEFAULT_INITIAL_PARAMS, &[0.01, 0.01], 50).unwrap();
        assert_eq!(res.candidates[0].outcome.sse_final, res.candidates[1].outcome.sse_final);
        assert_eq!(res.best, 0);

        // All diverged: every key is +inf, so the first one stays.
        let res = sweep_learning_rates(&ds, DEFAULT_INITIAL_PARAMS, &[5.0, 6.0], 200).unwrap();
        assert!(res.candidates.iter().all(|c| !c.outcome.sse_final.is_finite()));
        assert_eq!(res.best, 0);
    }

    #[test]
    fn matches_a_plain_fit() {
        let ds = builtin_dataset().unwrap();
        let res = sweep_learning_rates(&ds, DEFAULT_INITIAL_PARAMS, &[0.01], 100).unwrap();
        let plain = fit_plane(
            &ds,
            DEFAULT_INITIAL_PARAMS,
            &TrainConfig { learning_rate: 0.01, epochs: 100 },
            &FitOptions::default(),
        )
        .unwrap();
        assert_eq!(res.best().outcome.params, plain.params);
    }

    #[test]
    fn empty_or_invalid_rates_fail() {
        let ds = builtin_dataset().unwrap();
        assert!(sweep_learning_rates(&ds, DEFAULT_INITIAL_PARAMS, &[], 10).is_err());
        assert!(sweep_learning_rates(&ds, DEFAULT_INITIAL_PARAMS, &[0.01, 0.0], 10).is_err());
    }
}
