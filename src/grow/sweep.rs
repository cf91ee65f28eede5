//! Parallel sweep over independent growth runs.
//!
//! Each run owns its state, so a sweep over stress levels is
//! embarrassingly parallel.

use rayon::prelude::*;

use super::{Growth, GrowError, RunResult, Scenario};

/// Run the scenario at each peak stress level, in parallel.
///
/// The output preserves the order of `levels`; a level that fails
/// validation carries its error instead of a result.
pub fn stress_sweep(base: &Scenario, levels: &[f64]) -> Vec<(f64, Result<RunResult, GrowError>)> {
    levels
        .par_iter()
        .map(|&smax| {
            let mut scenario = base.clone();
            scenario.smax = smax;
            let result = Growth::new(&scenario).map(|mut growth| growth.run());
            (smax, result)
        })
        .collect()
}
