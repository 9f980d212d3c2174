//! One-at-a-time sensitivity sweeps.

use crate::core::metrics::DerivedMetrics;
use crate::core::params::{InputParameters, ParamError};
use crate::engine::calculation::CalculationEngine;
use serde::Serialize;
use thiserror::Error;

/// Most intervals a single sweep may be split into.
pub const MAX_SWEEP_STEPS: usize = 10_000;

/// Errors from setting up a sweep.
#[derive(Debug, Error, PartialEq)]
pub enum SweepError {
    #[error(transparent)]
    Param(#[from] ParamError),
    #[error("{steps} steps exceeds the limit of {max}")]
    TooManySteps { steps: usize, max: usize },
}

/// Metrics for one value of the swept field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub metrics: DerivedMetrics,
}

/// Recompute the metrics for `steps + 1` evenly spaced values of one field,
/// from `from` to `to` inclusive, holding every other input at `base`.
///
/// `steps == 0` evaluates `from` only; more than [`MAX_SWEEP_STEPS`] is an
/// error.
///
/// # Examples
///
/// ```
/// use trade_digitisation_engine::core::params::InputParameters;
/// use trade_digitisation_engine::simulation::sensitivity::sensitivity_sweep;
///
/// let points = sensitivity_sweep(&InputParameters::default(), "apHeadcount", 0.0, 20.0, 4).unwrap();
/// assert_eq!(points.len(), 5);
/// assert_eq!(points[0].metrics.efficiency.ap_savings, 0.0);
/// ```
pub fn sensitivity_sweep(
    base: &InputParameters,
    key: &str,
    from: f64,
    to: f64,
    steps: usize,
) -> Result<Vec<SweepPoint>, SweepError> {
    if steps > MAX_SWEEP_STEPS {
        return Err(SweepError::TooManySteps {
            steps,
            max: MAX_SWEEP_STEPS,
        });
    }
    // Validate the key once, even when nothing else would touch it.
    base.value(key)?;

    let step = if steps == 0 {
        0.0
    } else {
        (to - from) / steps as f64
    };

    (0..=steps)
        .map(|i| {
            let value = if i == steps && steps > 0 {
                to
            } else {
                from + step * i as f64
            };
            let params = base.with_value(key, value)?;
            Ok::<_, SweepError>(SweepPoint {
                value,
                metrics: CalculationEngine::compute(&params),
            })
        })
        .collect()
}
