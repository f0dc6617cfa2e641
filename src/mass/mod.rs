//! Mass redistribution core.
//!
//! ## Pipeline
//! `precheck` -> `baseline::allocate` -> `remainder::distribute` -> `postcheck`
//!
//! ## Files
//! - `units.rs` — fixed-point `MassValue` / `MassSeries`, step and floor constants.
//! - `baseline.rs` — even per-row shift in whole steps (truncating).
//! - `remainder.rs` — round-robin correction of the residual, floor-aware.
//! - `validator.rs` — reachability pre-check and sum post-check.
//! - `error.rs` — `AdjustmentError` and the `SumMismatch` diagnostic.
//!
//! ## Rule of thumb
//! Pure functions only: no I/O, no state between calls. The input series is
//! never mutated; each call returns a fresh one.

pub mod baseline;
pub mod error;
pub mod remainder;
pub mod units;
pub mod validator;

pub use baseline::BaselinePlan;
pub use error::{AdjustmentError, SumMismatch};
pub use remainder::RemainderReport;
pub use units::{MassSeries, MassValue, ParseMassError, MAX_STEPS, MINIMUM_FLOOR, STEP};

use serde::Serialize;

/// Outcome of a successful adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub series: MassSeries,
    pub baseline: BaselinePlan,
    pub remainder: RemainderReport,
    /// Set when the final total does not match the target.
    pub mismatch: Option<SumMismatch>,
}

impl Adjustment {
    /// Treat a sum mismatch as fatal.
    pub fn into_strict(self) -> Result<MassSeries, AdjustmentError> {
        match self.mismatch {
            Some(m) => Err(m.into()),
            None => Ok(self.series),
        }
    }
}

/// Redistribute `values` so they sum to `target`.
pub fn adjust(values: &MassSeries, target: MassValue) -> Result<Adjustment, AdjustmentError> {
    validator::precheck(values, target)?;

    let (series, baseline) = baseline::allocate(values, target);
    tracing::debug!(
        rows = values.len(),
        diff_steps = baseline.diff_steps,
        per_row_steps = baseline.per_row_steps,
        "baseline allocated"
    );

    let (series, remainder) = remainder::distribute(&series, target)?;
    tracing::debug!(
        leftover_steps = remainder.leftover_steps,
        applied_steps = remainder.applied_steps,
        skipped_visits = remainder.skipped_visits,
        "remainder distributed"
    );

    let mismatch = validator::postcheck(&series, target);
    if let Some(m) = &mismatch {
        tracing::warn!(final_total = %m.final_total, target_total = %m.target_total, "final sum mismatch");
    }

    Ok(Adjustment {
        series,
        baseline,
        remainder,
        mismatch,
    })
}

/// Read-only reachability summary for a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub rows: usize,
    pub current_total: MassValue,
    pub target_total: MassValue,
    pub minimum_total: MassValue,
    pub diff: MassValue,
    pub per_row_baseline: MassValue,
    pub reachable: bool,
}

/// Like `adjust`'s pre-check, but an unreachable target is reported in the
/// preview rather than returned as an error. An empty series still fails.
pub fn preview(values: &MassSeries, target: MassValue) -> Result<Preview, AdjustmentError> {
    let reachable = match validator::precheck(values, target) {
        Ok(()) => true,
        Err(AdjustmentError::TargetTooSmall { .. }) => false,
        Err(e) => return Err(e),
    };
    let plan = BaselinePlan::compute(values, target);
    Ok(Preview {
        rows: values.len(),
        current_total: values.total(),
        target_total: target,
        minimum_total: validator::minimum_total(values.len()),
        diff: MassValue::from_steps(plan.diff_steps),
        per_row_baseline: plan.per_row(),
        reachable,
    })
}

#[cfg(test)]
mod tests {
    use super::{adjust, preview, AdjustmentError, MassSeries, MassValue, SumMismatch, MAX_STEPS};

    fn series(vals: &[&str]) -> MassSeries {
        vals.iter().map(|s| s.parse::<MassValue>().unwrap()).collect()
    }

    fn m(s: &str) -> MassValue {
        s.parse().unwrap()
    }

    #[test]
    fn reaches_exact_minimum() {
        let out = adjust(&series(&["10", "10", "10"]), m("0.003")).unwrap();
        assert_eq!(out.series, series(&["0.001", "0.001", "0.001"]));
        assert_eq!(out.mismatch, None);
    }

    #[test]
    fn rejects_target_below_minimum() {
        assert_eq!(
            adjust(&series(&["10", "10", "10"]), m("0.002")),
            Err(AdjustmentError::TargetTooSmall {
                rows: 3,
                minimum: m("0.003")
            })
        );
    }

    #[test]
    fn even_baseline() {
        let out = adjust(&series(&["10", "10", "10"]), m("30.003")).unwrap();
        assert_eq!(out.series, series(&["10.001", "10.001", "10.001"]));
        assert_eq!(out.baseline.per_row_steps, 1);
        assert_eq!(out.remainder.leftover_steps, 0);
    }

    #[test]
    fn uneven_remainder_goes_to_first_row() {
        let out = adjust(&series(&["10", "10", "10"]), m("30.004")).unwrap();
        assert_eq!(out.series, series(&["10.002", "10.001", "10.001"]));
        assert_eq!(out.remainder.leftover_steps, 1);
    }

    #[test]
    fn decrements_bypass_rows_at_floor() {
        let input = series(&["0.001", "0.001", "10"]);
        let out = adjust(&input, m("5")).unwrap();
        assert_eq!(out.series, series(&["0.001", "0.001", "4.998"]));
        assert_eq!(out.series.total(), m("5"));
        assert_eq!(input, series(&["0.001", "0.001", "10"]));
    }

    #[test]
    fn idempotent_at_current_total() {
        let input = series(&["1.234", "0.001", "98.765"]);
        let out = adjust(&input, input.total()).unwrap();
        assert_eq!(out.series, input);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert_eq!(
            adjust(&MassSeries::default(), m("1")),
            Err(AdjustmentError::NoRowsFound)
        );
    }

    #[test]
    fn huge_series_fails_instead_of_wrapping() {
        let huge: MassSeries = std::iter::repeat("999999999999.999".parse::<MassValue>().unwrap())
            .take(10_000)
            .collect();
        assert_eq!(
            adjust(&huge, m("100")),
            Err(AdjustmentError::OutOfRange { rows: 10_000 })
        );
        assert_eq!(
            preview(&huge, m("100")),
            Err(AdjustmentError::OutOfRange { rows: 10_000 })
        );
        assert_eq!(huge.values()[0].steps(), MAX_STEPS);
    }

    #[test]
    fn strict_mode_turns_mismatch_into_error() {
        let mut out = adjust(&series(&["1"]), m("2")).unwrap();
        assert_eq!(out.clone().into_strict(), Ok(series(&["2"])));
        out.mismatch = Some(SumMismatch {
            final_total: m("2"),
            target_total: m("2.001"),
        });
        assert_eq!(
            out.into_strict(),
            Err(AdjustmentError::SumMismatch {
                final_total: m("2"),
                target_total: m("2.001")
            })
        );
    }

    #[test]
    fn preview_flags_unreachable_targets() {
        let p = preview(&series(&["10", "10", "10"]), m("0.002")).unwrap();
        assert!(!p.reachable);
        assert_eq!(p.minimum_total, m("0.003"));

        let p = preview(&series(&["10", "10", "10"]), m("30.004")).unwrap();
        assert!(p.reachable);
        assert_eq!(p.diff, m("0.004"));
        assert_eq!(p.per_row_baseline, m("0.001"));

        assert_eq!(
            preview(&MassSeries::default(), m("1")),
            Err(AdjustmentError::NoRowsFound)
        );
    }
}
