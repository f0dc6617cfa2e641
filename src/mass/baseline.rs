//! Baseline allocation: spread the bulk of the change evenly, in whole steps.

use super::units::{MassSeries, MassValue};
use serde::Serialize;

/// What the baseline pass decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaselinePlan {
    /// `target - current`, in steps.
    pub diff_steps: i64,
    /// Steps added to (or removed from) every row.
    pub per_row_steps: i64,
}

impl BaselinePlan {
    /// Per-row steps truncate toward zero so the pass never overshoots; the
    /// residual is left for the remainder pass.
    pub fn compute(series: &MassSeries, target: MassValue) -> Self {
        let diff_steps = (target - series.total()).steps();
        let per_row_steps = match series.len() {
            0 => 0,
            n => diff_steps / n as i64,
        };
        BaselinePlan {
            diff_steps,
            per_row_steps,
        }
    }

    pub fn per_row(&self) -> MassValue {
        MassValue::from_steps(self.per_row_steps)
    }
}

/// Shift every row by the baseline, clamping at the minimum floor.
pub fn allocate(series: &MassSeries, target: MassValue) -> (MassSeries, BaselinePlan) {
    let plan = BaselinePlan::compute(series, target);
    let adjusted = series
        .iter()
        .map(|v| v.shifted_with_floor(plan.per_row_steps))
        .collect();
    (adjusted, plan)
}
