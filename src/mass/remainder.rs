//! Remainder distribution.
//!
//! After the baseline pass the total is off by a handful of steps. Those are
//! handed out one at a time, visiting rows in index order and wrapping
//! around, so no two rows end up more than one step apart in how much
//! residual they absorbed. When removing steps, rows that would drop below
//! the floor are skipped without consuming a step.
//!
//! ```text
//! leftover = target - total(series)
//! sign     = +1 if leftover > 0 else -1
//! counter  = 0
//! while remaining > 0:
//!     i = counter % n; counter += 1
//!     if sign < 0 and series[i] - STEP < FLOOR: skip
//!     series[i] += sign * STEP; remaining -= 1
//! ```
//!
//! If a whole cycle goes by without applying a step, every row is pinned at
//! the floor and the loop would never finish; that is reported as
//! `Unsatisfiable` instead.

use super::error::AdjustmentError;
use super::units::{MassSeries, MassValue, MINIMUM_FLOOR, STEP};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RemainderReport {
    /// Signed residual in steps at the start of the pass.
    pub leftover_steps: i64,
    pub applied_steps: u64,
    /// Row visits that were passed over because of the floor.
    pub skipped_visits: u64,
}

pub fn distribute(
    series: &MassSeries,
    target: MassValue,
) -> Result<(MassSeries, RemainderReport), AdjustmentError> {
    let mut adjusted = series.clone();
    let leftover_steps = (target - series.total()).steps();
    let mut report = RemainderReport {
        leftover_steps,
        ..RemainderReport::default()
    };

    let n = adjusted.len();
    if leftover_steps == 0 || n == 0 {
        return Ok((adjusted, report));
    }

    let sign: i64 = if leftover_steps > 0 { 1 } else { -1 };
    let mut remaining = leftover_steps.unsigned_abs();
    let values = adjusted.values_mut();

    let mut counter = 0usize;
    let mut idle_visits = 0usize;
    while remaining > 0 {
        let i = counter % n;
        counter = counter.wrapping_add(1);

        if sign < 0 && values[i] - STEP < MINIMUM_FLOOR {
            report.skipped_visits += 1;
            idle_visits += 1;
            if idle_visits >= n {
                return Err(AdjustmentError::Unsatisfiable {
                    remaining_steps: remaining,
                    rows: n,
                });
            }
            continue;
        }

        values[i] = MassValue::from_steps(values[i].steps() + sign);
        remaining -= 1;
        report.applied_steps += 1;
        idle_visits = 0;
    }

    Ok((adjusted, report))
}
