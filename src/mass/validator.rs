use super::error::{AdjustmentError, SumMismatch};
use super::units::{MassSeries, MassValue, MINIMUM_FLOOR};

/// Smallest total `rows` values can reach without breaching the floor.
pub fn minimum_total(rows: usize) -> MassValue {
    MINIMUM_FLOOR.times(rows)
}

/// Reject inputs no allocation could satisfy.
pub fn precheck(series: &MassSeries, target: MassValue) -> Result<(), AdjustmentError> {
    if series.is_empty() {
        return Err(AdjustmentError::NoRowsFound);
    }
    let total = series
        .checked_total()
        .ok_or(AdjustmentError::OutOfRange { rows: series.len() })?;
    if target.checked_sub(total).is_none() {
        return Err(AdjustmentError::OutOfRange { rows: series.len() });
    }
    let minimum = minimum_total(series.len());
    if target < minimum {
        return Err(AdjustmentError::TargetTooSmall {
            rows: series.len(),
            minimum,
        });
    }
    Ok(())
}

/// Recompute the final total; a difference is reported, not fatal.
pub fn postcheck(series: &MassSeries, target: MassValue) -> Option<SumMismatch> {
    let final_total = series.total();
    if final_total != target {
        return Some(SumMismatch {
            final_total,
            target_total: target,
        });
    }
    None
}
