//! Fixed-point mass quantities.
//!
//! Every mass is stored as an integer count of grams (0.001 kg). Decimal text
//! and floats only appear at the boundary: parsing input cells, parsing the
//! target total, and printing results.

use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// Number of quantization steps in one whole unit.
pub const SCALE: i64 = 1_000;

/// Largest accepted value, in steps: 15 significant digits, the most an
/// `f64` carries without loss, so every accepted value prints back exactly
/// in JSON output. Totals are not bounded by this; sum with
/// [`MassSeries::checked_total`] where overflow matters.
pub const MAX_STEPS: i64 = 999_999_999_999_999;

/// The fixed quantization unit, 0.001.
pub const STEP: MassValue = MassValue(1);

/// No adjusted value may end up below this.
pub const MINIMUM_FLOOR: MassValue = STEP;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseMassError {
    #[error("not a number: {0:?}")]
    NotANumber(String),
    #[error("negative mass: {0:?}")]
    Negative(String),
    #[error("mass out of range: {0:?}")]
    OutOfRange(String),
}

impl ParseMassError {
    fn relabel(self, input: &str) -> Self {
        let input = input.to_string();
        match self {
            ParseMassError::NotANumber(_) => ParseMassError::NotANumber(input),
            ParseMassError::Negative(_) => ParseMassError::Negative(input),
            ParseMassError::OutOfRange(_) => ParseMassError::OutOfRange(input),
        }
    }
}

/// A quantity with exactly three fractional digits.
///
/// Arithmetic is plain integer arithmetic on the step count, so repeated
/// adjustments never drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MassValue(i64);

impl MassValue {
    pub const fn from_steps(steps: i64) -> Self {
        MassValue(steps)
    }

    pub const fn steps(self) -> i64 {
        self.0
    }

    /// Quantize a float to the nearest step, half away from zero.
    pub fn from_f64(value: f64) -> Result<Self, ParseMassError> {
        let raw = value.to_string();
        if !value.is_finite() {
            return Err(ParseMassError::NotANumber(raw));
        }
        if value < 0.0 {
            return Err(ParseMassError::Negative(raw));
        }
        let scaled = (value * SCALE as f64).round();
        if scaled > MAX_STEPS as f64 {
            return Err(ParseMassError::OutOfRange(raw));
        }
        Ok(MassValue(scaled as i64))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Shift by a signed number of steps, clamping at `MINIMUM_FLOOR`.
    pub fn shifted_with_floor(self, steps: i64) -> MassValue {
        MassValue(self.0.saturating_add(steps).max(MINIMUM_FLOOR.0))
    }

    /// `self * n`, the total of `n` rows each holding `self`.
    pub fn times(self, n: usize) -> MassValue {
        MassValue(self.0.saturating_mul(n as i64))
    }

    pub fn checked_add(self, rhs: MassValue) -> Option<MassValue> {
        self.0.checked_add(rhs.0).map(MassValue)
    }

    pub fn checked_sub(self, rhs: MassValue) -> Option<MassValue> {
        self.0.checked_sub(rhs.0).map(MassValue)
    }
}

// `+`, `-` and `Sum` saturate instead of wrapping. The pre-check rejects
// series whose exact total or difference to the target does not fit, so the
// pipeline never reaches the saturation point.
impl std::ops::Add for MassValue {
    type Output = MassValue;

    fn add(self, rhs: MassValue) -> MassValue {
        MassValue(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::Sub for MassValue {
    type Output = MassValue;

    fn sub(self, rhs: MassValue) -> MassValue {
        MassValue(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for MassValue {
    fn sum<I: Iterator<Item = MassValue>>(iter: I) -> MassValue {
        MassValue(iter.fold(0i64, |acc, v| acc.saturating_add(v.0)))
    }
}

impl<'a> Sum<&'a MassValue> for MassValue {
    fn sum<I: Iterator<Item = &'a MassValue>>(iter: I) -> MassValue {
        iter.copied().sum()
    }
}

impl fmt::Display for MassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u64;
        write!(f, "{}{}.{:03}", sign, abs / scale, abs % scale)
    }
}

/// Parses plain decimal text (`12`, `12.5`, `.250`, `+3.0004`). Digits past
/// the third fractional place round half away from zero. Anything else,
/// including exponent notation, falls back to float parsing.
impl FromStr for MassValue {
    type Err = ParseMassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseMassError::NotANumber(s.to_string()));
        }
        if let Some(value) = parse_plain_decimal(text) {
            return value.map_err(|_| ParseMassError::OutOfRange(s.to_string()));
        }
        if text.starts_with('-') && text.trim_start_matches('-').parse::<f64>().is_ok() {
            return Err(ParseMassError::Negative(s.to_string()));
        }
        match text.parse::<f64>() {
            Ok(v) => MassValue::from_f64(v).map_err(|e| e.relabel(s)),
            Err(_) => Err(ParseMassError::NotANumber(s.to_string())),
        }
    }
}

/// `None` when the text is not a plain non-negative decimal.
fn parse_plain_decimal(text: &str) -> Option<Result<MassValue, ()>> {
    let body = text.strip_prefix('+').unwrap_or(text);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut steps: i64 = 0;
    for b in int_part.bytes() {
        steps = match steps
            .checked_mul(10)
            .and_then(|s| s.checked_add(i64::from(b - b'0')))
        {
            Some(s) => s,
            None => return Some(Err(())),
        };
    }
    let mut frac = frac_part.bytes();
    for _ in 0..3 {
        let digit = frac.next().map(|b| i64::from(b - b'0')).unwrap_or(0);
        steps = match steps.checked_mul(10).and_then(|s| s.checked_add(digit)) {
            Some(s) => s,
            None => return Some(Err(())),
        };
    }
    if frac.next().is_some_and(|b| b >= b'5') {
        steps += 1;
    }
    if steps > MAX_STEPS {
        return Some(Err(()));
    }
    Some(Ok(MassValue(steps)))
}

/// Written as a JSON number. Exact for anything up to `MAX_STEPS`.
impl Serialize for MassValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

/// An ordered column of masses, one per data row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct MassSeries(Vec<MassValue>);

impl MassSeries {
    pub fn new(values: Vec<MassValue>) -> Self {
        MassSeries(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Saturating total. See [`MassSeries::checked_total`].
    pub fn total(&self) -> MassValue {
        self.0.iter().sum()
    }

    /// `None` when the exact total does not fit in an `i64` step count.
    pub fn checked_total(&self) -> Option<MassValue> {
        self.0
            .iter()
            .try_fold(MassValue(0), |acc, v| acc.checked_add(*v))
    }

    pub fn values(&self) -> &[MassValue] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MassValue> {
        self.0.iter()
    }

    pub(crate) fn values_mut(&mut self) -> &mut [MassValue] {
        &mut self.0
    }
}

impl From<Vec<MassValue>> for MassSeries {
    fn from(values: Vec<MassValue>) -> Self {
        MassSeries(values)
    }
}

impl FromIterator<MassValue> for MassSeries {
    fn from_iter<I: IntoIterator<Item = MassValue>>(iter: I) -> Self {
        MassSeries(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MassSeries {
    type Item = &'a MassValue;
    type IntoIter = std::slice::Iter<'a, MassValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
