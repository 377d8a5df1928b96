use serde::Serialize;
use std::fmt;

use super::error::HandicapError;
use super::round::MAX_RECENT_ROUNDS;
use super::table::{selection, Selection};

/// Slope rating of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;

/// A handicap index, always a multiple of 0.1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct HandicapIndex(f64);

impl HandicapIndex {
    /// Wrap a known index, rounded to one decimal.
    ///
    /// Non-finite values are rejected.
    pub fn new(value: f64) -> Result<Self, HandicapError> {
        if !value.is_finite() {
            return Err(HandicapError::invalid(
                "handicap_index",
                format!("must be a finite number (got {})", value),
            ));
        }
        Ok(HandicapIndex(round_to_tenth(value)))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for HandicapIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Score differential: `(gross - course_rating) * 113 / slope`, unrounded.
pub fn differential(
    gross_score: i32,
    course_rating: f64,
    slope_rating: i32,
) -> Result<f64, HandicapError> {
    check_slope(slope_rating)?;
    check_rating(course_rating)?;
    Ok((gross_score as f64 - course_rating) * STANDARD_SLOPE / slope_rating as f64)
}

/// Handicap index from up to 20 differentials (newest-first).
///
/// Returns `Ok(None)` when fewer than 3 differentials are supplied. More than
/// 20, or any non-finite value, is rejected as invalid input.
pub fn handicap_index(differentials: &[f64]) -> Result<Option<HandicapIndex>, HandicapError> {
    Ok(select(differentials)?.map(|(_, index)| index))
}

/// Course handicap for a course, rounded to the nearest stroke.
///
/// Absent whenever `handicap_index` is absent.
pub fn course_handicap(
    handicap_index: Option<HandicapIndex>,
    slope_rating: i32,
    course_rating: f64,
    par: i32,
) -> Result<Option<i32>, HandicapError> {
    check_slope(slope_rating)?;
    check_rating(course_rating)?;
    Ok(handicap_index.map(|index| {
        let strokes =
            index.value() * slope_rating as f64 / STANDARD_SLOPE + (course_rating - par as f64);
        round_half_away(strokes) as i32
    }))
}

/// Apply the selection table to `differentials`, returning the rule used and
/// the resulting index.
pub(crate) fn select(
    differentials: &[f64],
) -> Result<Option<(Selection, HandicapIndex)>, HandicapError> {
    if differentials.len() > MAX_RECENT_ROUNDS {
        return Err(HandicapError::invalid(
            "differentials",
            format!(
                "must hold at most {} values (got {})",
                MAX_RECENT_ROUNDS,
                differentials.len()
            ),
        ));
    }
    if let Some(bad) = differentials.iter().find(|d| !d.is_finite()) {
        return Err(HandicapError::invalid(
            "differentials",
            format!("must be finite numbers (got {})", bad),
        ));
    }

    let Some(rule) = selection(differentials.len()) else {
        return Ok(None);
    };

    let mut sorted = differentials.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let best = &sorted[..rule.best_count];
    let average = best.iter().sum::<f64>() / best.len() as f64;

    Ok(Some((rule, HandicapIndex(round_to_tenth(average + rule.adjustment)))))
}

/// Round half away from zero to an integer.
///
/// Values within a millionth of a half are treated as exact halves, so
/// `8.499999999999996` (8.5 after float noise) still rounds up.
fn round_half_away(value: f64) -> f64 {
    ((value * 1e6).round() / 1e6).round()
}

/// Round half away from zero to one decimal place.
fn round_to_tenth(value: f64) -> f64 {
    let rounded = round_half_away(value * 10.0) / 10.0;
    // Avoid printing "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn check_slope(slope_rating: i32) -> Result<(), HandicapError> {
    if slope_rating <= 0 {
        return Err(HandicapError::invalid(
            "slope_rating",
            format!("must be positive (got {})", slope_rating),
        ));
    }
    Ok(())
}

fn check_rating(course_rating: f64) -> Result<(), HandicapError> {
    if !course_rating.is_finite() {
        return Err(HandicapError::invalid(
            "course_rating",
            format!("must be a finite number (got {})", course_rating),
        ));
    }
    Ok(())
}
