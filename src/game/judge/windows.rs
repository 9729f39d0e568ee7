//! Timing windows: map the offset between a hit and the note time to a result.

use crate::game::OffsetType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered by quality, `Miss` is the worst.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum HitResult {
    Miss,
    Bad,
    Good,
    Great,
    Perfect,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WindowsError {
    #[error("the windows table is empty")]
    Empty,
    #[error("the windows table has no hittable result")]
    NoHitResult,
    #[error("tolerance {tolerance} of {result:?} is not a finite non-negative value")]
    InvalidTolerance { result: HitResult, tolerance: OffsetType },
    #[error("{result:?} must be listed before results of lower quality")]
    NotOrdered { result: HitResult },
    #[error("tolerance {tolerance} of {result:?} is tighter than the previous {previous}")]
    NotMonotonic {
        result: HitResult,
        tolerance: OffsetType,
        previous: OffsetType,
    },
}

/// Tolerance table, tightest first.
///
/// The widest row is the timeout boundary. A `Miss` row, if present, is always the last one and
/// only widens that boundary: presses inside it resolve to the loosest hittable result.
#[derive(Clone, Debug, PartialEq)]
pub struct Windows {
    rows: Vec<(HitResult, OffsetType)>,
}

impl Windows {
    pub fn new(
        rows: impl IntoIterator<Item = (HitResult, OffsetType)>,
    ) -> Result<Self, WindowsError> {
        let rows: Vec<_> = rows.into_iter().collect();
        if rows.is_empty() {
            return Err(WindowsError::Empty);
        }
        let mut last: Option<(HitResult, OffsetType)> = None;
        for &(result, tolerance) in &rows {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(WindowsError::InvalidTolerance { result, tolerance });
            }
            if let Some((last_result, last_tolerance)) = last {
                if result >= last_result {
                    return Err(WindowsError::NotOrdered { result });
                }
                if tolerance < last_tolerance {
                    return Err(WindowsError::NotMonotonic {
                        result,
                        tolerance,
                        previous: last_tolerance,
                    });
                }
            }
            last = Some((result, tolerance));
        }
        if rows[0].0 == HitResult::Miss {
            return Err(WindowsError::NoHitResult);
        }
        Ok(Self { rows })
    }

    fn hit_rows(&self) -> impl Iterator<Item = &(HitResult, OffsetType)> {
        self.rows.iter().filter(|(r, _)| *r != HitResult::Miss)
    }

    /// The widest tolerance, past it the note can only be missed.
    #[inline]
    pub fn widest(&self) -> OffsetType {
        // `new` rejects empty tables.
        self.rows[self.rows.len() - 1].1
    }

    pub fn window_for(&self, result: HitResult) -> Option<OffsetType> {
        self.rows.iter().find(|(r, _)| *r == result).map(|(_, t)| *t)
    }

    /// Result for a press `delta` ms after the note time, `None` if outside every window.
    pub fn resolve(&self, delta: OffsetType) -> Option<HitResult> {
        let distance = delta.abs();
        let mut loosest = None;
        for &(result, tolerance) in self.hit_rows() {
            if distance <= tolerance {
                return Some(result);
            }
            loosest = Some(result);
        }
        if self.is_within_timeout_window(delta) {
            loosest
        } else {
            None
        }
    }

    #[inline]
    pub fn is_within_timeout_window(&self, delta: OffsetType) -> bool {
        delta.abs() <= self.widest()
    }
}

impl Default for Windows {
    fn default() -> Self {
        Self {
            rows: vec![
                (HitResult::Perfect, 30.0),
                (HitResult::Great, 60.0),
                (HitResult::Good, 100.0),
                (HitResult::Bad, 150.0),
                (HitResult::Miss, 200.0),
            ],
        }
    }
}
