//! Timeframe estimate - projected weeks to reach a goal.

use serde::{Deserialize, Serialize};

/// Average number of weeks in a calendar month.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Projected time range, in whole weeks, to reach a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeframeEstimate {
    /// Fastest plausible outcome
    pub min_weeks: u32,

    /// Slowest plausible outcome
    pub max_weeks: u32,
}

impl TimeframeEstimate {
    /// Create an estimate. Bounds are stored in ascending order.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            min_weeks: a.min(b),
            max_weeks: a.max(b),
        }
    }

    /// Lower bound in months, never below one.
    pub fn min_months(&self) -> u32 {
        weeks_to_months(self.min_weeks)
    }

    /// Upper bound in months, never below one.
    pub fn max_months(&self) -> u32 {
        weeks_to_months(self.max_weeks)
    }
}

/// Month range as shown to the user, e.g. `"2–5 months"` or `"3 months"`.
impl std::fmt::Display for TimeframeEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (min, max) = (self.min_months(), self.max_months());
        if min == max {
            write!(f, "{} months", max)
        } else {
            write!(f, "{}–{} months", min, max)
        }
    }
}

fn weeks_to_months(weeks: u32) -> u32 {
    let months = (f64::from(weeks) / WEEKS_PER_MONTH).round() as u32;
    months.max(1)
}
