//! Consumption-window heuristics for cellar wines.
//!
//! [`OptimalConsumptionCalculator`] derives scheduling values from a wine's
//! read accessors and never mutates it. The suggested-date table is a
//! placeholder heuristic, not an oenological model; callers should present
//! it as a hint.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::{Wine, WineType};


/// Days ahead of the suggested date during which a wine counts as approaching.
pub const APPROACHING_WINDOW_DAYS: i64 = 90;

/// Coarse readiness classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsumptionStatus {
    /// The suggested date has arrived or passed.
    Optimal,
    /// The suggested date is at most [`APPROACHING_WINDOW_DAYS`] away.
    Approaching,
    /// The suggested date is further away.
    NotReady,
    /// No suggested date is recorded.
    Unknown,
}

impl ConsumptionStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Approaching => "approaching",
            Self::NotReady => "not-ready",
            Self::Unknown => "unknown",
        }
    }

    fn from_days(days_until_optimal: Option<i64>) -> Self {
        match days_until_optimal {
            None => Self::Unknown,
            Some(days) if days <= 0 => Self::Optimal,
            Some(days) if days <= APPROACHING_WINDOW_DAYS => Self::Approaching,
            Some(_) => Self::NotReady,
        }
    }
}

impl fmt::Display for ConsumptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-side summary of a wine's consumption window at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionReport {
    pub status: ConsumptionStatus,
    pub days_until_optimal: Option<i64>,
    pub optimal_to_consume: bool,
}

/// Years to hold a wine of `wine_type` and `age` after it enters the cellar.
///
/// # Examples
/// ```
/// use celleret::domain::{WineType, years_to_wait};
///
/// assert_eq!(years_to_wait(WineType::Red, 1), 2);
/// assert_eq!(years_to_wait(WineType::Rose, 0), 0);
/// ```
pub fn years_to_wait(wine_type: WineType, age: i32) -> i32 {
    match wine_type {
        WineType::Red if age < 3 => 2,
        WineType::Red if age < 10 => 1,
        WineType::Red => 0,
        WineType::White if age < 2 => 1,
        WineType::White => 0,
        WineType::Rose => 0,
        WineType::Sparkling if age < 3 => 1,
        WineType::Sparkling => 0,
    }
}

/// Shift `date` by whole years, keeping month, day and time of day.
///
/// A 29 February landing in a common year overflows to 1 March. A result
/// outside chrono's representable range leaves `date` unchanged.
pub fn add_years(date: DateTime<Utc>, years: i32) -> DateTime<Utc> {
    let target = date.year() + years;
    if let Some(shifted) = date.with_year(target) {
        return shifted;
    }
    date.with_day(28)
        .and_then(|day| day.with_year(target))
        .and_then(|day| day.checked_add_signed(TimeDelta::days(1)))
        .unwrap_or(date)
}

/// Whole days from `now` until `target`, rounding partial days up.
fn ceil_days_between(now: DateTime<Utc>, target: DateTime<Utc>) -> i64 {
    let delta = target - now;
    // `num_days` truncates toward zero, so only a positive remainder rounds up.
    let whole = delta.num_days();
    if delta - TimeDelta::days(whole) > TimeDelta::zero() {
        whole + 1
    } else {
        whole
    }
}

/// Stateless consumption-window service reading time from an injected clock.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use celleret::domain::OptimalConsumptionCalculator;
/// use mockable::DefaultClock;
///
/// let calculator = OptimalConsumptionCalculator::new(Arc::new(DefaultClock));
/// # let _ = calculator;
/// ```
#[derive(Clone)]
pub struct OptimalConsumptionCalculator {
    clock: Arc<dyn Clock>,
}

impl OptimalConsumptionCalculator {
    /// Create a calculator reading "now" from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// `true` iff a suggested date exists and has been reached.
    pub fn is_optimal_to_consume(&self, wine: &Wine) -> bool {
        wine.is_ready_to_consume(self.clock.as_ref())
    }

    /// Days until the suggested date; `None` when no date is set.
    ///
    /// Positive values lie in the future; zero or negative values mean the
    /// date has arrived. Computed from elapsed milliseconds, so any partial
    /// day counts as a full day ahead.
    pub fn days_until_optimal(&self, wine: &Wine) -> Option<i64> {
        let suggested = wine.suggested_consumption_date()?;
        Some(ceil_days_between(self.clock.utc(), suggested))
    }

    /// Heuristic drink-from date: the cellar entry date pushed forward by
    /// [`years_to_wait`] for the wine's type and current age.
    pub fn suggest_consumption_date(&self, wine: &Wine) -> DateTime<Utc> {
        let years = years_to_wait(wine.wine_type(), wine.age(self.clock.as_ref()));
        add_years(wine.cellar_entry_date(), years)
    }

    /// Classify the wine's readiness.
    pub fn consumption_status(&self, wine: &Wine) -> ConsumptionStatus {
        ConsumptionStatus::from_days(self.days_until_optimal(wine))
    }

    /// Status, day count and readiness flag evaluated against one clock reading.
    pub fn consumption_report(&self, wine: &Wine) -> ConsumptionReport {
        let now = self.clock.utc();
        let days_until_optimal = wine
            .suggested_consumption_date()
            .map(|suggested| ceil_days_between(now, suggested));
        let optimal_to_consume = wine
            .suggested_consumption_date()
            .is_some_and(|suggested| now >= suggested);
        ConsumptionReport {
            status: ConsumptionStatus::from_days(days_until_optimal),
            days_until_optimal,
            optimal_to_consume,
        }
    }
}

impl fmt::Debug for OptimalConsumptionCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptimalConsumptionCalculator").finish_non_exhaustive()
    }
}
