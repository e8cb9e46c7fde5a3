//! Daily gain aggregation.
//!
//! Review events are bucketed into calendar days of a single time zone and
//! summed into a dense, zero-filled series over a trailing window.

use chrono::{Days, NaiveDate, TimeZone, Utc};
use serde::ser::{Serialize, Serializer};

use crate::api::ReviewEvent;
use crate::error::ConfigError;

/// Longest window accepted, ten years of days.
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// Room a window keeps on both sides for padding it to whole weeks.
const WEEK_SLACK: Days = Days::new(6);

/// Inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: NaiveDate,
    end: NaiveDate,
}

impl Window {
    /// Window covering `start..=end`.
    ///
    /// Returns `None` if `end` precedes `start`, the range is longer than
    /// [`MAX_WINDOW_DAYS`], or it lies within a week of the representable
    /// date range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start > end || (end - start).num_days() >= i64::from(MAX_WINDOW_DAYS) {
            return None;
        }
        start.checked_sub_days(WEEK_SLACK)?;
        end.checked_add_days(WEEK_SLACK)?;
        Some(Self { start, end })
    }

    /// The `days`-long window whose last day is `end`.
    pub fn trailing(end: NaiveDate, days: u32) -> Result<Self, ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            key: "window_days".into(),
            message: message.into(),
        };
        if days == 0 {
            return Err(invalid("must be at least 1"));
        }
        if days > MAX_WINDOW_DAYS {
            return Err(invalid(&format!("must be at most {MAX_WINDOW_DAYS}")));
        }
        end.checked_sub_days(Days::new(u64::from(days) - 1))
            .and_then(|start| Self::new(start, end))
            .ok_or_else(|| invalid("window reaches outside the representable dates"))
    }

    /// Trailing window ending on today's date as seen in `tz`.
    pub fn ending_today<Z: TimeZone>(tz: &Z, days: u32) -> Result<Self, ConfigError> {
        let today = Utc::now().with_timezone(tz).date_naive();
        Self::trailing(today, days)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of dates covered.
    pub fn days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Position of `date` within the window.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.contains(date)
            .then(|| (date - self.start).num_days() as usize)
    }

    /// Every date of the window in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.days())
    }
}

/// Per-day summed points over a [`Window`], one entry per date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    window: Window,
    values: Vec<f64>,
}

impl DailySeries {
    /// All-zero series.
    pub fn zeros(window: Window) -> Self {
        Self {
            window,
            values: vec![0.0; window.days()],
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// A window always has at least one day, so this is only true for
    /// hand-built series.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(date, points)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.window.dates().zip(self.values.iter().copied())
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.window.index_of(date).map(|i| self.values[i])
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Days with a non-zero sum.
    pub fn active_days(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }

    /// Highest-earning day, if any day earned more than zero.
    pub fn best_day(&self) -> Option<(NaiveDate, f64)> {
        self.iter()
            .filter(|(_, v)| *v > 0.0)
            .fold(None, |best, (date, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((date, v)),
            })
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.total(),
            active_days: self.active_days(),
            days: self.len(),
            best_day: self.best_day(),
        }
    }
}

#[derive(serde::Serialize)]
struct DayEntry {
    date: NaiveDate,
    points: f64,
}

impl Serialize for DailySeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(date, points)| DayEntry { date, points }))
    }
}

/// Headline numbers for a series.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub active_days: usize,
    pub days: usize,
    pub best_day: Option<(NaiveDate, f64)>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total: {:.2} over {} active days of {}",
            self.total, self.active_days, self.days
        )?;
        if let Some((date, points)) = self.best_day {
            write!(f, "; best day {date} ({points:.2})")?;
        }
        Ok(())
    }
}

/// Sums review points per calendar day in a fixed time zone.
pub struct Aggregator<Z: TimeZone> {
    tz: Z,
}

impl<Z: TimeZone> Aggregator<Z> {
    pub fn new(tz: Z) -> Self {
        Self { tz }
    }

    /// Build the series for `window`. Events whose local date falls outside
    /// the window are dropped; events on the same day are summed.
    pub fn aggregate(&self, events: &[ReviewEvent], window: Window) -> DailySeries {
        let mut series = DailySeries::zeros(window);
        let mut skipped = 0usize;

        for event in events {
            let date = event.timestamp.with_timezone(&self.tz).date_naive();
            match window.index_of(date) {
                Some(i) => series.values[i] += event.points,
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "reviews outside the window ignored");
        }

        series
    }
}
