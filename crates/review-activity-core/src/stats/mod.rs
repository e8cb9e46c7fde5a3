//! Statistics module for review-activity
//!
//! Aggregates completed reviews into a per-day series and lays that series
//! out as a weekly calendar grid for the heat-map.

mod calendar_grid;
mod daily_series;

pub use calendar_grid::{CalendarGrid, WEEKDAYS};
pub use daily_series::{Aggregator, DailySeries, Summary, Window, MAX_WINDOW_DAYS};
