//! Calendar heat-map layout.
//!
//! Lays a [`DailySeries`] out the way contribution calendars do: one column
//! per week, one row per weekday, Sunday on top.

use chrono::{Datelike, Days, NaiveDate};

use super::daily_series::{DailySeries, Summary, Window};

/// Rows of the grid, Sunday first.
pub const WEEKDAYS: usize = 7;

const DAY_NAMES: [&str; WEEKDAYS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Week-by-weekday grid. Cells before the window start or after its end are
/// `None`.
#[derive(Debug, Clone)]
pub struct CalendarGrid {
    window: Window,
    first_sunday: NaiveDate,
    weeks: usize,
    /// Week-major: index is `week * 7 + weekday`.
    cells: Vec<Option<f64>>,
    lowest: f64,
    highest: f64,
    summary: Summary,
}

impl CalendarGrid {
    /// Build the grid for a series.
    pub fn from_series(series: &DailySeries) -> Self {
        let window = series.window();
        let pad = window.start().weekday().num_days_from_sunday() as usize;
        // `Window` keeps a week of room before its start, so this only falls
        // back for a date range chrono cannot pad.
        let (first_sunday, pad_before) =
            match window.start().checked_sub_days(Days::new(pad as u64)) {
                Some(sunday) => (sunday, pad),
                None => (window.start(), 0),
            };
        let weeks = (pad_before + window.days()).div_ceil(WEEKDAYS);

        let mut cells = vec![None; weeks * WEEKDAYS];
        for (offset, (_, points)) in series.iter().enumerate() {
            cells[pad_before + offset] = Some(points);
        }

        Self {
            window,
            first_sunday,
            weeks,
            cells,
            lowest: series.min().min(0.0),
            highest: series.max(),
            summary: series.summary(),
        }
    }

    /// Number of week columns.
    pub fn weeks(&self) -> usize {
        self.weeks
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Value at `(week, weekday)`; `None` outside the window or the grid.
    pub fn cell(&self, week: usize, weekday: usize) -> Option<f64> {
        if weekday >= WEEKDAYS {
            return None;
        }
        self.cells.get(week * WEEKDAYS + weekday).copied().flatten()
    }

    /// Calendar date shown at `(week, weekday)`, saturating at the last
    /// representable date.
    pub fn date_at(&self, week: usize, weekday: usize) -> NaiveDate {
        self.first_sunday
            .checked_add_days(Days::new((week * WEEKDAYS + weekday) as u64))
            .unwrap_or(NaiveDate::MAX)
    }

    /// `(week, weekday)` of an in-window date.
    pub fn position(&self, date: NaiveDate) -> Option<(usize, usize)> {
        if !self.window.contains(date) {
            return None;
        }
        let offset = (date - self.first_sunday).num_days() as usize;
        Some((offset / WEEKDAYS, offset % WEEKDAYS))
    }

    /// Relative intensity of a value in `0.0..=1.0`.
    ///
    /// The scale runs from the series minimum (or zero, if lower) to the
    /// series maximum.
    pub fn intensity(&self, value: f64) -> f64 {
        let spread = self.highest - self.lowest;
        if spread <= 0.0 {
            return 0.0;
        }
        ((value - self.lowest) / spread).clamp(0.0, 1.0)
    }

    /// One label per week: the month of the week's first in-window day, or
    /// an empty string when the previous week already named that month.
    pub fn month_labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.weeks);
        let mut current: Option<(i32, u32)> = None;

        for week in 0..self.weeks {
            let first = self.date_at(week, 0).max(self.window.start());
            let month = (first.year(), first.month());
            if current == Some(month) {
                labels.push(String::new());
            } else {
                labels.push(first.format("%b").to_string());
                current = Some(month);
            }
        }

        labels
    }

    /// Shade character for a cell.
    pub fn heat_char(&self, cell: Option<f64>) -> char {
        let Some(value) = cell else {
            return '·';
        };
        let heat = self.intensity(value);
        if heat <= 0.0 {
            ' '
        } else if heat <= 0.25 {
            '░'
        } else if heat <= 0.5 {
            '▒'
        } else if heat <= 0.75 {
            '▓'
        } else {
            '█'
        }
    }

    /// Render the grid as text, two characters per week column.
    pub fn render_ascii(&self) -> String {
        let mut output = String::new();

        output.push_str("\nReview Activity\n");
        output.push_str(&"=".repeat(4 + self.weeks * 2));
        output.push('\n');

        // Month header; a label is dropped if it would overlap the previous one.
        let mut header = vec![' '; self.weeks * 2 + 3];
        let mut free_from = 0;
        for (week, label) in self.month_labels().iter().enumerate() {
            let col = week * 2;
            if label.is_empty() || col < free_from {
                continue;
            }
            for (i, c) in label.chars().enumerate() {
                if let Some(slot) = header.get_mut(col + i) {
                    *slot = c;
                }
            }
            free_from = col + label.chars().count() + 1;
        }
        output.push_str("    ");
        output.push_str(header.iter().collect::<String>().trim_end());
        output.push('\n');

        for (weekday, name) in DAY_NAMES.iter().enumerate() {
            output.push_str(&format!("{name:<4}"));
            for week in 0..self.weeks {
                output.push(self.heat_char(self.cell(week, weekday)));
                output.push(' ');
            }
            output.push('\n');
        }

        output.push_str(&"=".repeat(4 + self.weeks * 2));
        output.push('\n');
        output.push_str("Legend: ` ` none  ░ low  ▒  ▓  █ high  · outside window\n");
        output.push_str(&self.summary.to_string());
        output.push('\n');

        output
    }
}
