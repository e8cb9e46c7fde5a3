//! # review-activity core library
//!
//! Turns a reviewer's completed reviews into a contribution-style calendar
//! heat-map of daily gains.
//!
//! ## Pipeline
//!
//! - **Fetch**: [`ReviewClient`] pulls completed submissions from the review
//!   API and decodes them into [`ReviewEvent`]s
//! - **Aggregate**: [`Aggregator`] sums points per calendar day of one time
//!   zone into a gap-free [`DailySeries`] over a trailing [`Window`]
//! - **Render**: [`CalendarGrid`] lays the series out by week and weekday and
//!   [`HeatmapRenderer`] draws it to a PNG
//!
//! Configuration is resolved once into a [`RunConfig`] and passed explicitly
//! to each stage.

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod stats;

pub use api::{decode_events, ReviewClient, ReviewEvent};
pub use config::{resolve_token, AuthToken, RunConfig, Settings, SettingsOverrides, TOKEN_ENV_VAR};
pub use error::{ConfigError, CoreError, FetchError, Result};
pub use render::HeatmapRenderer;
pub use stats::{Aggregator, CalendarGrid, DailySeries, Summary, Window, MAX_WINDOW_DAYS};
