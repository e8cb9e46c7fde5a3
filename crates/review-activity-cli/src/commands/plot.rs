use std::path::PathBuf;

use clap::Args;
use review_activity_core::{
    Aggregator, AuthToken, CalendarGrid, HeatmapRenderer, ReviewClient, RunConfig, Settings,
    SettingsOverrides, MAX_WINDOW_DAYS,
};

#[derive(Args)]
pub struct PlotArgs {
    /// Where to save the plot [default: activity.png]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// IANA time zone that decides which day a review counts for [default: US/Pacific]
    #[arg(long, value_name = "TZ")]
    pub timezone: Option<String>,

    /// Number of days to plot, ending today, at most 3660 [default: 365]
    #[arg(
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS))
    )]
    pub days: Option<u32>,

    /// Config file [default: <config dir>/review-activity/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also print the calendar as text
    #[arg(long)]
    pub ascii: bool,

    /// Also print the daily series as JSON
    #[arg(long)]
    pub json: bool,
}

/// Fetch completed reviews, then write the heat-map for the configured window.
pub async fn run(
    args: PlotArgs,
    token: AuthToken,
    debug: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(args.config.as_deref())?.with_overrides(SettingsOverrides {
        timezone: args.timezone,
        window_days: args.days,
        output: args.output,
    });
    // Settings, including the window, are validated before any request.
    let config = RunConfig::new(settings, token, debug)?;
    tracing::debug!(?config, "resolved configuration");

    let client = ReviewClient::new(&config)?;
    let events = client.fetch_completed().await?;
    tracing::info!(count = events.len(), "fetched completed reviews");

    let window = config.window;
    let series = Aggregator::new(config.timezone).aggregate(&events, window);
    tracing::info!(
        start = %window.start(),
        end = %window.end(),
        total = series.total(),
        active_days = series.active_days(),
        "aggregated daily gains"
    );

    let grid = CalendarGrid::from_series(&series);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&series)?);
    }
    if args.ascii {
        print!("{}", grid.render_ascii());
    }

    HeatmapRenderer::new().write_png(&grid, &config.output)?;
    tracing::info!(path = %config.output.display(), "saved activity plot");

    Ok(())
}
