use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use review_activity_core::{resolve_token, TOKEN_ENV_VAR};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "plot_activity",
    version,
    about = "Makes a GitHub style activity plot of daily review gains."
)]
struct Cli {
    /// Your review auth token. Log in to the reviewer dashboard, open the
    /// JavaScript console and copy `JSON.parse(localStorage.currentUser).token`.
    /// Can also be stored in the environment variable UDACITY_AUTH_TOKEN.
    #[arg(short = 'T', long = "auth-token", value_name = "TOKEN")]
    auth_token: Option<String>,

    /// Turn on debug statements
    #[arg(short, long)]
    debug: bool,

    #[command(flatten)]
    plot: commands::plot::PlotArgs,
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "review_activity_core=debug,plot_activity=debug,info"
    } else {
        "review_activity_core=info,plot_activity=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // Resolved before anything touches the network or the output file.
    let token = match resolve_token(cli.auth_token, std::env::var(TOKEN_ENV_VAR).ok()) {
        Ok(token) => token,
        Err(e) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, e)
            .exit(),
    };

    if let Err(e) = commands::plot::run(cli.plot, token, cli.debug).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
