use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use retail_dash::app::App;
use retail_dash::cli::CliArgs;
use retail_dash::logging::{self, LogTarget};
use retail_dash::{event, terminal, AppConfig, HttpMetricsSource};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = AppConfig::load().wrap_err("Invalid configuration")?;
    let headless = args.headless || args.json || !is_terminal();
    logging::init(
        &config,
        if headless { LogTarget::Stderr } else { LogTarget::File },
    )?;
    info!(api = %config.api_url, region = %config.region, "starting dashboard");

    let source = Arc::new(
        HttpMetricsSource::new(&config.api_url, config.timeout)
            .wrap_err("Failed to build HTTP client")?,
    );
    let mut app = App::new(config.years.iter().cloned(), config.region.clone());

    if headless {
        return event::run_headless(&mut app, source, config.timeout, args.json).await;
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app, source).await;

    // Restore terminal
    terminal::cleanup(true, true);

    if let Err(e) = &result {
        error!("dashboard stopped: {e:?}");
    }
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
