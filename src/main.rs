use anyhow::{bail, Context, Result};
use campsite_checker::recreation::WEB_BASE_URL;
use campsite_checker::report::has_availability;
use campsite_checker::{
    render, AvailabilityChecker, ClientConfig, OutputFormat, RecreationClient, SearchConfig,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "campsite-checker",
    version,
    about = "Check recreation.gov campgrounds for open campsites"
)]
struct Cli {
    /// Profile name, read from `cfg_<PROFILE>.json`
    profile: Option<String>,

    /// Explicit profile path, instead of a profile name
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Where to write the report, `-` for stdout
    #[arg(long, short, default_value = "output.html")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Minimum consecutive nights; defaults to the whole window
    #[arg(long, allow_negative_numbers = true)]
    nights: Option<i64>,

    /// Only consider campsites of this type, e.g. "STANDARD NONELECTRIC"
    #[arg(long)]
    campsite_type: Option<String>,

    /// Only consider these campsite ids (repeatable)
    #[arg(long = "campsite-id")]
    campsite_ids: Vec<String>,

    #[arg(long, default_value = WEB_BASE_URL)]
    base_url: String,

    #[arg(long, default_value_t = 30000)]
    timeout_ms: u64,

    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "campsite_checker=debug"
    } else {
        "campsite_checker=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let path = match (&cli.config, &cli.profile) {
        (Some(path), _) => path.clone(),
        (None, Some(profile)) => SearchConfig::profile_path(profile),
        (None, None) => bail!("Either a profile name or --config is required"),
    };

    let mut config = SearchConfig::load(&path)
        .with_context(|| format!("Failed to load search profile {}", path.display()))?;

    if cli.nights.is_some() {
        config.nights = cli.nights;
    }
    if cli.campsite_type.is_some() {
        config.campsite_type = cli.campsite_type.clone();
    }
    if !cli.campsite_ids.is_empty() {
        config.campsite_ids = cli.campsite_ids.clone();
    }

    let query = config.query()?;
    info!(
        "Checking {} campground(s) from {} to {}",
        config.enabled_parks().count(),
        query.window.start(),
        query.window.end()
    );

    let client = RecreationClient::new(ClientConfig {
        base_url: cli.base_url.clone(),
        timeout_ms: cli.timeout_ms,
        ..ClientConfig::default()
    })?;
    let checker = AvailabilityChecker::new(client);

    let reports = checker
        .check_parks(config.enabled_parks(), &query)
        .await
        .context("Availability check failed")?;

    let rendered = render(cli.format, &reports, &query.window)?;
    if cli.output.as_os_str() == "-" {
        println!("{}", rendered);
    } else {
        std::fs::write(&cli.output, rendered)
            .with_context(|| format!("Failed to write report to {}", cli.output.display()))?;
        info!("Wrote report to {}", cli.output.display());
    }

    if !has_availability(&reports) {
        info!("No campsites available");
    }

    Ok(())
}
