use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cep_race::app;
use cep_race::config::{Config, ProviderConfig, RaceConfig};
use cep_race::consts::{APICEP_URL_TEMPLATE, VIACEP_URL_TEMPLATE};

#[derive(Parser)]
#[command(
    name = "cep-race",
    author,
    version,
    about = "Look up a CEP on two providers and print whichever answers first."
)]
struct Cli {
    /// Postal code in the format 12345-678
    cep: Option<String>,

    /// Seconds to wait for the first provider
    #[arg(short, long, default_value = "1", value_parser = parse_seconds)]
    timeout: Duration,

    /// Seconds a single provider request may take
    #[arg(long, default_value = "10", value_parser = parse_seconds)]
    request_timeout: Duration,

    /// Artificial delay before the apicep request, in seconds
    #[arg(long, default_value = "0", value_parser = parse_seconds)]
    apicep_delay: Duration,

    /// Artificial delay before the viacep request, in seconds
    #[arg(long, default_value = "0", value_parser = parse_seconds)]
    viacep_delay: Duration,

    /// apicep endpoint, `{cep}` is replaced with the postal code
    #[arg(long, default_value = APICEP_URL_TEMPLATE)]
    apicep_url: String,

    /// viacep endpoint, `{cep}` is replaced with the postal code
    #[arg(long, default_value = VIACEP_URL_TEMPLATE)]
    viacep_url: String,

    /// Stop as soon as every provider has failed instead of waiting for the timeout
    #[arg(long, default_value_t = false)]
    fail_fast: bool,

    /// Log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            race: RaceConfig {
                timeout: self.timeout,
                request_timeout: self.request_timeout,
                fail_fast: self.fail_fast,
            },
            apicep: ProviderConfig {
                url_template: self.apicep_url.clone(),
                delay: self.apicep_delay,
            },
            viacep: ProviderConfig {
                url_template: self.viacep_url.clone(),
                delay: self.viacep_delay,
            },
        }
    }
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("`{s}`: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let line = app::run(cli.cep.as_deref(), &cli.config()).await?;
    println!("{line}");

    Ok(())
}
