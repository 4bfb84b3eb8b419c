use anyhow::Result;
use clap::Parser;

use wunder_core::config::{Overrides, Preferences};
use wunder_core::model::FetchOutcome;
use wunder_core::provider::WundergroundClient;
use wunder_core::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wunder", version, about = "Fetch current weather from Weather Underground")]
pub struct Cli {
    /// Log informational messages
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log debugging information, including the raw API response
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set and store the API key
    #[arg(short = 'k', long = "key", value_name = "API key")]
    pub api_key: Option<String>,

    /// Set and store the location
    #[arg(short = 'l', long)]
    pub location: Option<String>,

    /// Set and store choice of Imperial units
    #[arg(short = 'i', long, conflicts_with = "metric")]
    pub imperial: bool,

    /// Set and store choice of Metric units
    #[arg(short = 'm', long)]
    pub metric: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        self.init_logging();

        let mut prefs = Preferences::load()?;

        if prefs.apply(&self.overrides()) {
            prefs.save()?;
            log::info!("Stored preferences updated");
        }

        // Every required setting must be known before the network call.
        let settings = prefs.resolve()?;
        log::info!("location set to {}", settings.location);
        log::info!("Units are {}", settings.units);

        let client = WundergroundClient::new(settings.api_key);

        match client.conditions(&settings.location).await? {
            FetchOutcome::Report(document) => {
                let rendered = report::render(&document, settings.units)?;
                print!("{rendered}");
            }
            FetchOutcome::ApiError(description) => {
                println!("Error, Weather Underground reports: {description}");
            }
            FetchOutcome::AmbiguousLocation(candidates) => {
                print!("{}", report::render_ambiguous(&candidates));
            }
        }

        log::info!("Done");
        Ok(())
    }

    /// The two unit flags collapse into the one stored boolean; clap
    /// rejects an invocation that passes both.
    fn unit_override(&self) -> Option<bool> {
        if self.imperial {
            Some(true)
        } else if self.metric {
            Some(false)
        } else {
            None
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            location: self.location.clone(),
            imperial: self.unit_override(),
        }
    }

    fn init_logging(&self) {
        let level = if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        };

        let env = env_logger::Env::default().default_filter_or(level);
        env_logger::init_from_env(env);
    }
}
