use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use std::path::PathBuf;
use tracing::debug;
use wetter_core::{Config, Dashboard, DashboardSession, DisplayMode, DisplayState, Outcome};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wetter", version, about = "Wetterdashboard Deutschland")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard for one German city.
    Show {
        /// City name, e.g. "Berlin" or "Frankfurt am Main".
        city: String,

        /// Show only today's hours in the temperature chart.
        #[arg(long)]
        today: bool,
    },

    /// Enter city names one after another.
    Interactive,

    /// Edit service endpoints and timeouts.
    Configure,
}

const HELP_LINE: &str = "Stadt eingeben (z. B. Berlin, Hamburg, München …), :heute / :woche zum Umschalten, :q zum Beenden";

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;

        match self.command {
            Command::Show { city, today } => {
                let dashboard = Dashboard::from_config(&config)?;
                let mode = if today { DisplayMode::Today } else { DisplayMode::FullHorizon };

                match dashboard.run(&city, Utc::now()).await.display_state() {
                    Some(state) => print!("{}", render(&state, mode)),
                    None => println!("Keine Stadt angegeben."),
                }
            }
            Command::Interactive => {
                let dashboard = Dashboard::from_config(&config)?;
                interactive(DashboardSession::new(dashboard)).await?;
            }
            Command::Configure => {
                let updated = configure(config)?;
                let path = match &self.config {
                    Some(path) => {
                        updated.save_to(path)?;
                        path.clone()
                    }
                    None => updated.save()?,
                };
                println!("Configuration saved to {}", path.display());
            }
        }

        Ok(())
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

/// One committed line per input event. Toggle commands re-render the last
/// dashboard without another request.
async fn interactive(session: DashboardSession) -> Result<()> {
    let mut current: Option<DisplayState> = None;
    let mut mode = DisplayMode::FullHorizon;

    println!("{HELP_LINE}");

    loop {
        let line = Text::new("Stadt:").prompt().context("Failed to read city name")?;

        let toggle = match line.trim() {
            ":q" => break,
            ":heute" => Some(DisplayMode::Today),
            ":woche" => Some(DisplayMode::FullHorizon),
            _ => None,
        };

        if let Some(selected) = toggle {
            mode = selected;
            match &current {
                Some(state) => print!("{}", render(state, mode)),
                None => println!("Noch keine Daten geladen."),
            }
            continue;
        }

        let outcome = session.submit(&line, Utc::now()).await;
        if matches!(outcome, Outcome::NoInput) {
            debug!("Ignoring blank input");
            continue;
        }
        if let Some(state) = outcome.display_state() {
            print!("{}", render(&state, mode));
            current = Some(state);
        }
    }

    session.cancel();
    Ok(())
}

fn configure(mut config: Config) -> Result<Config> {
    config.geocoder.base_url = Text::new("Geocoding service URL:")
        .with_default(&config.geocoder.base_url)
        .prompt()
        .context("Failed to read geocoding URL")?;

    config.geocoder.user_agent = Text::new("User-Agent for geocoding requests:")
        .with_default(&config.geocoder.user_agent)
        .prompt()
        .context("Failed to read User-Agent")?;

    config.geocoder.timeout_secs = CustomType::<u64>::new("Geocoding timeout (seconds):")
        .with_default(config.geocoder.timeout_secs)
        .prompt()
        .context("Failed to read geocoding timeout")?;

    config.forecast.base_url = Text::new("Forecast service URL:")
        .with_default(&config.forecast.base_url)
        .prompt()
        .context("Failed to read forecast URL")?;

    config.forecast.timeout_secs = CustomType::<u64>::new("Forecast timeout (seconds):")
        .with_default(config.forecast.timeout_secs)
        .prompt()
        .context("Failed to read forecast timeout")?;

    Ok(config)
}
