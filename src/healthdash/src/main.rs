#[macro_use]
extern crate log;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::anyhow;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use healthdash::{Clock, HomeConfig, HomeState, HomeViewModel, SystemClock, render};
use healthdash_provider::ExportProvider;
use tokio::time::timeout;

#[derive(Parser)]
pub struct HealthDashCli {
    /// JSON health export to read from
    #[arg(env = "HEALTHDASH_EXPORT", long)]
    pub export: PathBuf,
    /// Day to show, defaults to today (UTC)
    #[arg(env = "HEALTHDASH_DATE", long)]
    pub date: Option<NaiveDate>,
    /// Ignore results of fetches started for an earlier date selection
    #[arg(env = "HEALTHDASH_DISCARD_STALE", long)]
    pub discard_stale_results: bool,
    /// Seconds to wait for the provider before giving up
    #[arg(env = "HEALTHDASH_TIMEOUT", long, default_value_t = 30)]
    pub timeout: u64,
    #[clap(subcommand)]
    pub subcommand: HealthDashCommand,
}

#[derive(Subcommand)]
pub enum HealthDashCommand {
    ///
    /// Print the stat cards for the selected day
    ///
    Today,
    ///
    /// List exercise sessions of the last six months
    ///
    Activities,
    ///
    /// Print the activity heat map of the last eight weeks
    ///
    HeatMap,
    ///
    /// Print everything
    ///
    Dashboard,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = HealthDashCli::parse();
    let provider = Arc::new(ExportProvider::open(&cli.export)?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let config = HomeConfig {
        discard_stale_results: cli.discard_stale_results,
        ..HomeConfig::default()
    };
    let date = cli.date.unwrap_or_else(|| clock.today());
    let view_model = HomeViewModel::new(HomeState::new(date), provider, clock, config);

    let mut state = view_model.subscribe();
    let settled = timeout(
        Duration::from_secs(cli.timeout),
        state.wait_for(HomeState::is_settled),
    )
    .await
    .map_err(|_| anyhow!("Health provider did not answer within {}s", cli.timeout))??
    .clone();
    view_model.close();

    if let Some(message) = render::blocker(&settled) {
        warn!("{}", message);
        println!("{}", message);
        return Ok(());
    }

    let output = match cli.subcommand {
        HealthDashCommand::Today => render::today(&settled),
        HealthDashCommand::Activities => render::activities(&settled),
        HealthDashCommand::HeatMap => render::heat_map(&settled),
        HealthDashCommand::Dashboard => render::dashboard(&settled),
    };
    print!("{}", output);

    Ok(())
}
