use std::time::Duration;

use color_eyre::eyre::Result;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use heatwatch_energy::{refresh, Aggregator, SystemClock, Trigger};

use crate::config::UserConfig;
use crate::data::SqliteSource;

use super::snapshot_json;

pub struct PipeOptions {
    pub samples: u32,
    pub interval: Duration,
    pub compact: bool,
    pub points: bool,
}

pub fn run(config: &UserConfig, options: PipeOptions) -> Result<()> {
    let source = SqliteSource::open(&config.database, config.table_layout())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(config, &source, options))
}

async fn run_async(config: &UserConfig, source: &SqliteSource, options: PipeOptions) -> Result<()> {
    let aggregator = Aggregator::new(config.energy_config());
    let days = config.lookback();
    let interval = options.interval.max(Duration::from_secs(1));

    info!(
        database = ?source.path(),
        days = days.days(),
        interval_secs = interval.as_secs(),
        samples = options.samples,
        "Pipe starting"
    );

    let mut tick = tokio::time::interval(interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut counter = 0u32;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                match refresh(source, &SystemClock, &aggregator, days, Trigger::Tick) {
                    Ok(snapshot) => {
                        let doc = snapshot_json(&snapshot, options.points);
                        if options.compact {
                            println!("{}", serde_json::to_string(&doc)?);
                        } else {
                            println!("{}", serde_json::to_string_pretty(&doc)?);
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "Refresh failed");
                    }
                }

                counter += 1;
                if options.samples > 0 && counter >= options.samples {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                break;
            }
        }
    }

    info!(emitted = counter, "Pipe finished");
    Ok(())
}
