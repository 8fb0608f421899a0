use color_eyre::eyre::Result;

use heatwatch_energy::{refresh, Aggregator, SystemClock, Trigger};

use crate::config::UserConfig;
use crate::data::SqliteSource;

use super::snapshot_json;

pub fn run(config: &UserConfig, json: bool) -> Result<()> {
    let source = SqliteSource::open(&config.database, config.table_layout())?;
    let aggregator = Aggregator::new(config.energy_config());

    let snapshot = refresh(
        &source,
        &SystemClock,
        &aggregator,
        config.lookback(),
        Trigger::Tick,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot_json(&snapshot, false))?);
        return Ok(());
    }

    println!("Number of Days: {}", snapshot.days.days());
    println!(
        "Readings: {} ({} plotted, every {})",
        snapshot.fetched,
        snapshot.sampled.len(),
        snapshot.sampled.stride
    );
    println!("{}", snapshot.summary);
    if let Some(stamp) = &snapshot.last_updated {
        println!("{}", stamp);
    }

    Ok(())
}
