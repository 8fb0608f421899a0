use color_eyre::eyre::Result;

use heatwatch_energy::stride_for_days;

use crate::config::{config_path, UserConfig};
use crate::data::SqliteSource;
use crate::logging;
use crate::ui::utils::format_bytes;

pub fn run(config: &UserConfig) -> Result<()> {
    println!("heatwatch debug information");
    println!("{}", "=".repeat(60));

    println!("\n--- Paths ---");
    println!("Config: {}", config_path().display());
    println!("Logs: {}", logging::log_dir().display());
    println!("Database: {}", config.database.display());

    println!("\n--- Database ---");
    match SqliteSource::open(&config.database, config.table_layout()) {
        Ok(source) => match source.stats() {
            Ok(stats) => {
                let layout = source.layout();
                println!("Table: {} ({} / {})", layout.table, layout.timestamp_column, layout.channel);
                println!("Rows: {}", stats.rows);
                println!("Oldest: {}", stats.oldest.as_deref().unwrap_or("-"));
                println!("Newest: {}", stats.newest.as_deref().unwrap_or("-"));
                println!("Size: {}", format_bytes(stats.size_bytes));
            }
            Err(e) => println!("Query failed: {}", e),
        },
        Err(e) => println!("Unavailable: {}", e),
    }

    println!("\n--- Energy ---");
    let energy = config.energy_config();
    let days = config.lookback();
    println!("Time zone: {}", energy.timezone.name());
    println!("Cost per kWh: ${:.2}", energy.cost_per_kwh);
    println!("Noise floor: {}", energy.noise_floor);
    println!(
        "Stride at {}: {} (max {})",
        days,
        stride_for_days(days.days(), energy.max_stride),
        energy.max_stride
    );

    println!("\n--- Current Config ---");
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
