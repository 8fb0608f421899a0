use color_eyre::eyre::Result;

use heatwatch_energy::{stride_for_days, Lookback, DEFAULT_TIMEZONE};

use crate::config::{config_path, UserConfig};
use crate::data::SqliteSource;

/// One resolved setting and whether it is usable as written.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingCheck {
    pub name: &'static str,
    pub value: String,
    pub problem: Option<String>,
}

impl SettingCheck {
    fn ok(name: &'static str, value: String) -> Self {
        Self {
            name,
            value,
            problem: None,
        }
    }

    fn problem(name: &'static str, value: String, problem: impl Into<String>) -> Self {
        Self {
            name,
            value,
            problem: Some(problem.into()),
        }
    }
}

pub fn run(config: &UserConfig, path: bool, reset: bool, edit: bool) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
        return Ok(());
    }

    if reset {
        UserConfig::default().save()?;
        println!("Config reset to defaults at: {}", config_file.display());
        return Ok(());
    }

    if edit {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nano".to_string());
        if !config_file.exists() {
            UserConfig::default().save()?;
        }
        std::process::Command::new(editor)
            .arg(&config_file)
            .status()?;

        // Report what the edited file now resolves to.
        let edited = UserConfig::try_load_from(&config_file)?;
        print_checks(&check(&edited));
        return Ok(());
    }

    println!("Config file: {}", config_file.display());
    println!();
    print_checks(&check(config));
    println!();
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}

fn print_checks(checks: &[SettingCheck]) {
    let width = checks.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for c in checks {
        match &c.problem {
            None => println!("  {:width$}  {}", c.name, c.value),
            Some(problem) => println!("! {:width$}  {} ({})", c.name, c.value, problem),
        }
    }
}

/// Resolves the settings that only show their effect at runtime: the time
/// zone fallback, the combined rate, clamping and whether the database opens.
pub fn check(config: &UserConfig) -> Vec<SettingCheck> {
    let mut checks = Vec::new();

    checks.push(
        match SqliteSource::open(&config.database, config.table_layout()) {
            Ok(source) => match source.stats() {
                Ok(stats) => SettingCheck::ok(
                    "database",
                    format!("{} ({} rows)", config.database.display(), stats.rows),
                ),
                Err(e) => SettingCheck::problem("database", config.database.display().to_string(), e.to_string()),
            },
            Err(e) => SettingCheck::problem("database", config.database.display().to_string(), e.to_string()),
        },
    );

    checks.push(if config.timezone.parse::<chrono_tz::Tz>().is_ok() {
        SettingCheck::ok("timezone", config.timezone.clone())
    } else {
        SettingCheck::problem(
            "timezone",
            DEFAULT_TIMEZONE.name().to_string(),
            format!("unknown zone {:?}", config.timezone),
        )
    });

    let rate = config.energy.cost_per_kwh();
    let rate_text = format!(
        "${:.4} (base {} + surcharge {})",
        rate, config.energy.base_rate, config.energy.surcharge
    );
    checks.push(if rate.is_finite() && rate >= 0.0 {
        SettingCheck::ok("cost_per_kwh", rate_text)
    } else {
        SettingCheck::problem("cost_per_kwh", rate_text, "rate must be a non-negative number")
    });

    let days = config.lookback();
    let days_text = format!(
        "{} (stride {})",
        days,
        stride_for_days(days.days(), config.energy.max_stride)
    );
    checks.push(match Lookback::new(config.default_days) {
        Ok(_) => SettingCheck::ok("default_days", days_text),
        Err(e) => SettingCheck::problem("default_days", days_text, e.to_string()),
    });

    let refresh = config.refresh_interval();
    checks.push(if refresh.as_secs() == config.refresh_secs {
        SettingCheck::ok("refresh_secs", config.refresh_secs.to_string())
    } else {
        SettingCheck::problem("refresh_secs", refresh.as_secs().to_string(), "raised to the minimum")
    });

    checks
}
