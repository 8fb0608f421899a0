use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;

use crate::logging::{self, LOG_FILE_PREFIX};

pub fn run(lines: usize, follow: bool) -> Result<()> {
    let log_dir = logging::log_dir();

    let Some(path) = latest_log_file(&log_dir) else {
        println!("No log files found in {:?}", log_dir);
        println!("Log files are created when running the heatwatch dashboard.");
        return Ok(());
    };

    if follow {
        let err = std::process::Command::new("tail")
            .args(["-f", "-n", &lines.to_string()])
            .arg(&path)
            .exec();
        return Err(err.into());
    }

    std::process::Command::new("tail")
        .args(["-n", &lines.to_string()])
        .arg(&path)
        .status()?;

    Ok(())
}

/// Daily files sort by date, so the last name is the newest.
fn latest_log_file(dir: &Path) -> Option<PathBuf> {
    let prefix = format!("{}.", LOG_FILE_PREFIX);
    let mut log_files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| {
                    let name = e.file_name();
                    let name = name.to_string_lossy();
                    name.starts_with(&prefix) && name.ends_with(".log")
                })
                .map(|e| e.path())
                .collect()
        })
        .unwrap_or_default();

    log_files.sort();
    log_files.pop()
}
