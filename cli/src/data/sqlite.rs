//! Read-only access to the CT logger's SQLite database.
//!
//! The logger owns the database and writes to it continuously; this side only
//! ever opens it read-only and issues `SELECT`s.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, trace};

use heatwatch_energy::{Reading, ReadingSource};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Layouts the logger has used for text timestamps without an offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The SQL filter compares text, so it only narrows by calendar date: the
/// bound is the date one day before the window start. That date prefix sorts
/// below both `T` and space separated rows of the same day, and the extra day
/// covers any UTC offset a row may carry. The exact cut happens after parsing.
const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";
const QUERY_SLACK_DAYS: i64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Unparseable timestamp {value:?} in row {row}")]
    Timestamp { row: usize, value: String },
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Where the readings live inside the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub table: String,
    pub timestamp_column: String,
    pub channel: String,
}

impl TableLayout {
    fn validate(&self) -> Result<()> {
        for ident in [&self.table, &self.timestamp_column, &self.channel] {
            if !is_identifier(ident) {
                return Err(SourceError::InvalidIdentifier(ident.clone()));
            }
        }
        Ok(())
    }

    fn readings_since_sql(&self) -> String {
        format!(
            "SELECT \"{ts}\", \"{ch}\" FROM \"{table}\" WHERE \"{ts}\" >= ?1 ORDER BY \"{ts}\" ASC",
            ts = self.timestamp_column,
            ch = self.channel,
            table = self.table,
        )
    }

    fn stats_sql(&self) -> String {
        format!(
            "SELECT COUNT(*), MIN(\"{ts}\"), MAX(\"{ts}\") FROM \"{table}\"",
            ts = self.timestamp_column,
            table = self.table,
        )
    }
}

/// Identifiers are spliced into SQL, so only plain names are accepted.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses a stored timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Database statistics for diagnostics.
#[derive(Debug, Clone)]
pub struct SourceStats {
    pub rows: i64,
    pub oldest: Option<String>,
    pub newest: Option<String>,
    pub size_bytes: u64,
}

pub struct SqliteSource {
    conn: Connection,
    path: PathBuf,
    layout: TableLayout,
    query: String,
}

impl SqliteSource {
    /// Opens `path` read-only. `file:` URIs are passed through to SQLite.
    pub fn open(path: &Path, layout: TableLayout) -> Result<Self> {
        layout.validate()?;

        let is_uri = path.to_string_lossy().starts_with("file:");
        if !is_uri && !path.exists() {
            return Err(SourceError::NotFound(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        debug!(path = ?path, table = %layout.table, channel = %layout.channel, "Opened reading database");

        let query = layout.readings_since_sql();
        Ok(Self {
            conn,
            path: path.to_path_buf(),
            layout,
            query,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    fn size_bytes(&self) -> u64 {
        std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    pub fn stats(&self) -> Result<SourceStats> {
        let (rows, oldest, newest): (i64, Option<String>, Option<String>) =
            self.conn.query_row(&self.layout.stats_sql(), [], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?;

        Ok(SourceStats {
            rows,
            oldest,
            newest,
            size_bytes: self.size_bytes(),
        })
    }
}

impl ReadingSource for SqliteSource {
    type Error = SourceError;

    fn readings_since(&self, since: DateTime<Utc>) -> Result<Vec<Reading>> {
        let since_param = (since - chrono::Duration::days(QUERY_SLACK_DAYS))
            .format(QUERY_DATE_FORMAT)
            .to_string();
        trace!(since = %since, bound = %since_param, "Querying readings");

        let mut stmt = self.conn.prepare(&self.query)?;
        let rows = stmt.query_map([&since_param], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<f64>>(1)?))
        })?;

        let mut readings = Vec::new();
        for (index, row) in rows.enumerate() {
            let (raw, current) = row?;
            let timestamp = parse_timestamp(&raw).ok_or(SourceError::Timestamp {
                row: index,
                value: raw,
            })?;
            if timestamp >= since {
                readings.push(Reading::new(timestamp, current.unwrap_or(0.0)));
            }
        }

        // Text order is not time order once separators or offsets differ.
        readings.sort_by_key(|r| r.timestamp);
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use pretty_assertions::assert_eq;

    fn layout() -> TableLayout {
        TableLayout {
            table: "housectdata".to_string(),
            timestamp_column: "DateTime".to_string(),
            channel: "ct3".to_string(),
        }
    }

    fn create_db(dir: &Path, rows: &[(&str, Option<f64>)]) -> PathBuf {
        let path = dir.join("ct.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE housectdata (
                DateTime TEXT NOT NULL,
                ct1 REAL,
                ct2 REAL,
                ct3 REAL
            );",
        )
        .unwrap();
        for (ts, ct3) in rows {
            conn.execute(
                "INSERT INTO housectdata (DateTime, ct1, ct2, ct3) VALUES (?1, 1.0, 2.0, ?2)",
                rusqlite::params![ts, ct3],
            )
            .unwrap();
        }
        path
    }

    #[test]
    fn reads_only_rows_in_window_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_db(
            dir.path(),
            &[
                ("2024-03-01T12:00:00.000000", Some(300.0)),
                ("2024-03-02T08:30:00.250000", Some(410.0)),
                ("2024-02-28T23:59:59.000000", Some(999.0)),
                ("2024-03-02T07:00:00.000000", Some(120.0)),
            ],
        );
        let source = SqliteSource::open(&path, layout()).unwrap();

        let since = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let readings = source.readings_since(since).unwrap();

        let currents: Vec<f64> = readings.iter().map(|r| r.current).collect();
        assert_eq!(currents, vec![300.0, 120.0, 410.0]);
        assert_eq!(
            readings[2].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 2, 8, 30, 0).unwrap() + ChronoDuration::milliseconds(250)
        );
    }

    #[test]
    fn window_compares_instants_not_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_db(
            dir.path(),
            &[
                ("2024-03-01 12:00:00", Some(200.0)),
                ("2024-02-29T23:30:00-05:00", Some(300.0)),
                ("2024-02-29T20:00:00-05:00", Some(999.0)),
                ("2024-02-29 23:00:00", Some(999.0)),
                ("2024-03-01T03:00:00Z", Some(400.0)),
            ],
        );
        let source = SqliteSource::open(&path, layout()).unwrap();

        let since = Utc.with_ymd_and_hms(2024, 3, 1, 2, 0, 0).unwrap();
        let readings = source.readings_since(since).unwrap();

        let currents: Vec<f64> = readings.iter().map(|r| r.current).collect();
        assert_eq!(currents, vec![400.0, 300.0, 200.0]);
        assert_eq!(
            readings[1].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 4, 30, 0).unwrap()
        );
    }

    #[test]
    fn space_separated_rows_on_the_first_day_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_db(dir.path(), &[("2024-03-01 12:00:00", Some(300.0))]);
        let source = SqliteSource::open(&path, layout()).unwrap();

        let since = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(source.readings_since(since).unwrap().len(), 1);
    }

    #[test]
    fn null_channel_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_db(dir.path(), &[("2024-03-01T12:00:00", None)]);
        let source = SqliteSource::open(&path, layout()).unwrap();

        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let readings = source.readings_since(since).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].current, 0.0);
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_db(dir.path(), &[("2024-03-01Tnoon", Some(300.0))]);
        let source = SqliteSource::open(&path, layout()).unwrap();

        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let err = source.readings_since(since).unwrap_err();
        assert!(matches!(err, SourceError::Timestamp { row: 0, .. }));
    }

    #[test]
    fn connection_is_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_db(dir.path(), &[("2024-03-01T12:00:00", Some(300.0))]);
        let source = SqliteSource::open(&path, layout()).unwrap();

        let result = source.conn.execute("DELETE FROM housectdata", []);
        assert!(result.is_err());
        assert_eq!(source.stats().unwrap().rows, 1);
    }

    #[test]
    fn missing_database_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.sqlite");
        let err = SqliteSource::open(&path, layout()).err().unwrap();
        assert!(matches!(err, SourceError::NotFound(p) if p == path));
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_db(dir.path(), &[]);
        let bad = TableLayout {
            channel: "ct3\"; DROP TABLE housectdata; --".to_string(),
            ..layout()
        };
        let err = SqliteSource::open(&path, bad).err().unwrap();
        assert!(matches!(err, SourceError::InvalidIdentifier(_)));
    }

    #[test]
    fn stats_report_extent() {
        let dir = tempfile::tempdir().unwrap();
        let path = create_db(
            dir.path(),
            &[
                ("2024-03-01T12:00:00", Some(300.0)),
                ("2024-03-05T12:00:00", Some(300.0)),
            ],
        );
        let stats = SqliteSource::open(&path, layout()).unwrap().stats().unwrap();

        assert_eq!(stats.rows, 2);
        assert_eq!(stats.oldest.as_deref(), Some("2024-03-01T12:00:00"));
        assert_eq!(stats.newest.as_deref(), Some("2024-03-05T12:00:00"));
        assert!(stats.size_bytes > 0);
    }

    #[test]
    fn parses_logger_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-01T12:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 12:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T12:00:00.000000"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T07:00:00-05:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-03-01T12:00:00Z "), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("ct3"));
        assert!(is_identifier("_DateTime"));
        assert!(!is_identifier("3ct"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("house ct"));
    }
}
