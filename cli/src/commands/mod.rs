pub mod config;
pub mod debug;
pub mod logs;
pub mod pipe;
pub mod summary;

use serde_json::{json, Value};

use heatwatch_energy::Snapshot;

/// JSON document for one refresh, shared by `summary --json` and `pipe`.
pub(crate) fn snapshot_json(snapshot: &Snapshot, points: bool) -> Value {
    let tz = snapshot.sampled.timezone;
    let mut doc = json!({
        "trigger": snapshot.trigger,
        "days": snapshot.days,
        "window_start": snapshot.window_start.with_timezone(&tz).to_rfc3339(),
        "stride": snapshot.sampled.stride,
        "readings": snapshot.fetched,
        "plotted": snapshot.sampled.len(),
        "peak": snapshot.sampled.peak(),
        "total_kwh": snapshot.summary.total_kwh,
        "total_cost": snapshot.summary.total_cost,
        "summary": snapshot.summary.to_string(),
        "last_updated": snapshot.last_updated,
    });

    if points {
        let series: Vec<Value> = snapshot
            .sampled
            .local_points()
            .map(|(at, current)| json!({ "time": at.to_rfc3339(), "current": current }))
            .collect();
        doc["points"] = Value::Array(series);
    }

    doc
}
