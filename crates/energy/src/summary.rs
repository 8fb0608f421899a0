use std::fmt;

use serde::Serialize;

/// Total energy over the window and what it cost.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EnergySummary {
    pub total_kwh: f64,
    pub total_cost: f64,
}

impl EnergySummary {
    pub fn new(total_kwh: f64, cost_per_kwh: f64) -> Self {
        Self {
            total_kwh,
            total_cost: total_kwh * cost_per_kwh,
        }
    }

    pub fn kwh_label(&self) -> String {
        format!("{:.2}", self.total_kwh)
    }

    pub fn cost_label(&self) -> String {
        format!("${:.2}", self.total_cost)
    }
}

impl fmt::Display for EnergySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total kWh: {:.2}  Total Cost: ${:.2}",
            self.total_kwh, self.total_cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_to_cents() {
        let summary = EnergySummary::new(12.3456, 0.19);
        assert_eq!(summary.to_string(), "Total kWh: 12.35  Total Cost: $2.35");
    }

    #[test]
    fn zero_summary_prints_zeros() {
        let summary = EnergySummary::default();
        assert_eq!(summary.to_string(), "Total kWh: 0.00  Total Cost: $0.00");
        assert_eq!(summary.kwh_label(), "0.00");
        assert_eq!(summary.cost_label(), "$0.00");
    }
}
