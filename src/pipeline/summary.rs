use std::fmt;

use crate::model::{AdjustmentList, EfficiencyResult, MonitoringReport, SummaryReport};

pub fn generate_summary(report: &MonitoringReport, adjustments: &AdjustmentList) -> SummaryReport {
    SummaryReport {
        efficiency: EfficiencyResult {
            efficiency: report.efficiency,
        }
        .percentage(),
        monitoring: report.clone(),
        adjustments: adjustments.adjustments.clone(),
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Water Extraction Efficiency: {}", self.efficiency)?;
        writeln!(f, "System Monitoring Report:")?;
        writeln!(f, "  waste volume:  {} liters", self.monitoring.waste_volume)?;
        writeln!(f, "  energy status: {}", self.monitoring.energy_status)?;
        writeln!(f, "  filter status: {}", self.monitoring.filter_status)?;
        writeln!(f, "Recommended Adjustments:")?;
        for adjustment in &self.adjustments {
            writeln!(f, "  - {adjustment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnergyStatus;

    #[test]
    fn summary_formats_efficiency_and_embeds_inputs() {
        let report = MonitoringReport {
            waste_volume: 500.0,
            energy_status: EnergyStatus::Sufficient,
            filter_status: "optimal".to_string(),
            efficiency: 0.85,
        };
        let adjustments = AdjustmentList {
            adjustments: vec!["no adjustments needed.".to_string()],
        };

        let summary = generate_summary(&report, &adjustments);
        assert_eq!(summary.efficiency, "85.00%");
        assert_eq!(summary.monitoring, report);
        assert_eq!(summary.adjustments, adjustments.adjustments);

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["efficiency"], "85.00%");
        assert_eq!(value["monitoring"]["energy_status"], "sufficient");
        assert!(value["adjustments"].is_array());

        let rendered = summary.to_string();
        assert!(rendered.starts_with("Water Extraction Efficiency: 85.00%"));
        assert!(rendered.contains("  - no adjustments needed."));
    }
}
