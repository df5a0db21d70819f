use crate::config::{
    HIGH_EFFICIENCY_THRESHOLD, HIGH_WASTE_VOLUME, LOW_EFFICIENCY_THRESHOLD, LOW_WASTE_VOLUME,
    OPTIMAL_FILTER_STATUS, RuleSet,
};
use crate::model::{AdjustmentList, EnergyStatus, MonitoringReport};

pub const NO_ADJUSTMENTS_NEEDED: &str = "no adjustments needed.";

/// Recommendations for the report, in rule order: efficiency, energy,
/// filters, waste volume. Never returns an empty list.
pub fn advise(report: &MonitoringReport, rules: RuleSet) -> AdjustmentList {
    let extended = rules == RuleSet::Extended;
    let mut adjustments = Vec::new();

    if report.efficiency < LOW_EFFICIENCY_THRESHOLD {
        adjustments.push(format!(
            "efficiency is low ({:.2}): increase filtration power.",
            report.efficiency
        ));
    } else if extended && report.efficiency > HIGH_EFFICIENCY_THRESHOLD {
        adjustments.push(format!(
            "efficiency is high ({:.2}): no major changes needed.",
            report.efficiency
        ));
    }

    match report.energy_status {
        EnergyStatus::Low => {
            adjustments.push("energy is low: reduce operational intensity to save energy.".to_string())
        }
        EnergyStatus::Sufficient if extended => {
            adjustments.push("energy is sufficient: maintain current settings.".to_string())
        }
        EnergyStatus::Sufficient => {}
    }

    if report.filter_status != OPTIMAL_FILTER_STATUS {
        adjustments.push(format!(
            "filter status is '{}': inspect, replace or clean filters.",
            report.filter_status
        ));
    } else if extended {
        adjustments.push("filters are optimal: no filter maintenance required.".to_string());
    }

    if extended {
        if report.waste_volume > HIGH_WASTE_VOLUME {
            adjustments.push(format!(
                "waste volume is high ({} liters): schedule additional extraction cycles.",
                report.waste_volume
            ));
        } else if report.waste_volume < LOW_WASTE_VOLUME {
            adjustments.push(format!(
                "waste volume is low ({} liters): system is running efficiently at low volume.",
                report.waste_volume
            ));
        }
    }

    if adjustments.is_empty() {
        adjustments.push(NO_ADJUSTMENTS_NEEDED.to_string());
    }

    AdjustmentList { adjustments }
}
