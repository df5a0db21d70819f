use crate::model::{EnergyStatus, MonitoringReport, SystemStatus};

pub fn monitor_system(
    waste_volume: f64,
    system_status: &SystemStatus,
    efficiency: f64,
) -> MonitoringReport {
    MonitoringReport {
        waste_volume,
        energy_status: EnergyStatus::from_level(system_status.energy_level),
        filter_status: system_status.filter_status.clone(),
        efficiency,
    }
}
