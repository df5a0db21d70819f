use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{LOW_ENERGY_THRESHOLD, MAX_ENERGY_LEVEL};
use crate::error::{PipelineResult, ensure_at_least, ensure_finite, ensure_range};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConditions {
    pub temperature: f64,
    pub gravity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub filter_status: String,
    pub energy_level: f64,
}

/// Everything the operator supplies before the pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub waste_volume: f64,
    pub environment: EnvironmentConditions,
    pub system_status: SystemStatus,
}

impl InputRecord {
    pub fn validate(&self) -> PipelineResult<()> {
        ensure_at_least("waste_volume", self.waste_volume, 0.0)?;
        ensure_finite("temperature", self.environment.temperature)?;
        ensure_finite("gravity", self.environment.gravity)?;
        ensure_range(
            "energy_level",
            self.system_status.energy_level,
            0.0,
            MAX_ENERGY_LEVEL,
        )?;
        Ok(())
    }

    pub fn split(&self) -> (EnvironmentInput, StatusInput) {
        (
            EnvironmentInput {
                waste_volume: self.waste_volume,
                environment_conditions: self.environment,
            },
            StatusInput {
                waste_volume: self.waste_volume,
                system_status: self.system_status.clone(),
            },
        )
    }
}

/// `input_a`: what the efficiency calculator reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentInput {
    pub waste_volume: f64,
    pub environment_conditions: EnvironmentConditions,
}

/// `input_b`: what the system monitor reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusInput {
    pub waste_volume: f64,
    pub system_status: SystemStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyResult {
    pub efficiency: f64,
}

impl EfficiencyResult {
    pub fn percentage(&self) -> String {
        format!("{:.2}%", self.efficiency * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyStatus {
    Low,
    Sufficient,
}

impl EnergyStatus {
    pub fn from_level(energy_level: f64) -> Self {
        if energy_level < LOW_ENERGY_THRESHOLD {
            Self::Low
        } else {
            Self::Sufficient
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Sufficient => "sufficient",
        }
    }
}

impl fmt::Display for EnergyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringReport {
    pub waste_volume: f64,
    pub energy_status: EnergyStatus,
    pub filter_status: String,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentList {
    pub adjustments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub efficiency: String,
    pub monitoring: MonitoringReport,
    pub adjustments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    AwaitingInput,
    InputRecorded,
    Monitored,
    Advised,
    Summarized,
    Reset,
}

impl PipelineState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingInput => "awaiting_input",
            Self::InputRecorded => "input_recorded",
            Self::Monitored => "monitored",
            Self::Advised => "advised",
            Self::Summarized => "summarized",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document: String,
    pub path: String,
    pub sha256: String,
    pub written_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStateManifest {
    pub manifest_version: u32,
    pub state: PipelineState,
    pub updated_at: String,
    pub documents: Vec<DocumentRecord>,
}
