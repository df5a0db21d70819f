use clap::ValueEnum;

pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
pub const DEFAULT_GRAVITY: f64 = 1.0;
pub const DEFAULT_ENERGY_LEVEL: f64 = 80.0;
/// Filter status the adjustment advisor treats as healthy.
pub const OPTIMAL_FILTER_STATUS: &str = "optimal";
pub const DEFAULT_FILTER_STATUS: &str = OPTIMAL_FILTER_STATUS;

pub const BASE_EFFICIENCY: f64 = 0.85;
/// Efficiency loss per degree away from the nominal temperature.
pub const TEMPERATURE_COEFFICIENT: f64 = 0.01;
/// Efficiency loss per unit of gravity away from 1.0.
pub const GRAVITY_COEFFICIENT: f64 = 0.05;
pub const NOMINAL_TEMPERATURE_C: f64 = 25.0;
pub const NOMINAL_GRAVITY: f64 = 1.0;

pub const LOW_ENERGY_THRESHOLD: f64 = 50.0;
pub const LOW_EFFICIENCY_THRESHOLD: f64 = 0.7;
pub const HIGH_EFFICIENCY_THRESHOLD: f64 = 0.9;
pub const HIGH_WASTE_VOLUME: f64 = 1000.0;
pub const LOW_WASTE_VOLUME: f64 = 100.0;

pub const MAX_ENERGY_LEVEL: f64 = 100.0;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum RuleSet {
    /// Corrective recommendations only.
    Minimal,
    /// Corrective and confirmatory recommendations, including waste volume.
    #[default]
    Extended,
}

impl RuleSet {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Extended => "extended",
        }
    }
}

/// Values fed into every pipeline step. Built once from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub default_temperature: f64,
    pub default_gravity: f64,
    pub default_energy_level: f64,
    pub default_filter_status: String,
    pub temperature_coefficient: f64,
    pub rules: RuleSet,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_temperature: DEFAULT_TEMPERATURE_C,
            default_gravity: DEFAULT_GRAVITY,
            default_energy_level: DEFAULT_ENERGY_LEVEL,
            default_filter_status: DEFAULT_FILTER_STATUS.to_string(),
            temperature_coefficient: TEMPERATURE_COEFFICIENT,
            rules: RuleSet::Extended,
        }
    }
}

impl PipelineConfig {
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }
}
