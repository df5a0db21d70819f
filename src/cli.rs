use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{
    DEFAULT_ENERGY_LEVEL, DEFAULT_FILTER_STATUS, DEFAULT_GRAVITY, DEFAULT_TEMPERATURE_C,
    PipelineConfig, RuleSet, TEMPERATURE_COEFFICIENT,
};
use crate::model::{EnvironmentConditions, InputRecord, SystemStatus};

#[derive(Parser, Debug)]
#[command(
    name = "wet",
    version,
    about = "Water extraction and transformation pipeline"
)]
pub struct Cli {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Runs the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record waste volume, environment and system status.
    Input(InputArgs),
    /// Calculate extraction efficiency from the recorded input.
    Efficiency(EfficiencyArgs),
    /// Produce the monitoring report.
    Monitor,
    /// Produce adjustment recommendations from the monitoring report.
    Recommend,
    /// Combine monitoring and recommendations into the final summary.
    Summary,
    /// Record input and run every step in order.
    Run(InputArgs),
    /// Delete every pipeline document.
    Reset(ResetArgs),
    /// Show which documents exist and the pipeline state.
    Status,
    /// Interactive menu.
    Menu,
}

#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    #[arg(long, global = true, default_value = ".cache/wet")]
    pub state_root: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = RuleSet::Extended)]
    pub rules: RuleSet,

    #[arg(long, global = true, default_value_t = TEMPERATURE_COEFFICIENT)]
    pub temperature_coefficient: f64,

    #[arg(long, global = true, default_value_t = DEFAULT_TEMPERATURE_C)]
    pub default_temperature: f64,

    #[arg(long, global = true, default_value_t = DEFAULT_GRAVITY)]
    pub default_gravity: f64,

    #[arg(long, global = true, default_value_t = DEFAULT_ENERGY_LEVEL)]
    pub default_energy_level: f64,

    #[arg(long, global = true, default_value = DEFAULT_FILTER_STATUS)]
    pub default_filter_status: String,

    /// Print documents as JSON instead of text.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
}

impl PipelineArgs {
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            default_temperature: self.default_temperature,
            default_gravity: self.default_gravity,
            default_energy_level: self.default_energy_level,
            default_filter_status: self.default_filter_status.clone(),
            temperature_coefficient: self.temperature_coefficient,
            ..PipelineConfig::default()
        }
        .with_rules(self.rules)
    }
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Waste volume in liters.
    #[arg(long)]
    pub waste_volume: f64,

    /// Temperature in °C; falls back to --default-temperature.
    #[arg(long, allow_negative_numbers = true)]
    pub temperature: Option<f64>,

    /// Gravity relative to Earth; falls back to --default-gravity.
    #[arg(long)]
    pub gravity: Option<f64>,

    #[arg(long)]
    pub filter_status: Option<String>,

    /// Energy level percentage (0-100).
    #[arg(long)]
    pub energy_level: Option<f64>,
}

impl InputArgs {
    pub fn to_record(&self, config: &PipelineConfig) -> InputRecord {
        InputRecord {
            waste_volume: self.waste_volume,
            environment: EnvironmentConditions {
                temperature: self.temperature.unwrap_or(config.default_temperature),
                gravity: self.gravity.unwrap_or(config.default_gravity),
            },
            system_status: SystemStatus {
                filter_status: self
                    .filter_status
                    .clone()
                    .unwrap_or_else(|| config.default_filter_status.clone()),
                energy_level: self.energy_level.unwrap_or(config.default_energy_level),
            },
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct EfficiencyArgs {
    /// Show the stored efficiency instead of recalculating it.
    #[arg(long, default_value_t = false)]
    pub view: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ResetArgs {
    /// Confirm deletion without prompting.
    #[arg(long, default_value_t = false)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_falls_back_to_configured_defaults() {
        let cli = Cli::parse_from(["wet", "input", "--waste-volume", "500"]);
        let config = cli.pipeline.config();
        let Some(Commands::Input(args)) = cli.command else {
            panic!("expected input command");
        };

        let record = args.to_record(&config);
        assert_eq!(record.waste_volume, 500.0);
        assert_eq!(record.environment.temperature, 25.0);
        assert_eq!(record.environment.gravity, 1.0);
        assert_eq!(record.system_status.filter_status, "optimal");
        assert_eq!(record.system_status.energy_level, 80.0);
    }

    #[test]
    fn global_flags_reach_the_config() {
        let cli = Cli::parse_from([
            "wet",
            "recommend",
            "--rules",
            "minimal",
            "--temperature-coefficient",
            "0.02",
        ]);
        let config = cli.pipeline.config();
        assert_eq!(config.rules, RuleSet::Minimal);
        assert_eq!(config.temperature_coefficient, 0.02);
        assert!(matches!(cli.command, Some(Commands::Recommend)));
    }

    #[test]
    fn no_subcommand_means_menu() {
        let cli = Cli::parse_from(["wet"]);
        assert!(cli.command.is_none());
    }
}
