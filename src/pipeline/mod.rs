//! The four calculation steps and the store-backed runner that chains them.
//!
//! Each step reads its prerequisites from the [`DocumentStore`] before doing
//! anything, so a missing or malformed upstream document stops the step
//! without writing its output. Re-running a step discards everything
//! downstream of it.

mod adjustment;
mod efficiency;
mod monitoring;
mod summary;

pub use adjustment::advise;
pub use efficiency::calculate_efficiency;
pub use monitoring::monitor_system;
pub use summary::generate_summary;

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::model::{
    AdjustmentList, EfficiencyResult, EnvironmentInput, InputRecord, MonitoringReport,
    PipelineState, StatusInput, SummaryReport,
};
use crate::store::{DocumentKind, DocumentStore, StagedDocument};

/// Outputs of a complete run, in step order.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub efficiency: EfficiencyResult,
    pub monitoring: MonitoringReport,
    pub adjustments: AdjustmentList,
    pub summary: SummaryReport,
}

pub struct Pipeline {
    store: DocumentStore,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(store: DocumentStore, config: PipelineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn record_input(&self, input: &InputRecord) -> PipelineResult<()> {
        input.validate()?;
        let (input_a, input_b) = input.split();
        self.store.commit(vec![
            StagedDocument::encode(DocumentKind::InputA, &input_a)?,
            StagedDocument::encode(DocumentKind::InputB, &input_b)?,
        ])?;

        info!(
            waste_volume = input.waste_volume,
            temperature = input.environment.temperature,
            gravity = input.environment.gravity,
            energy_level = input.system_status.energy_level,
            filter_status = %input.system_status.filter_status,
            "recorded pipeline input"
        );
        Ok(())
    }

    pub fn run_efficiency(&self) -> PipelineResult<EfficiencyResult> {
        let input: EnvironmentInput = self.store.load(DocumentKind::InputA)?;
        let result = calculate_efficiency(
            input.waste_volume,
            &input.environment_conditions,
            &self.config,
        );
        self.store.save(DocumentKind::Efficiency, &result)?;

        info!(
            efficiency = result.efficiency,
            temperature_coefficient = self.config.temperature_coefficient,
            "calculated extraction efficiency"
        );
        Ok(result)
    }

    /// Reads the efficiency without recomputing it.
    pub fn efficiency(&self) -> PipelineResult<EfficiencyResult> {
        self.store.load(DocumentKind::Efficiency)
    }

    pub fn run_monitoring(&self) -> PipelineResult<MonitoringReport> {
        let input: StatusInput = self.store.load(DocumentKind::InputB)?;
        let efficiency: EfficiencyResult = self.store.load(DocumentKind::Efficiency)?;
        let report = monitor_system(
            input.waste_volume,
            &input.system_status,
            efficiency.efficiency,
        );
        self.store.save(DocumentKind::Monitoring, &report)?;

        info!(
            energy_status = %report.energy_status,
            filter_status = %report.filter_status,
            "generated monitoring report"
        );
        Ok(report)
    }

    pub fn run_adjustments(&self) -> PipelineResult<AdjustmentList> {
        let report: MonitoringReport = self.store.load(DocumentKind::Monitoring)?;
        let adjustments = advise(&report, self.config.rules);
        self.store.save(DocumentKind::Adjustments, &adjustments)?;

        info!(
            rules = self.config.rules.as_str(),
            count = adjustments.adjustments.len(),
            "generated adjustment recommendations"
        );
        Ok(adjustments)
    }

    pub fn run_summary(&self) -> PipelineResult<SummaryReport> {
        let report: MonitoringReport = self.store.load(DocumentKind::Monitoring)?;
        let adjustments: AdjustmentList = self.store.load(DocumentKind::Adjustments)?;
        let summary = generate_summary(&report, &adjustments);
        self.store.save(DocumentKind::Summary, &summary)?;

        info!(efficiency = %summary.efficiency, "generated summary report");
        Ok(summary)
    }

    /// Records `input` and runs every step in order. Each step completes
    /// before the next one reads its output.
    pub fn run_all(&self, input: &InputRecord) -> PipelineResult<PipelineRun> {
        self.record_input(input)?;
        let efficiency = self.run_efficiency()?;
        let monitoring = self.run_monitoring()?;
        let adjustments = self.run_adjustments()?;
        let summary = self.run_summary()?;

        Ok(PipelineRun {
            efficiency,
            monitoring,
            adjustments,
            summary,
        })
    }

    pub fn reset(&self) -> PipelineResult<Vec<DocumentKind>> {
        self.store.reset()
    }

    pub fn state(&self) -> PipelineResult<PipelineState> {
        self.store.state()
    }
}
