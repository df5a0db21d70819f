use anyhow::{Context, Result};
use tracing::info;

use crate::cli::InputArgs;
use crate::commands::output::{emit, write_summary};
use crate::pipeline::Pipeline;

pub fn run(pipeline: &Pipeline, args: InputArgs, json: bool) -> Result<()> {
    let record = args.to_record(pipeline.config());

    info!(
        root = %pipeline.store().root().display(),
        rules = pipeline.config().rules.as_str(),
        "starting pipeline run"
    );
    let run = pipeline.run_all(&record).context("pipeline run failed")?;
    info!(efficiency = run.efficiency.efficiency, "pipeline run completed");

    emit(json, &run.summary, |output| write_summary(output, &run.summary))
}
