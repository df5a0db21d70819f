use anyhow::{Context, Result};
use tracing::info;

use crate::cli::InputArgs;
use crate::pipeline::Pipeline;

pub fn run(pipeline: &Pipeline, args: InputArgs) -> Result<()> {
    let record = args.to_record(pipeline.config());
    pipeline
        .record_input(&record)
        .context("failed to record pipeline input")?;

    info!(root = %pipeline.store().root().display(), "input documents written");
    Ok(())
}
