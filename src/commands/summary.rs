use anyhow::{Context, Result};

use crate::commands::output::{emit, write_summary};
use crate::pipeline::Pipeline;

pub fn run(pipeline: &Pipeline, json: bool) -> Result<()> {
    let summary = pipeline
        .run_summary()
        .context("summary generation failed")?;

    emit(json, &summary, |output| write_summary(output, &summary))
}
