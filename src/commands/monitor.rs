use anyhow::{Context, Result};

use crate::commands::output::{emit, write_monitoring};
use crate::pipeline::Pipeline;

pub fn run(pipeline: &Pipeline, json: bool) -> Result<()> {
    let report = pipeline
        .run_monitoring()
        .context("system monitoring failed")?;

    emit(json, &report, |output| write_monitoring(output, &report))
}
