use anyhow::{Context, Result};

use crate::commands::output::{emit, write_adjustments};
use crate::pipeline::Pipeline;

pub fn run(pipeline: &Pipeline, json: bool) -> Result<()> {
    let adjustments = pipeline
        .run_adjustments()
        .context("adjustment advisor failed")?;

    emit(json, &adjustments, |output| {
        write_adjustments(output, &adjustments)
    })
}
