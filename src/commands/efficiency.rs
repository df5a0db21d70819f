use anyhow::{Context, Result};

use crate::cli::EfficiencyArgs;
use crate::commands::output::{emit, write_efficiency};
use crate::pipeline::Pipeline;

pub fn run(pipeline: &Pipeline, args: EfficiencyArgs, json: bool) -> Result<()> {
    let result = if args.view {
        pipeline.efficiency().context("failed to load efficiency")?
    } else {
        pipeline
            .run_efficiency()
            .context("efficiency calculation failed")?
    };

    emit(json, &result, |output| write_efficiency(output, &result))
}
