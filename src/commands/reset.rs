use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::ResetArgs;
use crate::pipeline::Pipeline;

pub fn run(pipeline: &Pipeline, args: ResetArgs) -> Result<()> {
    if !args.yes {
        bail!("reset deletes every pipeline document; pass --yes to confirm");
    }

    let removed = pipeline.reset().context("failed to reset pipeline documents")?;
    for kind in &removed {
        info!(document = kind.name(), "deleted document");
    }
    info!(removed = removed.len(), "reset completed");

    Ok(())
}
