use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::pipeline::Pipeline;
use crate::store::DocumentKind;

pub fn run(pipeline: &Pipeline) -> Result<()> {
    let store = pipeline.store();
    let run_state_path = store.run_state_path();

    info!(state_root = %store.root().display(), "status requested");

    let manifest = match store.run_state() {
        Err(err @ PipelineError::MalformedDocument { .. }) => {
            warn!(error = %err, "run-state manifest unreadable; the next step rebuilds it");
            None
        }
        other => other.with_context(|| format!("failed to load {}", run_state_path.display()))?,
    };
    match manifest {
        Some(manifest) => {
            info!(
                manifest_version = manifest.manifest_version,
                state = manifest.state.as_str(),
                updated_at = %manifest.updated_at,
                documents = manifest.documents.len(),
                "loaded run-state manifest"
            );
            for record in &manifest.documents {
                info!(
                    document = %record.document,
                    path = %record.path,
                    sha256 = %record.sha256,
                    written_at = %record.written_at,
                    "recorded document"
                );
            }
        }
        None => warn!(path = %run_state_path.display(), "run-state manifest missing"),
    }

    for kind in DocumentKind::ALL {
        let path = store.path_for(kind);
        if store.exists(kind) {
            info!(document = kind.name(), path = %path.display(), "document present");
        } else {
            warn!(document = kind.name(), path = %path.display(), "document missing");
        }
    }

    info!(
        rules = pipeline.config().rules.as_str(),
        temperature_coefficient = pipeline.config().temperature_coefficient,
        "pipeline configuration"
    );

    Ok(())
}
