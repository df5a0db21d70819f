use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, PipelineResult};
use crate::model::{DocumentRecord, PipelineState, RunStateManifest};
use crate::util::{encode_json_pretty, now_utc_string, sha256_bytes, write_bytes, write_json_pretty};

const MANIFEST_VERSION: u32 = 1;
const RUN_STATE_FILE: &str = "run_state.json";
const RUN_STATE_DOCUMENT: &str = "run_state";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DocumentKind {
    InputA,
    InputB,
    Efficiency,
    Monitoring,
    Adjustments,
    Summary,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        Self::InputA,
        Self::InputB,
        Self::Efficiency,
        Self::Monitoring,
        Self::Adjustments,
        Self::Summary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::InputA => "input_a",
            Self::InputB => "input_b",
            Self::Efficiency => "efficiency",
            Self::Monitoring => "monitoring",
            Self::Adjustments => "adjustments",
            Self::Summary => "summary",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Position in the step chain. A document is derived from every document
    /// with a lower stage.
    fn stage(self) -> u8 {
        match self {
            Self::InputA | Self::InputB => 0,
            Self::Efficiency => 1,
            Self::Monitoring => 2,
            Self::Adjustments => 3,
            Self::Summary => 4,
        }
    }

    /// State the pipeline reaches once this document has been written.
    fn reached_state(self) -> PipelineState {
        match self {
            Self::InputA | Self::InputB | Self::Efficiency => PipelineState::InputRecorded,
            Self::Monitoring => PipelineState::Monitored,
            Self::Adjustments => PipelineState::Advised,
            Self::Summary => PipelineState::Summarized,
        }
    }
}

/// A document serialized and ready to be written by [`DocumentStore::commit`].
#[derive(Debug, Clone)]
pub struct StagedDocument {
    kind: DocumentKind,
    data: Vec<u8>,
}

impl StagedDocument {
    pub fn encode<T: Serialize>(kind: DocumentKind, value: &T) -> PipelineResult<Self> {
        let data = encode_json_pretty(value)
            .with_context(|| format!("failed to serialize {} document", kind.name()))?;
        Ok(Self { kind, data })
    }
}

/// Keyed JSON documents under a single state root.
///
/// Writing a document deletes every document further down the step chain,
/// so a consumer never reads output derived from replaced input.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, kind: DocumentKind) -> PathBuf {
        self.root
            .join("documents")
            .join(format!("{}.json", kind.name()))
    }

    pub fn run_state_path(&self) -> PathBuf {
        self.root.join(RUN_STATE_FILE)
    }

    pub fn exists(&self, kind: DocumentKind) -> bool {
        self.path_for(kind).is_file()
    }

    pub fn load<T: DeserializeOwned>(&self, kind: DocumentKind) -> PipelineResult<T> {
        let path = self.path_for(kind);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(PipelineError::MissingInput {
                    document: kind.name(),
                    path,
                });
            }
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("failed to read {}", path.display()))
                    .into());
            }
        };

        serde_json::from_slice(&raw).map_err(|err| PipelineError::MalformedDocument {
            document: kind.name(),
            path,
            reason: err.to_string(),
        })
    }

    pub fn save<T: Serialize>(&self, kind: DocumentKind, value: &T) -> PipelineResult<PathBuf> {
        self.commit(vec![StagedDocument::encode(kind, value)?])?;
        Ok(self.path_for(kind))
    }

    /// Writes `documents` as one unit and updates the run-state manifest once.
    ///
    /// The manifest is read before anything is written. Documents downstream
    /// of the earliest staged one are deleted first. If any write fails, every
    /// staged document is removed again so none of the batch is left behind.
    pub fn commit(&self, documents: Vec<StagedDocument>) -> PipelineResult<Vec<PathBuf>> {
        let Some(earliest) = documents.iter().map(|doc| doc.kind.stage()).min() else {
            return Ok(Vec::new());
        };
        let staged = |kind: DocumentKind| documents.iter().any(|doc| doc.kind == kind);

        let mut manifest = self.manifest_for_update()?;

        for kind in DocumentKind::ALL {
            if kind.stage() > earliest && !staged(kind) {
                if self.remove_document(kind)? {
                    debug!(document = kind.name(), "stale document removed");
                }
                manifest.documents.retain(|record| record.document != kind.name());
            }
        }

        let mut paths = Vec::with_capacity(documents.len());
        let mut records = Vec::with_capacity(documents.len());
        for doc in &documents {
            let path = self.path_for(doc.kind);
            match write_bytes(&path, &doc.data) {
                Ok(sha256) => {
                    debug!(document = doc.kind.name(), sha256 = %sha256, "document written");
                    records.push(DocumentRecord {
                        document: doc.kind.name().to_string(),
                        path: path.display().to_string(),
                        sha256,
                        written_at: now_utc_string(),
                    });
                    paths.push(path);
                }
                Err(err) => {
                    self.roll_back(&mut manifest, &documents);
                    return Err(err.into());
                }
            }
        }

        manifest.documents.retain(|record| {
            DocumentKind::from_name(&record.document).is_none_or(|kind| !staged(kind))
        });
        manifest.documents.extend(records);
        manifest.state = documents
            .iter()
            .max_by_key(|doc| doc.kind.stage())
            .map_or(manifest.state, |doc| doc.kind.reached_state());
        manifest.updated_at = now_utc_string();

        write_json_pretty(&self.run_state_path(), &manifest)?;
        Ok(paths)
    }

    /// Deletes every pipeline document and marks the run state as reset.
    /// Returns the documents that were actually present.
    pub fn reset(&self) -> PipelineResult<Vec<DocumentKind>> {
        let mut removed = Vec::new();
        for kind in DocumentKind::ALL {
            if self.remove_document(kind)? {
                removed.push(kind);
            }
        }

        let manifest = RunStateManifest {
            manifest_version: MANIFEST_VERSION,
            state: PipelineState::Reset,
            updated_at: now_utc_string(),
            documents: Vec::new(),
        };
        write_json_pretty(&self.run_state_path(), &manifest)?;
        info!(
            root = %self.root.display(),
            removed = removed.len(),
            "pipeline documents reset"
        );

        Ok(removed)
    }

    /// Returns `None` for a store that has never been written to. An
    /// unparsable manifest is reported as a malformed document.
    pub fn run_state(&self) -> PipelineResult<Option<RunStateManifest>> {
        let path = self.run_state_path();
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("failed to read {}", path.display()))
                    .into());
            }
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|err| PipelineError::MalformedDocument {
                document: RUN_STATE_DOCUMENT,
                path,
                reason: err.to_string(),
            })
    }

    /// Current pipeline state. A corrupt manifest is rebuilt in memory from
    /// the documents on disk.
    pub fn state(&self) -> PipelineResult<PipelineState> {
        Ok(self.manifest_for_update()?.state)
    }

    fn manifest_for_update(&self) -> PipelineResult<RunStateManifest> {
        match self.run_state() {
            Ok(Some(manifest)) => Ok(manifest),
            Ok(None) => Ok(RunStateManifest {
                manifest_version: MANIFEST_VERSION,
                state: PipelineState::AwaitingInput,
                updated_at: now_utc_string(),
                documents: Vec::new(),
            }),
            Err(err @ PipelineError::MalformedDocument { .. }) => {
                warn!(error = %err, "rebuilding run-state manifest from documents on disk");
                self.rebuild_manifest()
            }
            Err(err) => Err(err),
        }
    }

    fn rebuild_manifest(&self) -> PipelineResult<RunStateManifest> {
        let mut documents = Vec::new();
        for kind in DocumentKind::ALL {
            let path = self.path_for(kind);
            match fs::read(&path) {
                Ok(raw) => documents.push(DocumentRecord {
                    document: kind.name().to_string(),
                    path: path.display().to_string(),
                    sha256: sha256_bytes(&raw),
                    written_at: now_utc_string(),
                }),
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(anyhow::Error::new(err)
                        .context(format!("failed to read {}", path.display()))
                        .into());
                }
            }
        }

        Ok(RunStateManifest {
            manifest_version: MANIFEST_VERSION,
            state: state_from_records(&documents),
            updated_at: now_utc_string(),
            documents,
        })
    }

    /// Best effort: the write error being returned is the one that matters.
    fn roll_back(&self, manifest: &mut RunStateManifest, documents: &[StagedDocument]) {
        for doc in documents {
            if let Err(err) = self.remove_document(doc.kind) {
                warn!(document = doc.kind.name(), error = %err, "failed to roll back document");
            }
            manifest
                .documents
                .retain(|record| record.document != doc.kind.name());
        }
        manifest.state = state_from_records(&manifest.documents);
        manifest.updated_at = now_utc_string();

        if let Err(err) = write_json_pretty(&self.run_state_path(), manifest) {
            warn!(error = %err, "failed to write run-state manifest after roll back");
        }
    }

    /// Returns whether the document was present.
    fn remove_document(&self, kind: DocumentKind) -> PipelineResult<bool> {
        let path = self.path_for(kind);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!("failed to delete {}", path.display()))
                .into()),
        }
    }
}

fn state_from_records(records: &[DocumentRecord]) -> PipelineState {
    records
        .iter()
        .filter_map(|record| DocumentKind::from_name(&record.document))
        .max_by_key(|kind| kind.stage())
        .map_or(PipelineState::AwaitingInput, DocumentKind::reached_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AdjustmentList, EfficiencyResult};

    #[test]
    fn load_reports_missing_document_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());

        let err = store
            .load::<EfficiencyResult>(DocumentKind::Efficiency)
            .unwrap_err();
        match err {
            PipelineError::MissingInput { document, path } => {
                assert_eq!(document, "efficiency");
                assert!(path.ends_with("documents/efficiency.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_reports_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let path = store.path_for(DocumentKind::Adjustments);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, br#"{"recommendations": []}"#).unwrap();

        let err = store
            .load::<AdjustmentList>(DocumentKind::Adjustments)
            .unwrap_err();
        assert!(matches!(err, PipelineError::MalformedDocument { document: "adjustments", .. }));
        assert!(err.is_missing_input());
    }

    #[test]
    fn save_records_digest_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());

        store
            .save(DocumentKind::Efficiency, &EfficiencyResult { efficiency: 0.85 })
            .unwrap();
        store
            .save(DocumentKind::Efficiency, &EfficiencyResult { efficiency: 0.8 })
            .unwrap();

        let manifest = store.run_state().unwrap().expect("manifest written");
        assert_eq!(manifest.state, PipelineState::InputRecorded);
        assert_eq!(manifest.documents.len(), 1);
        assert_eq!(manifest.documents[0].document, "efficiency");
        assert_eq!(manifest.documents[0].sha256.len(), 64);

        let loaded: EfficiencyResult = store.load(DocumentKind::Efficiency).unwrap();
        assert_eq!(loaded.efficiency, 0.8);
    }

    #[test]
    fn reset_removes_documents_and_tolerates_absent_ones() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store
            .save(DocumentKind::Efficiency, &EfficiencyResult { efficiency: 0.85 })
            .unwrap();

        let removed = store.reset().unwrap();
        assert_eq!(removed, vec![DocumentKind::Efficiency]);
        assert!(!store.exists(DocumentKind::Efficiency));

        let manifest = store.run_state().unwrap().unwrap();
        assert_eq!(manifest.state, PipelineState::Reset);
        assert!(manifest.documents.is_empty());

        assert!(store.reset().unwrap().is_empty());
    }

    #[test]
    fn save_removes_downstream_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let list = AdjustmentList {
            adjustments: vec!["no adjustments needed.".to_string()],
        };
        store
            .save(DocumentKind::Efficiency, &EfficiencyResult { efficiency: 0.85 })
            .unwrap();
        store.save(DocumentKind::Adjustments, &list).unwrap();

        store
            .save(DocumentKind::Efficiency, &EfficiencyResult { efficiency: 0.6 })
            .unwrap();

        assert!(store.exists(DocumentKind::Efficiency));
        assert!(!store.exists(DocumentKind::Adjustments));
        let manifest = store.run_state().unwrap().unwrap();
        assert_eq!(manifest.state, PipelineState::InputRecorded);
        let names: Vec<_> = manifest.documents.iter().map(|r| r.document.as_str()).collect();
        assert_eq!(names, vec!["efficiency"]);
    }

    #[test]
    fn corrupt_manifest_is_rebuilt_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store
            .save(DocumentKind::Efficiency, &EfficiencyResult { efficiency: 0.85 })
            .unwrap();
        fs::write(store.run_state_path(), b"{garbage").unwrap();

        let err = store.run_state().unwrap_err();
        assert!(matches!(err, PipelineError::MalformedDocument { document: "run_state", .. }));
        assert_eq!(store.state().unwrap(), PipelineState::InputRecorded);

        let list = AdjustmentList {
            adjustments: vec!["no adjustments needed.".to_string()],
        };
        store.save(DocumentKind::Adjustments, &list).unwrap();

        let manifest = store.run_state().unwrap().unwrap();
        assert_eq!(manifest.state, PipelineState::Advised);
        let names: Vec<_> = manifest.documents.iter().map(|r| r.document.as_str()).collect();
        assert_eq!(names, vec!["efficiency", "adjustments"]);
    }

    #[test]
    fn failed_commit_leaves_no_part_of_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        let input = serde_json::json!({ "waste_volume": 500.0 });
        store.save(DocumentKind::InputA, &input).unwrap();
        // A directory in place of input_b makes its write fail.
        fs::create_dir_all(store.path_for(DocumentKind::InputB)).unwrap();

        let batch = vec![
            StagedDocument::encode(DocumentKind::InputA, &input).unwrap(),
            StagedDocument::encode(DocumentKind::InputB, &input).unwrap(),
        ];
        assert!(matches!(store.commit(batch), Err(PipelineError::Storage(_))));

        assert!(!store.exists(DocumentKind::InputA));
        let manifest = store.run_state().unwrap().unwrap();
        assert!(manifest.documents.is_empty());
        assert_eq!(manifest.state, PipelineState::AwaitingInput);
    }
}
