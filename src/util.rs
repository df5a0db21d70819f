use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Serializes `value` as pretty JSON with a trailing newline and returns the
/// SHA-256 of the bytes written.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<String> {
    let data = encode_json_pretty(value)
        .with_context(|| format!("failed to serialize json: {}", path.display()))?;
    write_bytes(path, &data)
}

pub fn encode_json_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(value)?;
    data.push(b'\n');
    Ok(data)
}

/// Writes `data` to `path`, creating parent directories, and returns its SHA-256.
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<String> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let mut file = File::create(path)
        .with_context(|| format!("failed to create json file: {}", path.display()))?;
    file.write_all(data)
        .with_context(|| format!("failed to write json file: {}", path.display()))?;

    Ok(sha256_bytes(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_bytes_matches_known_digest() {
        assert_eq!(
            sha256_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn write_json_pretty_creates_parent_and_appends_newline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("doc.json");

        let digest = write_json_pretty(&path, &serde_json::json!({ "efficiency": 0.85 }))
            .expect("write should succeed");

        let raw = std::fs::read(&path).expect("file should exist");
        assert_eq!(raw.last(), Some(&b'\n'));
        assert_eq!(digest, sha256_bytes(&raw));
    }
}
