//! On-disk station directory snapshot.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info, warn};

use crate::api::NsClient;
use crate::domain::{Station, StationDirectory};

use super::error::StationError;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/stations.json";

/// Persistent station directory.
///
/// The snapshot is only ever replaced wholesale by [`StationStore::refresh`]
/// and is re-read on every lookup.
#[derive(Debug, Clone)]
pub struct StationStore {
    path: PathBuf,
}

impl StationStore {
    /// Create a store backed by the given snapshot path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot has been written.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the snapshot.
    ///
    /// Returns `None` if no snapshot exists yet.
    pub fn load(&self) -> Result<Option<StationDirectory>, StationError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StationError::Snapshot {
                    message: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        let directory = serde_json::from_str(&contents).map_err(|e| StationError::Snapshot {
            message: format!("failed to parse {}: {}", self.path.display(), e),
        })?;

        Ok(Some(directory))
    }

    /// Replace the snapshot with `directory`.
    ///
    /// The file is written to a temporary sibling and renamed into place,
    /// so readers see either the old or the new snapshot in full.
    pub fn save(&self, directory: &StationDirectory) -> Result<(), StationError> {
        let json = to_snapshot_json(directory).map_err(|e| StationError::Snapshot {
            message: format!("failed to serialize snapshot: {}", e),
        })?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| StationError::Snapshot {
                message: format!("failed to create snapshot directory: {}", e),
            })?;
        }

        let mut tmp =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| StationError::Snapshot {
                message: format!("failed to create temporary file: {}", e),
            })?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StationError::Snapshot {
                message: format!("failed to write snapshot: {}", e),
            })?;
        tmp.persist(&self.path).map_err(|e| StationError::Snapshot {
            message: format!("failed to replace {}: {}", self.path.display(), e),
        })?;

        Ok(())
    }

    /// Resolve a station by long, medium or short name, or by code.
    ///
    /// Returns `None` if there is no snapshot yet or nothing matches.
    /// Never fetches from the network.
    pub fn resolve(&self, name: &str) -> Result<Option<Station>, StationError> {
        let Some(directory) = self.load()? else {
            debug!(name, path = %self.path.display(), "no station snapshot");
            return Ok(None);
        };

        let found = directory.find(name).cloned();
        if found.is_none() {
            warn!(name, "could not find station");
        }
        Ok(found)
    }

    /// Fetch the full station list and replace the snapshot with it.
    pub async fn refresh(&self, client: &NsClient) -> Result<StationDirectory, StationError> {
        let directory = client.stations().await?;
        self.save(&directory)?;
        info!(
            count = directory.len(),
            path = %self.path.display(),
            "refreshed station snapshot"
        );
        Ok(directory)
    }
}

impl Default for StationStore {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_PATH)
    }
}

/// Serialize a directory with sorted keys and four-space indentation.
pub fn to_snapshot_json(directory: &StationDirectory) -> Result<String, serde_json::Error> {
    let value = sort_keys(serde_json::to_value(directory)?);

    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;

    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
