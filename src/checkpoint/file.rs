use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::traits::{CheckpointError, CheckpointStore};
use crate::types::Checkpoint;

/// Checkpoint store backed by a single JSON file.
///
/// `save` writes a sibling temp file, fsyncs it, then renames it over the
/// target, so readers never observe a half-written checkpoint and the update
/// is durable before `save` returns.
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn name(&self) -> &'static str {
        "file-checkpoint"
    }

    fn load(&self) -> Result<Checkpoint, CheckpointError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CheckpointError::NotFound);
            }
            Err(e) => return Err(CheckpointError::Io(e)),
        };

        let checkpoint: Checkpoint = serde_json::from_str(&contents)?;
        Ok(checkpoint)
    }

    fn save(&self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        let contents = serde_json::to_string(checkpoint)?;
        let tmp = self.temp_path();

        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        debug!(
            "Checkpoint saved: block={}, trx_id={}",
            checkpoint.block, checkpoint.trx_id
        );
        Ok(())
    }
}
