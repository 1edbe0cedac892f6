//! Checkpoint - save/load playthrough state
//!
//! Serializes the complete game snapshot for pause/resume. The snapshot
//! embeds the RNG state and a SHA256 hash of the config it was produced
//! under, so a resumed playthrough continues bit-identically and a
//! checkpoint can never be silently replayed against different tuning.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::GameConfig;
use crate::models::state::GameState;

/// Snapshot format version; bump on incompatible layout changes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("config hash mismatch: snapshot was taken under {expected}, loading under {actual}")]
    ConfigMismatch { expected: String, actual: String },

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// A complete saved playthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,

    /// SHA256 of the canonical JSON form of the config
    pub config_hash: String,

    /// Week at which the snapshot was taken (redundant with `state`,
    /// kept for cheap inspection without full deserialization)
    pub week: usize,

    pub state: GameState,
}

/// Compute the deterministic SHA256 hash of a config
///
/// Serializes through `serde_json::Value` with recursively sorted object
/// keys so the hash does not depend on field or map ordering.
pub fn compute_config_hash(config: &GameConfig) -> Result<String, SnapshotError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config)
        .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let canonical = canonicalize(value);
    let json = serde_json::to_string(&canonical)
        .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Serialize a snapshot to its JSON checkpoint form
pub fn save_state(state: &GameState, config: &GameConfig) -> Result<String, SnapshotError> {
    let saved = SavedGame {
        version: SNAPSHOT_VERSION,
        config_hash: compute_config_hash(config)?,
        week: state.week(),
        state: state.clone(),
    };
    serde_json::to_string(&saved).map_err(|e| SnapshotError::Serialization(e.to_string()))
}

/// Restore a snapshot, verifying version and config hash
pub fn load_state(json: &str, config: &GameConfig) -> Result<GameState, SnapshotError> {
    let saved: SavedGame =
        serde_json::from_str(json).map_err(|e| SnapshotError::Serialization(e.to_string()))?;

    if saved.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(saved.version));
    }

    let actual = compute_config_hash(config)?;
    if saved.config_hash != actual {
        return Err(SnapshotError::ConfigMismatch {
            expected: saved.config_hash,
            actual,
        });
    }

    Ok(saved.state)
}
