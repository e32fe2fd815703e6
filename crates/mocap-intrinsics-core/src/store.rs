//! Durable storage for camera parameter profiles.
//!
//! Profiles are pretty-printed JSON records. Saving is last-writer-wins by
//! policy: redeploying a camera model silently replaces the previous profile,
//! and the `schema_version` tag is the only forward-compatibility mechanism.

use std::fs;
use std::path::{Path, PathBuf};

use crate::intrinsics::{IntrinsicParameters, CURRENT_SCHEMA_VERSION};

/// File name of a deployed camera profile inside its variant directory.
pub const PROFILE_FILE_NAME: &str = "camera_intrinsics.json";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("no camera profile at {path}")]
    NotFound { path: PathBuf },
    #[error("profile schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Write a parameter record to `path`, creating parent directories as needed.
///
/// Overwrites any existing record at that path.
pub fn save_parameters(
    path: impl AsRef<Path>,
    params: &IntrinsicParameters,
) -> Result<(), StoreError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(params)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a parameter record previously written with [`save_parameters`].
pub fn load_parameters(path: impl AsRef<Path>) -> Result<IntrinsicParameters, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StoreError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path)?;
    let params: IntrinsicParameters = serde_json::from_str(&raw)?;
    if params.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found: params.schema_version,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    Ok(params)
}

/// Publish one profile to every requested deployment slot.
///
/// Each variant receives an identical copy under
/// `<root>/<camera_model>/<variant>/camera_intrinsics.json`. Returns the
/// written paths in variant order.
pub fn deploy_parameters(
    root: impl AsRef<Path>,
    variants: &[String],
    params: &IntrinsicParameters,
) -> Result<Vec<PathBuf>, StoreError> {
    let model_dir = root.as_ref().join(&params.camera_model);
    let mut written = Vec::with_capacity(variants.len());
    for variant in variants {
        let path = model_dir.join(variant).join(PROFILE_FILE_NAME);
        save_parameters(&path, params)?;
        written.push(path);
    }
    Ok(written)
}
