//! Loader for RON tuning files at startup.

use bevy::prelude::*;
use ron::Options;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::movement::MovementTuning;

use super::validation::validate_tuning;

/// Tuning file format understood by this build.
pub const TUNING_SCHEMA_VERSION: u32 = 1;

/// Error type for tuning loading failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for TuningLoadError {}

/// On-disk wrapper around [`MovementTuning`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TuningFile {
    pub schema_version: u32,
    #[serde(default)]
    pub movement: MovementTuning,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse and check tuning text. `file` only labels errors.
pub fn parse_movement_tuning(contents: &str, file: &str) -> Result<MovementTuning, TuningLoadError> {
    let data: TuningFile = ron_options()
        .from_str(contents)
        .map_err(|e| TuningLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    if data.schema_version != TUNING_SCHEMA_VERSION {
        return Err(TuningLoadError {
            file: file.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected {})",
                data.schema_version, TUNING_SCHEMA_VERSION
            ),
        });
    }

    let issues = validate_tuning(&data.movement);
    if !issues.is_empty() {
        let message = issues
            .iter()
            .map(|issue| issue.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(TuningLoadError {
            file: file.to_string(),
            message: format!("Invalid tuning: {}", message),
        });
    }

    Ok(data.movement)
}

/// Read a tuning file from disk.
pub fn load_movement_tuning(path: &Path) -> Result<MovementTuning, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    let tuning = parse_movement_tuning(&contents, &file_name)?;
    debug!("Parsed movement tuning from {}", file_name);
    Ok(tuning)
}
