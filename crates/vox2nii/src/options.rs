use serde::{Deserialize, Serialize};
use vox2nii_core::ConfigError;
use vox2nii_nifti::HeaderDefaults;

/// Per-call conversion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Log the model dimensions at info level.
    pub verbose: bool,
    pub header: HeaderDefaults,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            verbose: true,
            header: HeaderDefaults::default(),
        }
    }
}

impl ConvertOptions {
    /// Parse options from RON. Missing fields take their defaults.
    pub fn from_ron(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        options
            .from_str(ron_str)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
