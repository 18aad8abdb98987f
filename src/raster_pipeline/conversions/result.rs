use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

/// Outcome of one pipeline call. Failures are reported here, never raised.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingResult {
    pub success: bool,
    /// Human-readable summary
    pub message: String,
    pub error_message: Option<String>,
    pub processed_features: u32,
    pub output_file_path: Option<PathBuf>,
    /// Wall-clock time up to completion or failure
    pub elapsed_milliseconds: u64,
    pub details: BTreeMap<String, Value>,
}

impl ProcessingResult {
    pub fn success(message: impl Into<String>, processed_features: u32) -> Self {
        Self {
            success: true,
            message: message.into(),
            processed_features,
            ..Self::default()
        }
    }

    pub fn failure(error_message: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_message: Some(error_message.into()),
            ..Self::default()
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file_path = Some(path.into());
        self
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}
