//! Types for checkpoint conversion submissions.

use serde::{Deserialize, Serialize};

use crate::config::FormConfig;
use crate::error::{ConvertError, Result};

/// Status string the conversion service reports for a finished job.
pub const STATUS_SUCCESS: &str = "success";

/// Parameters of one conversion job, sent to the service as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConversionRequest {
    /// Hugging Face model ID (or a path the service can resolve)
    pub model_id: String,
    /// Checkpoint file name inside the model repository
    pub filename: String,
    /// Model whose configuration the converted pipeline is built on
    #[serde(default = "default_reference_model")]
    pub reference_model: String,
    /// Hugging Face access token; empty means anonymous
    #[serde(default)]
    pub hf_token: String,
}

fn default_reference_model() -> String {
    FormConfig::DEFAULT_REFERENCE_MODEL.to_string()
}

impl Default for ConversionRequest {
    fn default() -> Self {
        Self {
            model_id: String::new(),
            filename: String::new(),
            reference_model: default_reference_model(),
            hf_token: String::new(),
        }
    }
}

impl ConversionRequest {
    /// Check that the required fields are filled in.
    ///
    /// The service is the authority on validity; this only catches blanks.
    pub fn validate(&self) -> Result<()> {
        if self.model_id.trim().is_empty() {
            return Err(ConvertError::required("model_id"));
        }
        if self.filename.trim().is_empty() {
            return Err(ConvertError::required("filename"));
        }
        Ok(())
    }

    pub fn has_token(&self) -> bool {
        !self.hf_token.is_empty()
    }
}

/// Reply from the conversion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub status: String,
    #[serde(default)]
    pub output: Option<String>,
}

impl ConversionResponse {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            output: Some(output.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Lifecycle of the current submission. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing submitted, or the last result was dismissed
    #[default]
    Idle,
    /// Waiting for the service; progress is a placeholder in [0, 1]
    Pending { progress: f32 },
    /// The service reported success
    Success { output: String },
    /// The call failed; `message` is shown to the user verbatim
    Failed { message: String },
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending { .. })
    }

    /// Whether a final outcome is on display.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            SubmissionState::Success { .. } | SubmissionState::Failed { .. }
        )
    }
}

/// What to do when the service answers with a status other than `"success"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnexpectedStatusPolicy {
    /// Clear the busy state and show nothing.
    #[default]
    Ignore,
    /// Report the status as a failure.
    Fail,
}

/// Behaviour switches for [`SubmissionController`](super::SubmissionController).
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerOptions {
    pub unexpected_status: UnexpectedStatusPolicy,
    /// Reject blank required fields before calling the service.
    pub validate_required: bool,
}
