//! Projection of a submission state onto what the user sees.

use serde::Serialize;

use super::types::SubmissionState;
use crate::config::DisplayConfig;

/// Busy indicator shown while a conversion is in flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusyView {
    pub title: &'static str,
    pub text: &'static str,
    /// Fraction in [0, 1]
    pub progress: f32,
    /// Progress rendered as a percentage, e.g. `"0%"`
    pub label: String,
}

/// Outcome banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Banner {
    Success { title: &'static str, message: String },
    Error { title: &'static str, message: String },
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Banner::Success { message, .. } | Banner::Error { message, .. } => message,
        }
    }

    /// Only the success banner carries a close button.
    pub fn dismissible(&self) -> bool {
        matches!(self, Banner::Success { .. })
    }
}

/// Everything the rendering layer needs for the submission area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    pub submit_enabled: bool,
    pub busy: Option<BusyView>,
    pub banner: Option<Banner>,
}

/// Message template for a successful conversion.
pub fn success_message(output: &str) -> String {
    format!("success! output: {}", output)
}

impl From<&SubmissionState> for DisplayState {
    fn from(state: &SubmissionState) -> Self {
        match state {
            SubmissionState::Idle => DisplayState {
                submit_enabled: true,
                busy: None,
                banner: None,
            },
            SubmissionState::Pending { progress } => {
                let progress = progress.clamp(0.0, 1.0);
                DisplayState {
                    submit_enabled: false,
                    busy: Some(BusyView {
                        title: DisplayConfig::BUSY_TITLE,
                        text: DisplayConfig::BUSY_TEXT,
                        progress,
                        label: format!("{:.0}%", progress * 100.0),
                    }),
                    banner: None,
                }
            }
            SubmissionState::Success { output } => DisplayState {
                submit_enabled: true,
                busy: None,
                banner: Some(Banner::Success {
                    title: DisplayConfig::SUCCESS_TITLE,
                    message: success_message(output),
                }),
            },
            SubmissionState::Failed { message } => DisplayState {
                submit_enabled: true,
                busy: None,
                banner: Some(Banner::Error {
                    title: DisplayConfig::ERROR_TITLE,
                    message: message.clone(),
                }),
            },
        }
    }
}
