//! Centralized configuration for the conversion client.
//!
//! This module provides configuration constants for form defaults, the
//! conversion service endpoint, and the texts shown by the display layer.

use std::time::Duration;

/// Form defaults.
pub struct FormConfig;

impl FormConfig {
    /// Reference model used when the user does not override it.
    pub const DEFAULT_REFERENCE_MODEL: &'static str = "CompVis/stablediffusion-v1-4";
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8000/api";
    pub const CONVERT_PATH: &'static str = "diffusers/convert";
    /// Only connecting is bounded; a conversion may run for many minutes.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &'static str = "diffusers-convert/0.1";
}

/// Texts rendered for each display state.
pub struct DisplayConfig;

impl DisplayConfig {
    pub const BUSY_TITLE: &'static str = "Processing...";
    pub const BUSY_TEXT: &'static str =
        "This may take about 10 minutes. Please wait until the process is finished.";
    pub const SUCCESS_TITLE: &'static str = "Success!";
    pub const ERROR_TITLE: &'static str = "Something went wrong...";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_parses() {
        let base = url::Url::parse(NetworkConfig::DEFAULT_BASE_URL).expect("Should parse");
        assert_eq!(base.host_str(), Some("127.0.0.1"));
    }

    #[test]
    fn test_timeouts_are_reasonable() {
        assert!(NetworkConfig::CONNECT_TIMEOUT > Duration::ZERO);
    }
}
