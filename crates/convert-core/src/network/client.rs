//! HTTP client for the conversion service.
//!
//! Provides a wrapper around reqwest with:
//! - A base URL that endpoint paths are joined onto
//! - A connect timeout but no total timeout (conversions run for minutes)
//! - Mapping of non-success statuses to [`ConvertError::Http`]

use crate::config::NetworkConfig;
use crate::{ConvertError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

/// Error body returned by the service framework (`{"detail": ...}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// HTTP client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConvertError::Config {
                message: format!("unsupported URL scheme: {}", base_url.scheme()),
            });
        }
        // Url::join drops the last segment unless the path ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .connect_timeout(NetworkConfig::CONNECT_TIMEOUT)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| ConvertError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// POST a JSON body and decode a JSON reply.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?;
        let response = check_response_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

async fn check_response_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    warn!("Conversion service returned {}", status);
    Err(ConvertError::Http {
        status: status.as_u16(),
        detail,
    })
}

/// Pull a human-readable `detail` out of an error body, if there is one.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = HttpClient::new("http://127.0.0.1:8000/api").unwrap();
        assert_eq!(
            client.endpoint("diffusers/convert").unwrap().as_str(),
            "http://127.0.0.1:8000/api/diffusers/convert"
        );
        assert_eq!(
            client.endpoint("/diffusers/convert").unwrap().as_str(),
            "http://127.0.0.1:8000/api/diffusers/convert"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let client = HttpClient::new("http://localhost:8000/api/").unwrap();
        assert_eq!(
            client.endpoint("diffusers/convert").unwrap().as_str(),
            "http://localhost:8000/api/diffusers/convert"
        );
    }

    #[test]
    fn test_rejects_invalid_urls() {
        assert!(matches!(
            HttpClient::new("not a url"),
            Err(ConvertError::Config { .. })
        ));
        assert!(matches!(
            HttpClient::new("ftp://example.com"),
            Err(ConvertError::Config { .. })
        ));
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail":"Repository not found"}"#).as_deref(),
            Some("Repository not found")
        );
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"detail":null}"#), None);
        assert_eq!(
            extract_detail(r#"{"detail":[{"loc":["body"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body"]}]"#)
        );
    }
}
