//! HTTP implementation of the conversion API.

use async_trait::async_trait;
use tracing::{debug, info};

use super::ConversionApi;
use crate::config::NetworkConfig;
use crate::conversion::{ConversionRequest, ConversionResponse};
use crate::error::Result;
use crate::network::HttpClient;

/// Connection settings for [`HttpConversionApi`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Service root, e.g. `http://127.0.0.1:8000/api`
    pub base_url: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: NetworkConfig::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Calls `POST {base_url}/diffusers/convert`.
#[derive(Debug, Clone)]
pub struct HttpConversionApi {
    http: HttpClient,
}

impl HttpConversionApi {
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let http = HttpClient::new(&options.base_url)?;
        debug!("Conversion service at {}", http.base_url());
        Ok(Self { http })
    }
}

#[async_trait]
impl ConversionApi for HttpConversionApi {
    async fn convert_engine(&self, request: &ConversionRequest) -> Result<ConversionResponse> {
        info!(
            "Requesting conversion of {}/{} (reference {}, authenticated: {})",
            request.model_id,
            request.filename,
            request.reference_model,
            request.has_token()
        );
        let response: ConversionResponse = self
            .http
            .post_json(NetworkConfig::CONVERT_PATH, request)
            .await?;
        debug!("Conversion service answered with status {:?}", response.status);
        Ok(response)
    }
}
