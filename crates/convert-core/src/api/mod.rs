//! The conversion service as seen by the submission controller.
//!
//! [`ConversionApi`] is the seam between the controller and the transport.
//! [`HttpConversionApi`] is the production implementation; tests substitute
//! their own.

mod http;

pub use http::{ClientOptions, HttpConversionApi};

use async_trait::async_trait;

use crate::conversion::{ConversionRequest, ConversionResponse};
use crate::error::Result;

/// Remote conversion engine.
#[async_trait]
pub trait ConversionApi: Send + Sync {
    /// Run one conversion and wait until the service settles it.
    async fn convert_engine(&self, request: &ConversionRequest) -> Result<ConversionResponse>;
}
