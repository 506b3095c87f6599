//! Diffusers Convert - Headless client for checkpoint conversion jobs.
//!
//! This crate holds the form values for a diffusers conversion job, submits
//! them to a remote conversion service, and tracks the outcome so a front end
//! can render exactly one of busy, success or error at a time. It has no
//! rendering of its own.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use convert_core::{ClientOptions, FormField, FormStore, HttpConversionApi, SubmissionController};
//!
//! #[tokio::main]
//! async fn main() -> convert_core::Result<()> {
//!     let api = HttpConversionApi::new(&ClientOptions::default())?;
//!     let controller = SubmissionController::new(Arc::new(api));
//!
//!     let form = FormStore::new();
//!     form.set_field(FormField::ModelId, "CompVis/stable-diffusion-v-1-4-original");
//!     form.set_field(FormField::Filename, "sd-v1-4.ckpt");
//!
//!     controller.submit_form(&form).settled().await;
//!     println!("{:?}", controller.display());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod conversion;
pub mod dispose;
pub mod error;
pub mod form;
pub mod network;

// Re-export commonly used types
pub use api::{ClientOptions, ConversionApi, HttpConversionApi};
pub use conversion::{
    Banner, ControllerOptions, ConversionRequest, ConversionResponse, DisplayState,
    SubmissionController, SubmissionHandle, SubmissionState, UnexpectedStatusPolicy,
};
pub use dispose::DisposalToken;
pub use error::{ConvertError, Result};
pub use form::{FormField, FormStore};
