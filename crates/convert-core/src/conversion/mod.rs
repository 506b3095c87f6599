//! Checkpoint conversion submissions.
//!
//! This module provides the `SubmissionController`, which sends a
//! `ConversionRequest` to the conversion service and tracks the outcome as a
//! single `SubmissionState`, plus the `DisplayState` projection the rendering
//! layer draws from.

mod controller;
mod display;
mod types;

pub use controller::{settle, SubmissionController, SubmissionHandle};
pub use display::{success_message, Banner, BusyView, DisplayState};
pub use types::{
    ControllerOptions, ConversionRequest, ConversionResponse, SubmissionState,
    UnexpectedStatusPolicy, STATUS_SUCCESS,
};
