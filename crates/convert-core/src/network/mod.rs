//! Network utilities for talking to the conversion service.

mod client;

pub use client::HttpClient;
