//! NS travel information API client.
//!
//! This module provides the HTTP transport for the NS "reisinformatie"
//! API. It attaches the subscription key, decodes JSON bodies into the
//! typed records in [`crate::domain`], and maps the API's error envelope
//! to [`ApiError`].

mod client;
mod envelope;
mod error;

pub use client::{ClientConfig, DepartureParams, DisruptionParams, NoParams, NsClient};
pub use envelope::{Envelope, decode};
pub use error::{ApiError, ClientError};
