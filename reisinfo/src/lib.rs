//! NS travel information client.
//!
//! Fetches stations, departure boards and disruptions from the Dutch
//! railways' public API, and derives per-route delay summaries from
//! departure boards.

pub mod api;
pub mod config;
pub mod delays;
pub mod domain;
pub mod stations;
