//! Domain types for the NS travel information API.
//!
//! These are the typed records that API payloads are validated into.
//! Unknown upstream fields are ignored; missing or mistyped required
//! fields fail decoding.

mod departure;
mod disruption;
mod station;
pub mod timestamp;

pub use departure::{DelayInfo, Departure, DeparturePayload, DeparturesResponse, format_delay};
pub use disruption::{Disruption, DisruptionType, DisruptionsResponse};
pub use station::{Station, StationDirectory, StationNames};
