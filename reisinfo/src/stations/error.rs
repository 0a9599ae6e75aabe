//! Station directory error types.

use crate::api::ClientError;

/// Errors that can occur when refreshing or reading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Fetching the station list failed
    #[error("failed to fetch stations: {0}")]
    Client(#[from] ClientError),

    /// Reading or writing the snapshot failed
    #[error("station snapshot error: {message}")]
    Snapshot { message: String },
}
