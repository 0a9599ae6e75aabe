//! Per-route delay summaries.
//!
//! Departures from a station are paired with their resolved origin and
//! destination stations, and reduced to the first departure per distinct
//! route.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::api::{ClientError, NsClient};
use crate::domain::{DelayInfo, Departure, Station, StationDirectory};
use crate::stations::{StationError, StationStore};

/// Errors from the delay aggregator.
#[derive(Debug, thiserror::Error)]
pub enum DelayError {
    /// A caller-supplied station name did not resolve
    #[error("station not found: {name}")]
    StationNotFound { name: String },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Station(#[from] StationError),
}

/// Computes departure delays from live departure boards.
#[derive(Debug, Clone)]
pub struct DelayReporter {
    client: NsClient,
    store: StationStore,
}

impl DelayReporter {
    pub fn new(client: NsClient, store: StationStore) -> Self {
        Self { client, store }
    }

    pub fn client(&self) -> &NsClient {
        &self.client
    }

    pub fn store(&self) -> &StationStore {
        &self.store
    }

    /// Departures from `origin_name`, each with its [`DelayInfo`] attached.
    pub async fn departure_info(&self, origin_name: &str) -> Result<Vec<Departure>, DelayError> {
        let directory = self.directory()?;
        let origin = find_station(&directory, origin_name)?;
        self.enriched_board(&origin, &directory).await
    }

    /// The next delay for every distinct route leaving `origin_name`.
    ///
    /// With a destination, only departures whose direction is that
    /// station's long name are kept. An unresolvable destination is an
    /// error rather than an empty result.
    pub async fn delay_info(
        &self,
        origin_name: &str,
        destination_name: Option<&str>,
    ) -> Result<Vec<DelayInfo>, DelayError> {
        let directory = self.directory()?;
        let origin = find_station(&directory, origin_name)?;
        let destination = destination_name
            .map(|name| find_station(&directory, name))
            .transpose()?;

        let departures = self.enriched_board(&origin, &directory).await?;
        Ok(route_delays(&departures, destination.as_ref()))
    }

    fn directory(&self) -> Result<StationDirectory, StationError> {
        Ok(self.store.load()?.unwrap_or_default())
    }

    async fn enriched_board(
        &self,
        origin: &Station,
        directory: &StationDirectory,
    ) -> Result<Vec<Departure>, DelayError> {
        let mut departures = self.client.departures(&origin.code).await?.payload.departures;
        debug!(origin = %origin.code, count = departures.len(), "fetched departures");

        enrich_departures(&mut departures, origin, directory);
        Ok(departures)
    }
}

fn find_station(directory: &StationDirectory, name: &str) -> Result<Station, DelayError> {
    directory.find(name).cloned().ok_or_else(|| {
        warn!(name, "could not find station");
        DelayError::StationNotFound {
            name: name.to_string(),
        }
    })
}

/// Attach a [`DelayInfo`] to every departure.
///
/// The destination is looked up from the departure's direction and is
/// `None` when the directory has no station by that name.
pub fn enrich_departures(
    departures: &mut [Departure],
    origin: &Station,
    directory: &StationDirectory,
) {
    for departure in departures {
        let destination = directory.find(&departure.direction).cloned();
        if destination.is_none() {
            debug!(direction = %departure.direction, "direction is not a known station");
        }
        let info = DelayInfo::for_departure(departure, origin.clone(), destination);
        departure.delay = Some(info);
    }
}

/// Keep the first delay per `(origin, destination)` route, in board order.
///
/// With a destination, departures whose direction differs from its long
/// name are dropped first. Departures without a delay are skipped.
pub fn route_delays(departures: &[Departure], destination: Option<&Station>) -> Vec<DelayInfo> {
    let mut seen = HashSet::new();

    departures
        .iter()
        .filter(|d| destination.is_none_or(|s| d.direction == s.names.long))
        .filter_map(|d| d.delay.as_ref())
        .filter(|info| {
            let (origin, destination) = info.route();
            seen.insert((origin.to_string(), destination.map(str::to_string)))
        })
        .cloned()
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::fixtures::{amsterdam, departure, leiden, rotterdam, utrecht};
    use chrono::Duration;
    use proptest::prelude::*;

    const DIRECTIONS: [&str; 4] = [
        "Amsterdam Centraal",
        "Rotterdam Centraal",
        "Leiden Centraal",
        "Schiphol Airport",
    ];

    fn board() -> impl Strategy<Value = Vec<(usize, i64)>> {
        prop::collection::vec((0..DIRECTIONS.len(), -2i64..30), 0..20)
    }

    fn enriched(board: &[(usize, i64)]) -> Vec<Departure> {
        let directory = StationDirectory::new(vec![utrecht(), amsterdam(), rotterdam(), leiden()]);
        let mut departures: Vec<_> = board
            .iter()
            .map(|&(i, m)| departure(DIRECTIONS[i], m))
            .collect();
        enrich_departures(&mut departures, &utrecht(), &directory);
        departures
    }

    proptest! {
        /// Delay is always actual minus planned
        #[test]
        fn delay_is_actual_minus_planned(board in board()) {
            for (dep, &(_, mins)) in enriched(&board).iter().zip(&board) {
                let info = dep.delay.as_ref().unwrap();
                prop_assert_eq!(info.delay, Duration::minutes(mins));
                prop_assert_eq!(info.delay, info.actual_departure - info.planned_departure);
            }
        }

        /// One result per distinct route, in first-occurrence order
        #[test]
        fn one_delay_per_route(board in board()) {
            let departures = enriched(&board);
            let delays = route_delays(&departures, None);

            let mut expected: Vec<usize> = Vec::new();
            for &(i, _) in &board {
                if !expected.contains(&i) {
                    expected.push(i);
                }
            }
            prop_assert_eq!(delays.len(), expected.len());

            for (info, &i) in delays.iter().zip(&expected) {
                let first = board.iter().find(|&&(j, _)| j == i).unwrap();
                prop_assert_eq!(info.delay, Duration::minutes(first.1));
            }
        }

        /// Filtering never yields another destination
        #[test]
        fn filter_only_keeps_destination(board in board()) {
            let departures = enriched(&board);
            let delays = route_delays(&departures, Some(&amsterdam()));

            prop_assert!(delays.len() <= 1);
            for info in &delays {
                prop_assert_eq!(info.destination.as_ref(), Some(&amsterdam()));
            }
        }
    }
}
