//! Departure board records and derived delay information.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset};
use serde::Deserialize;

use super::station::Station;
use super::timestamp;

/// A single departure from a station board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Departure {
    /// Display name of the final destination.
    pub direction: String,

    /// Train name, e.g. `NS 3541`.
    pub name: String,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub planned_date_time: DateTime<FixedOffset>,

    /// Offset from UTC in minutes.
    pub planned_time_zone_offset: i32,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub actual_date_time: DateTime<FixedOffset>,

    pub actual_time_zone_offset: i32,

    #[serde(default)]
    pub planned_track: Option<String>,

    pub train_category: String,

    pub cancelled: bool,

    pub departure_status: String,

    /// Filled in by the delay aggregator; never read from the wire.
    #[serde(skip)]
    pub delay: Option<DelayInfo>,
}

impl Departure {
    /// Actual minus planned departure time. May be zero or negative.
    pub fn delay_duration(&self) -> Duration {
        self.actual_date_time - self.planned_date_time
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<3} - {:<32} at {} on track {:>2}",
            self.train_category,
            self.direction,
            self.actual_date_time.format("%H:%M"),
            self.planned_track.as_deref().unwrap_or("-"),
        )?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}

/// Body of the `v2/departures` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct DeparturePayload {
    pub departures: Vec<Departure>,
}

/// Response of the `v2/departures` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DeparturesResponse {
    pub payload: DeparturePayload,
}

/// Delay of one departure, joined with its resolved stations.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayInfo {
    pub origin: Station,
    /// `None` when the departure's direction is not a known station name.
    pub destination: Option<Station>,
    pub delay: Duration,
    pub planned_departure: DateTime<FixedOffset>,
    pub actual_departure: DateTime<FixedOffset>,
}

impl DelayInfo {
    /// Build the delay record for `departure` leaving `origin`.
    pub fn for_departure(
        departure: &Departure,
        origin: Station,
        destination: Option<Station>,
    ) -> Self {
        Self {
            origin,
            destination,
            delay: departure.delay_duration(),
            planned_departure: departure.planned_date_time,
            actual_departure: departure.actual_date_time,
        }
    }

    /// The delay truncated to whole seconds.
    pub fn delay_seconds(&self) -> i64 {
        self.delay.num_seconds()
    }

    /// The `(origin, destination)` codes identifying this route.
    pub fn route(&self) -> (&str, Option<&str>) {
        (
            self.origin.code.as_str(),
            self.destination.as_ref().map(|d| d.code.as_str()),
        )
    }
}

impl fmt::Display for DelayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let destination = self
            .destination
            .as_ref()
            .map_or("?", |d| d.names.long.as_str());
        write!(
            f,
            "{} - {}: {} at {}",
            self.origin.names.long,
            destination,
            format_delay(self.delay),
            self.actual_departure.format("%Y-%m-%d %H:%M:%S%:z"),
        )
    }
}

/// Render a delay as `±H:MM:SS`.
pub fn format_delay(delay: Duration) -> String {
    let secs = delay.num_seconds();
    let sign = if secs < 0 { '-' } else { '+' };
    let abs = secs.unsigned_abs();
    format!("{sign}{}:{:02}:{:02}", abs / 3600, (abs % 3600) / 60, abs % 60)
}


#[cfg(test)]
mod tests {
    use super::fixtures::departure;
    use super::*;
    use crate::domain::station::fixtures::{amsterdam, utrecht};

    const BOARD: &str = r#"{
        "payload": {
            "source": "PPV",
            "departures": [{
                "direction": "Amsterdam Centraal",
                "name": "NS 3541",
                "plannedDateTime": "2024-03-01T10:00:00+0100",
                "plannedTimeZoneOffset": 60,
                "actualDateTime": "2024-03-01T10:05:00+0100",
                "actualTimeZoneOffset": 60,
                "plannedTrack": "5",
                "product": {"number": "3541", "categoryCode": "IC"},
                "trainCategory": "IC",
                "cancelled": false,
                "routeStations": [],
                "messages": [],
                "departureStatus": "INCOMING"
            }]
        }
    }"#;

    #[test]
    fn parses_departure_board() {
        let response: DeparturesResponse = serde_json::from_str(BOARD).unwrap();
        let departures = response.payload.departures;
        assert_eq!(departures.len(), 1);

        let dep = &departures[0];
        assert_eq!(dep.direction, "Amsterdam Centraal");
        assert_eq!(dep.planned_track.as_deref(), Some("5"));
        assert_eq!(dep.train_category, "IC");
        assert!(dep.delay.is_none());
    }

    #[test]
    fn missing_track_is_none() {
        let json = BOARD.replace(r#""plannedTrack": "5","#, "");
        let response: DeparturesResponse = serde_json::from_str(&json).unwrap();
        assert!(response.payload.departures[0].planned_track.is_none());
    }

    #[test]
    fn five_minutes_late() {
        let dep = departure("Amsterdam Centraal", 5);
        assert_eq!(dep.delay_duration(), Duration::minutes(5));
    }

    #[test]
    fn on_time_is_zero() {
        let dep = departure("Amsterdam Centraal", 0);
        assert_eq!(dep.delay_duration(), Duration::zero());
    }

    #[test]
    fn early_departure_is_negative() {
        let dep = departure("Amsterdam Centraal", -1);
        assert_eq!(dep.delay_duration(), Duration::minutes(-1));
    }

    #[test]
    fn delay_info_copies_timestamps() {
        let dep = departure("Amsterdam Centraal", 5);
        let info = DelayInfo::for_departure(&dep, utrecht(), Some(amsterdam()));

        assert_eq!(info.delay_seconds(), 300);
        assert_eq!(info.planned_departure, dep.planned_date_time);
        assert_eq!(info.actual_departure, dep.actual_date_time);
        assert_eq!(info.route(), ("UT", Some("ASD")));
    }

    #[test]
    fn format_delay_signs() {
        assert_eq!(format_delay(Duration::minutes(5)), "+0:05:00");
        assert_eq!(format_delay(Duration::zero()), "+0:00:00");
        assert_eq!(format_delay(Duration::seconds(-90)), "-0:01:30");
        assert_eq!(format_delay(Duration::hours(2)), "+2:00:00");
    }

    #[test]
    fn display_delay_info() {
        let dep = departure("Amsterdam Centraal", 5);
        let info = DelayInfo::for_departure(&dep, utrecht(), Some(amsterdam()));
        assert_eq!(
            info.to_string(),
            "Utrecht Centraal - Amsterdam Centraal: +0:05:00 at 2024-03-01 10:05:00+01:00"
        );

        let unknown = DelayInfo::for_departure(&dep, utrecht(), None);
        assert!(unknown.to_string().starts_with("Utrecht Centraal - ?: "));
    }

    #[test]
    fn display_departure_line() {
        let dep = departure("Amsterdam Centraal", 5);
        let line = dep.to_string();
        assert!(line.starts_with("IC  - Amsterdam Centraal"));
        assert!(line.ends_with("at 10:05 on track  5"));
    }
}
