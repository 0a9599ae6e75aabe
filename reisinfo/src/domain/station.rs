//! Station records.
//!
//! Field names follow the NS API on input. The snapshot written by
//! [`crate::stations::StationStore`] uses the English names for the
//! name bundle and list key, and both spellings are accepted when reading.

use serde::{Deserialize, Serialize};

/// The long/medium/short display names of a station.
///
/// These are kept verbatim; no case folding or translation is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationNames {
    #[serde(alias = "lang")]
    pub long: String,
    #[serde(alias = "middel")]
    pub medium: String,
    #[serde(alias = "kort")]
    pub short: String,
}

impl StationNames {
    /// All three names, long first.
    pub fn all(&self) -> [&str; 3] {
        [&self.long, &self.medium, &self.short]
    }
}

/// A station as listed by the `v2/stations` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station code, e.g. `UT`.
    pub code: String,

    #[serde(rename = "UICCode")]
    pub uic_code: String,

    #[serde(rename = "EVACode")]
    pub eva_code: String,

    #[serde(rename = "stationType")]
    pub station_type: String,

    #[serde(rename = "land")]
    pub country: String,

    pub lat: f64,
    pub lng: f64,

    #[serde(alias = "namen")]
    pub names: StationNames,

    /// Date from which this record is valid, as sent upstream.
    #[serde(rename = "ingangsDatum")]
    pub start_date: String,

    #[serde(rename = "heeftFaciliteiten")]
    pub has_facilities: bool,

    #[serde(rename = "heeftVertrektijden")]
    pub has_departure_times: bool,

    #[serde(rename = "heeftReisassistentie")]
    pub has_travel_assistance: bool,
}

impl Station {
    /// Whether `name` exactly matches one of the station's names or its code.
    pub fn has_name(&self, name: &str) -> bool {
        self.code == name || self.names.all().contains(&name)
    }
}

/// An ordered list of stations.
///
/// This is both the decoded `v2/stations` response (`payload`) and the
/// on-disk snapshot (`stations`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationDirectory {
    #[serde(alias = "payload")]
    pub stations: Vec<Station>,
}

impl StationDirectory {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Find the first station, in list order, that answers to `name`.
    pub fn find(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.has_name(name))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn station(code: &str, long: &str, medium: &str, short: &str) -> Station {
        Station {
            code: code.to_string(),
            uic_code: format!("8400{code}"),
            eva_code: format!("8400{code}"),
            station_type: "MEGA_STATION".to_string(),
            country: "NL".to_string(),
            lat: 52.0,
            lng: 5.0,
            names: StationNames {
                long: long.to_string(),
                medium: medium.to_string(),
                short: short.to_string(),
            },
            start_date: "2017-02-01".to_string(),
            has_facilities: true,
            has_departure_times: true,
            has_travel_assistance: true,
        }
    }

    pub fn utrecht() -> Station {
        station("UT", "Utrecht Centraal", "Utrecht C.", "Utrecht C")
    }

    pub fn amsterdam() -> Station {
        station("ASD", "Amsterdam Centraal", "Amsterdam C.", "Amsterdam")
    }

    pub fn rotterdam() -> Station {
        station("RTD", "Rotterdam Centraal", "Rotterdam C.", "Rotterdam")
    }

    pub fn leiden() -> Station {
        station("LEDN", "Leiden Centraal", "Leiden C.", "Leiden C")
    }
}
