//! Service disruption reports.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use super::timestamp;

/// Category of a disruption report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DisruptionType {
    Calamity,
    Disruption,
    Maintenance,
}

impl DisruptionType {
    pub const ALL: [DisruptionType; 3] = [
        DisruptionType::Calamity,
        DisruptionType::Disruption,
        DisruptionType::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisruptionType::Calamity => "CALAMITY",
            DisruptionType::Disruption => "DISRUPTION",
            DisruptionType::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for DisruptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single disruption report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disruption {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: DisruptionType,

    pub title: String,

    pub is_active: bool,

    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub registration_time: Option<DateTime<FixedOffset>>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub release_time: Option<DateTime<FixedOffset>>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub start: Option<DateTime<FixedOffset>>,

    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub end: Option<DateTime<FixedOffset>>,

    #[serde(default)]
    pub period: Option<String>,
}

/// Decoded `v3/disruptions` response.
///
/// The endpoint returns a bare array; the client nests it under
/// `disruptions` before decoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisruptionsResponse {
    pub disruptions: Vec<Disruption>,
}

impl DisruptionsResponse {
    pub fn by_type(&self, kind: DisruptionType) -> Vec<&Disruption> {
        self.disruptions.iter().filter(|d| d.kind == kind).collect()
    }

    /// Number of disruptions per type. Every type is present, possibly as 0.
    pub fn counts(&self) -> BTreeMap<DisruptionType, usize> {
        let mut counts: BTreeMap<_, _> = DisruptionType::ALL.iter().map(|&k| (k, 0)).collect();
        for d in &self.disruptions {
            *counts.entry(d.kind).or_default() += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> DisruptionsResponse {
        serde_json::from_str(&format!(r#"{{"disruptions": {json}}}"#)).unwrap()
    }

    const SAMPLE: &str = r#"[
        {
            "id": "7001",
            "type": "MAINTENANCE",
            "title": "Utrecht - Amersfoort",
            "isActive": true,
            "topic": "werkzaamheden",
            "start": "2024-03-01T01:00:00+0100",
            "end": "2024-03-03T05:00:00+0100",
            "period": "zaterdag en zondag"
        },
        {
            "id": "7002",
            "type": "DISRUPTION",
            "title": "Leiden - Den Haag",
            "isActive": true,
            "registrationTime": "2024-03-01T09:12:00+0100",
            "releaseTime": null,
            "impact": {"value": 3}
        },
        {
            "id": "7003",
            "type": "MAINTENANCE",
            "title": "Zwolle - Kampen",
            "isActive": true
        }
    ]"#;

    #[test]
    fn parses_disruptions() {
        let r = response(SAMPLE);
        assert_eq!(r.disruptions.len(), 3);

        let first = &r.disruptions[0];
        assert_eq!(first.kind, DisruptionType::Maintenance);
        assert_eq!(first.topic.as_deref(), Some("werkzaamheden"));
        assert!(first.start.is_some());
        assert!(first.registration_time.is_none());

        let second = &r.disruptions[1];
        assert!(second.registration_time.is_some());
        assert!(second.release_time.is_none());
        assert!(second.period.is_none());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let json = r#"{"disruptions": [{"id": "1", "type": "STRIKE", "title": "x", "isActive": true}]}"#;
        assert!(serde_json::from_str::<DisruptionsResponse>(json).is_err());
    }

    #[test]
    fn by_type_filters() {
        let r = response(SAMPLE);
        let maintenance = r.by_type(DisruptionType::Maintenance);
        assert_eq!(maintenance.len(), 2);
        assert_eq!(maintenance[0].id, "7001");
        assert_eq!(maintenance[1].id, "7003");
        assert!(r.by_type(DisruptionType::Calamity).is_empty());
    }

    #[test]
    fn counts_include_empty_types() {
        let counts = response(SAMPLE).counts();
        assert_eq!(counts[&DisruptionType::Calamity], 0);
        assert_eq!(counts[&DisruptionType::Disruption], 1);
        assert_eq!(counts[&DisruptionType::Maintenance], 2);

        let empty = DisruptionsResponse::default().counts();
        assert_eq!(empty.len(), 3);
        assert!(empty.values().all(|&n| n == 0));
    }
}
