//! Domain models for data fetched from the VATSIM API and data feed.
//!
//! None of these are cached; every role sync and every flight status lookup
//! fetches them fresh.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::server::util::parse::deserialize_u64_from_string_or_number;

/// ATC rating code of an Observer. Ratings above this one are controller ratings.
pub const OBSERVER_RATING: i32 = 1;

/// Response of the Discord account link lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordLink {
    /// VATSIM CID linked to the Discord account
    #[serde(deserialize_with = "deserialize_u64_from_string_or_number")]
    pub user_id: u64,
}

/// A VATSIM member record.
///
/// The member endpoint returns the CID as `id`; the display name is either a single
/// `name` field or split into `name_first`/`name_last` depending on the API scope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemberData {
    #[serde(alias = "id", deserialize_with = "deserialize_u64_from_string_or_number")]
    pub cid: u64,
    /// ATC rating code
    pub rating: i32,
    /// Pilot rating code
    #[serde(default)]
    pub pilotrating: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_first: Option<String>,
    #[serde(default)]
    pub name_last: Option<String>,
}

impl MemberData {
    /// Display name of the member, if the API exposed one.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return Some(name.trim().to_string());
        }

        let parts: Vec<&str> = [self.name_first.as_deref(), self.name_last.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Pilot statistics of a member.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PilotStats {
    /// Total logged pilot time in minutes
    #[serde(alias = "pilotMinutes", default)]
    pub pilot_minutes: f64,
}

impl PilotStats {
    pub fn from_minutes(pilot_minutes: f64) -> Self {
        Self { pilot_minutes }
    }

    /// Total logged pilot time in hours.
    pub fn total_hours(&self) -> f64 {
        self.pilot_minutes / 60.0
    }
}

/// The subset of the v3 data feed this bot reads.
#[derive(Debug, Clone, Deserialize)]
pub struct VatsimDataFeed {
    #[serde(default)]
    pub pilots: Vec<Pilot>,
}

/// A pilot currently connected to the network.
#[derive(Debug, Clone, Deserialize)]
pub struct Pilot {
    pub cid: u64,
    #[serde(default)]
    pub name: String,
    pub callsign: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude in feet
    pub altitude: i64,
    /// Ground speed in knots
    pub groundspeed: i64,
    #[serde(default)]
    pub transponder: String,
    /// Heading in degrees
    pub heading: i64,
    pub logon_time: DateTime<Utc>,
    pub flight_plan: Option<FlightPlan>,
}

/// A filed flight plan. VATSIM sends empty strings for unset fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightPlan {
    #[serde(default)]
    pub aircraft_short: String,
    #[serde(default)]
    pub aircraft_faa: String,
    #[serde(default)]
    pub departure: String,
    #[serde(default)]
    pub arrival: String,
    /// Filed cruise altitude as written by the pilot
    #[serde(default)]
    pub altitude: String,
    #[serde(default)]
    pub route: String,
}

/// Short label of an ATC rating code.
pub fn atc_rating_label(rating: i32) -> &'static str {
    match rating {
        -1 => "INA",
        0 => "SUS",
        1 => "OBS",
        2 => "S1",
        3 => "S2",
        4 => "S3",
        5 => "C1",
        6 => "C2",
        7 => "C3",
        8 => "I1",
        9 => "I2",
        10 => "I3",
        11 => "SUP",
        12 => "ADM",
        _ => "Unknown",
    }
}

/// Short label of a pilot rating code.
///
/// Pilot ratings are cumulative bit flags, so the known codes are 0, 1, 3, 7, ...
pub fn pilot_rating_label(pilotrating: i32) -> &'static str {
    match pilotrating {
        0 => "NEW",
        1 => "PPL",
        3 => "IR",
        7 => "CMEL",
        15 => "ATPL",
        31 => "FI",
        63 => "FE",
        _ => "Unknown",
    }
}
