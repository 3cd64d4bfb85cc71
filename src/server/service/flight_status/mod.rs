//! Flight status service.
//!
//! Looks a CID up in the live data feed and formats the pilot's state into a
//! `FlightReport`. Rendering the report as a Discord embed lives in `builder`.

pub mod builder;

use chrono::{DateTime, Utc};

use crate::server::{
    data::vatsim::VatsimApi,
    error::vatsim::VatsimError,
    model::{
        flight::{FlightReport, FlightStatus, ReportField},
        vatsim::Pilot,
    },
    util::text::{format_thousands, truncate_with_ellipsis},
};

/// Longest filed route shown before it is cut off.
const MAX_ROUTE_CHARS: usize = 200;

pub struct FlightStatusService<'a> {
    vatsim: &'a dyn VatsimApi,
}

impl<'a> FlightStatusService<'a> {
    pub fn new(vatsim: &'a dyn VatsimApi) -> Self {
        Self { vatsim }
    }

    /// Fetches the current flight status of a CID.
    ///
    /// # Arguments
    /// - `cid` - VATSIM CID of the pilot
    /// - `now` - Reference time used to compute the flight time
    ///
    /// # Returns
    /// - `Ok(FlightStatus::Online)` - Pilot is connected
    /// - `Ok(FlightStatus::Offline)` - Pilot is not in the data feed
    /// - `Err(VatsimError::UpstreamUnavailable)` - Data feed could not be fetched
    pub async fn status(&self, cid: u64, now: DateTime<Utc>) -> Result<FlightStatus, VatsimError> {
        match self.vatsim.find_online_pilot(cid).await? {
            Some(pilot) => Ok(FlightStatus::Online(build_report(&pilot, now))),
            None => Ok(FlightStatus::Offline { cid }),
        }
    }
}

/// Formats a connected pilot into report fields.
pub fn build_report(pilot: &Pilot, now: DateTime<Utc>) -> FlightReport {
    let plan = pilot.flight_plan.as_ref();

    let route = match plan {
        Some(plan) => format!(
            "{} -> {}",
            non_empty_or(&plan.departure, "N/A"),
            non_empty_or(&plan.arrival, "N/A")
        ),
        None => "No flight plan filed".to_string(),
    };

    let aircraft = plan
        .and_then(|p| [&p.aircraft_short, &p.aircraft_faa].into_iter().find(|s| !s.is_empty()))
        .map(String::as_str)
        .unwrap_or("Unknown");

    let mut fields = vec![
        ReportField::new("Route", route, false),
        ReportField::new("Aircraft", aircraft, true),
        ReportField::new("Altitude", format!("{} ft", format_thousands(pilot.altitude)), true),
        ReportField::new("Ground Speed", format!("{} kts", pilot.groundspeed), true),
        ReportField::new("Heading", format!("{}°", pilot.heading), true),
        ReportField::new("Transponder", non_empty_or(&pilot.transponder, "N/A"), true),
        ReportField::new("Flight Time", format_flight_time(pilot.logon_time, now), true),
    ];

    if let Some(plan) = plan {
        if !plan.altitude.is_empty() {
            fields.push(ReportField::new("Filed Altitude", plan.altitude.as_str(), true));
        }
        if !plan.route.is_empty() {
            fields.push(ReportField::new(
                "Filed Route",
                truncate_with_ellipsis(&plan.route, MAX_ROUTE_CHARS),
                false,
            ));
        }
    }

    FlightReport {
        callsign: pilot.callsign.clone(),
        cid: pilot.cid,
        fields,
        footer: format!("Position: {:.4}, {:.4}", pilot.latitude, pilot.longitude),
    }
}

/// Elapsed time since logon as `{h}h {m}m`, truncated to whole minutes.
///
/// A logon time in the future (clock skew) reads as `0h 0m`.
pub fn format_flight_time(logon_time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - logon_time).num_minutes().max(0);

    format!("{}h {}m", elapsed / 60, elapsed % 60)
}

fn non_empty_or<'s>(value: &'s str, fallback: &'s str) -> &'s str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
