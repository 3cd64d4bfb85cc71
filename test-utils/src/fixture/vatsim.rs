//! VATSIM API payloads.

use chrono::{Duration, Utc};
use serde_json::{json, Value};

/// Member record as returned by `v2/members/{cid}`.
///
/// The name is split into `name_first`/`name_last` ("Jane" "Doe").
pub fn member_json(cid: u64, rating: i32, pilotrating: i32) -> Value {
    json!({
        "id": cid,
        "rating": rating,
        "pilotrating": pilotrating,
        "militaryrating": 0,
        "susp_date": null,
        "reg_date": "2015-03-14T09:26:53",
        "region_id": "AMAS",
        "division_id": "USA",
        "subdivision_id": null,
        "lastratingchange": "2021-06-01T18:00:00",
        "name_first": "Jane",
        "name_last": "Doe",
    })
}

/// Pilot statistics as returned by `v2/members/{cid}/stats`.
pub fn pilot_stats_json(pilot_minutes: f64) -> Value {
    json!({
        "id": 1234567,
        "atc": 0.0,
        "pilot": pilot_minutes / 60.0,
        "pilot_minutes": pilot_minutes,
    })
}

/// Discord account link as returned by `v2/members/discord/{discord_id}`.
///
/// The CID is sent as a string.
pub fn discord_link_json(discord_id: u64, cid: u64) -> Value {
    json!({
        "id": discord_id.to_string(),
        "user_id": cid.to_string(),
    })
}

/// Pilot entry of the v3 data feed, flying KATL to KJFK.
///
/// Logged on 95 minutes before the current time.
pub fn pilot_json(cid: u64, callsign: &str) -> Value {
    let logon_time = Utc::now() - Duration::minutes(95);

    json!({
        "cid": cid,
        "name": "Jane Doe KATL",
        "callsign": callsign,
        "server": "USA-EAST",
        "pilot_rating": 1,
        "military_rating": 0,
        "latitude": 35.12345,
        "longitude": -80.98765,
        "altitude": 35000,
        "groundspeed": 460,
        "transponder": "2317",
        "heading": 42,
        "qnh_i_hg": 29.92,
        "qnh_mb": 1013,
        "logon_time": logon_time.to_rfc3339(),
        "last_updated": Utc::now().to_rfc3339(),
        "flight_plan": {
            "flight_rules": "I",
            "aircraft": "B739/L-SDE3FGHIRWY/LB1",
            "aircraft_faa": "H/B739/L",
            "aircraft_short": "B739",
            "departure": "KATL",
            "arrival": "KJFK",
            "alternate": "KBOS",
            "cruise_tas": "450",
            "altitude": "35000",
            "deptime": "1800",
            "enroute_time": "0205",
            "fuel_time": "0330",
            "remarks": "/V/",
            "route": "DALAS2 SPA J48 MOL FLASK OOD J42 RBV LENDY6",
            "revision_id": 1,
            "assigned_transponder": "2317",
        },
    })
}
