use serde::{Deserialize, Serialize};
use utility::serde::{
    number::{deserialize_from_str_or_number, deserialize_option_from_str_or_number},
    text::deserialize_string_or_number,
};

/// Length of the `"Düsseldorf-"` prefix in front of every neighbourhood.
pub const NEIGHBOURHOOD_PREFIX_LEN: usize = 11;

/// A park and ride facility, one record of the datastore search.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ParkAndRideRecord")]
pub struct ParkAndRide {
    pub entry_id: i64,
    pub name: String,
    /// street and house number
    pub address: String,
    /// city district number, 1 to 10
    pub district: Option<u32>,
    pub neighbourhood: Option<String>,
    /// lines stopping nearby, e.g. "U74, U75"
    pub public_transport: String,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Deserialize)]
struct ParkAndRideRecord {
    #[serde(deserialize_with = "deserialize_from_str_or_number")]
    entry_id: i64,
    name: String,
    strasse: String,
    #[serde(deserialize_with = "deserialize_string_or_number")]
    hausnummer: String,
    #[serde(default, deserialize_with = "deserialize_option_from_str_or_number")]
    stadtbezirk: Option<u32>,
    stadt: String,
    nahverkehr: String,
    #[serde(deserialize_with = "deserialize_from_str_or_number")]
    longitude: f64,
    #[serde(deserialize_with = "deserialize_from_str_or_number")]
    latitude: f64,
}

/// Street and house number joined by a single space, nothing else is touched.
pub fn compose_address(street: &str, number: &str) -> String {
    format!("{street} {number}")
}

/// Neighbourhood from a compound field like `"Düsseldorf-Heerdt"`.
///
/// Assumes every value starts with the 11 character `"Düsseldorf-"`; the
/// first 11 characters are removed without looking at them. `None` if
/// nothing is left.
pub fn strip_neighbourhood_prefix(raw: &str) -> Option<String> {
    let neighbourhood: String = raw.chars().skip(NEIGHBOURHOOD_PREFIX_LEN).collect();
    Some(neighbourhood).filter(|n| !n.is_empty())
}

impl From<ParkAndRideRecord> for ParkAndRide {
    fn from(record: ParkAndRideRecord) -> Self {
        Self {
            entry_id: record.entry_id,
            name: record.name,
            address: compose_address(&record.strasse, &record.hausnummer),
            district: record.stadtbezirk,
            neighbourhood: strip_neighbourhood_prefix(&record.stadt),
            public_transport: record.nahverkehr,
            longitude: record.longitude,
            latitude: record.latitude,
        }
    }
}
