use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use utility::serde::{
    date_time::deserialize_local_date, number::deserialize_from_str_or_number,
    optional::deserialize_empty_as_none,
};

use super::ConversionError;

/// Prefix of every feature id of the `verkehr:behindertenparkplatz` layer.
pub const FEATURE_ID_PREFIX: &str = "behindertenparkplatz.";

/// Parking spaces reserved for disabled people, one feature of the WFS layer.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DisabledParkingFeature")]
pub struct DisabledParking {
    pub entry_id: String,
    /// number of spaces
    pub number: u32,
    pub address: String,
    pub district: String,
    pub time_limit: Option<String>,
    pub note: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub last_update: DateTime<Local>,
}

#[derive(Debug, Deserialize)]
struct DisabledParkingFeature {
    id: String,
    properties: Properties,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Properties {
    anzahl: String,
    adresse: String,
    stadtteil: String,
    #[serde(default, deserialize_with = "deserialize_empty_as_none")]
    zeitbegrenzung: Option<String>,
    #[serde(default, deserialize_with = "deserialize_empty_as_none")]
    beschreibung: Option<String>,
    #[serde(rename = "_last_update", deserialize_with = "deserialize_local_date")]
    last_update: DateTime<Local>,
}

/// GeoJSON point, `[longitude, latitude]` in EPSG:4326.
#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<Coordinate>,
}

#[derive(Debug, Deserialize)]
struct Coordinate(#[serde(deserialize_with = "deserialize_from_str_or_number")] f64);

/// Feature id without the layer prefix, `"behindertenparkplatz.42"` becomes `"42"`.
/// Ids without the prefix are returned unchanged.
pub fn strip_feature_prefix(raw: &str) -> &str {
    raw.strip_prefix(FEATURE_ID_PREFIX).unwrap_or(raw)
}

/// Number of spaces from values like `"05 Stellplätze"`.
///
/// Only the first two characters are read, so the value has to start with
/// the count padded to two digits (a single digit followed by a space works
/// too). Larger counts or a leading text fail.
pub fn parse_space_count(raw: &str) -> Result<u32, ConversionError> {
    let digits: String = raw.chars().take(2).collect();
    digits.trim().parse().map_err(|_| {
        ConversionError::new(
            "properties.anzahl",
            format!("expected a leading two digit count, got '{raw}'"),
        )
    })
}

impl TryFrom<DisabledParkingFeature> for DisabledParking {
    type Error = ConversionError;

    fn try_from(feature: DisabledParkingFeature) -> Result<Self, Self::Error> {
        let (longitude, latitude) = match feature.geometry.coordinates.as_slice() {
            [Coordinate(longitude), Coordinate(latitude), ..] => (*longitude, *latitude),
            _ => {
                return Err(ConversionError::new(
                    "geometry.coordinates",
                    "expected longitude and latitude",
                ))
            }
        };
        let properties = feature.properties;

        Ok(Self {
            entry_id: strip_feature_prefix(&feature.id).to_owned(),
            number: parse_space_count(&properties.anzahl)?,
            address: properties.adresse.trim().to_owned(),
            district: properties.stadtteil,
            time_limit: properties.zeitbegrenzung,
            note: properties.beschreibung,
            longitude,
            latitude,
            last_update: properties.last_update,
        })
    }
}
