use serde::{Deserialize, Serialize};
use utility::serde::number::deserialize_from_str_or_number;

/// A public parking garage, one record of the datastore search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garage {
    #[serde(deserialize_with = "deserialize_from_str_or_number")]
    pub entry_id: i64,

    pub name: String,

    /// street of the entrance
    #[serde(rename(deserialize = "adresse_zufahrt"))]
    pub address: String,

    /// part of town
    #[serde(rename(deserialize = "ort"))]
    pub location: String,

    #[serde(deserialize_with = "deserialize_from_str_or_number")]
    pub longitude: f64,

    #[serde(deserialize_with = "deserialize_from_str_or_number")]
    pub latitude: f64,
}
