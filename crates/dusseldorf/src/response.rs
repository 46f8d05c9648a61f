use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::ApiError;

/// `{"result": {"records": [...]}}` as returned by the datastore search.
#[derive(Debug, Deserialize)]
pub(crate) struct DatastoreResponse {
    pub result: DatastoreResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatastoreResult {
    pub records: Vec<Value>,
}

/// `{"features": [...]}` as returned by the WFS geoservice.
#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    pub features: Vec<Value>,
}

/// Convert every element in order; the first failure aborts the whole list.
pub(crate) fn convert_all<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, ApiError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|why| ApiError::conversion(index, why))
        })
        .collect()
}

pub(crate) fn records<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, ApiError> {
    let response: DatastoreResponse = serde_json::from_value(body)?;
    convert_all(response.result.records)
}

pub(crate) fn features<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, ApiError> {
    let collection: FeatureCollection = serde_json::from_value(body)?;
    convert_all(collection.features)
}
