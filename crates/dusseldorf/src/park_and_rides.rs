use crate::{client::Request, model::ParkAndRide, response, ApiError, OdpDusseldorf};

pub const PARK_AND_RIDES_RESOURCE_ID: &str = "1fd5b3f3-ea03-4922-9fae-3577fbc9f78a";

impl OdpDusseldorf {
    /// Fetch at most `limit` park and ride facilities.
    pub async fn park_and_rides(&self, limit: u32) -> Result<Vec<ParkAndRide>, ApiError> {
        let body = self
            .request(
                Request::get(crate::SEARCH_URI)
                    .param("resource_id", PARK_AND_RIDES_RESOURCE_ID)
                    .param("limit", limit),
            )
            .await?;

        let park_and_rides = response::records(body)?;
        log::info!("fetched {} park and rides", park_and_rides.len());
        Ok(park_and_rides)
    }
}
