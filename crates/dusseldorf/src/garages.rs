use crate::{client::Request, model::Garage, response, ApiError, OdpDusseldorf};

pub const GARAGES_RESOURCE_ID: &str = "53d63e70-0ed4-4175-9924-c45530d5bf29";

impl OdpDusseldorf {
    /// Fetch at most `limit` garages.
    pub async fn garages(&self, limit: u32) -> Result<Vec<Garage>, ApiError> {
        let body = self
            .request(
                Request::get(crate::SEARCH_URI)
                    .param("resource_id", GARAGES_RESOURCE_ID)
                    .param("limit", limit),
            )
            .await?;

        let garages = response::records(body)?;
        log::info!("fetched {} garages", garages.len());
        Ok(garages)
    }
}
