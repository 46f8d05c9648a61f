use crate::{client::Request, model::DisabledParking, response, ApiError, OdpDusseldorf};

pub const WFS_URI: &str = "wfs";
pub const FEATURE_TYPE: &str = "verkehr:behindertenparkplatz";
pub const SPATIAL_REFERENCE: &str = "EPSG:4326";

impl OdpDusseldorf {
    /// Fetch all disabled parking spaces from the WFS geoservice.
    ///
    /// The service has no paging, the whole layer is returned.
    pub async fn disabled_parkings(&self) -> Result<Vec<DisabledParking>, ApiError> {
        let config = self.config();
        let body = self
            .request(
                Request::get(WFS_URI)
                    .host(&config.geoservice_host)
                    .path(&config.geoservice_path)
                    .param("request", "GetFeature")
                    .param("typeName", FEATURE_TYPE)
                    .param("outputFormat", "application/json")
                    .param("srsName", SPATIAL_REFERENCE),
            )
            .await?;

        let disabled_parkings = response::features(body)?;
        log::info!("fetched {} disabled parkings", disabled_parkings.len());
        Ok(disabled_parkings)
    }
}
