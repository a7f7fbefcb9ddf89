use crate::domain::envelope::DeviceContext;
use crate::domain::model::{Coordinate, Station};
use crate::utils::error::{DeviceAddressError, GeocodingError, StationDataError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Postal address of a device as returned by the address API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAddress {
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl DeviceAddress {
    /// Free-text geocoding query: `"{line1}, {city} {country}"`, skipping
    /// whatever the device did not provide. `None` without a street or a
    /// city, since a country alone does not locate the device.
    pub fn to_query(&self) -> Option<String> {
        let non_empty = |part: &Option<String>| {
            part.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let line1 = non_empty(&self.address_line1);
        let city = non_empty(&self.city);
        if line1.is_none() && city.is_none() {
            return None;
        }

        let locality = [city, non_empty(&self.country_code)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        let query = [line1, Some(locality).filter(|s| !s.is_empty())]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        Some(query)
    }
}

#[async_trait]
pub trait AddressProvider: Send + Sync {
    async fn device_address(
        &self,
        device: &DeviceContext,
    ) -> Result<DeviceAddress, DeviceAddressError>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodingError>;
}

#[async_trait]
pub trait StationProvider: Send + Sync {
    async fn stations(&self) -> Result<Vec<Station>, StationDataError>;
}

pub trait ConfigProvider: Send + Sync {
    /// Application id every request must carry.
    fn application_id(&self) -> &str;
    fn stations_endpoint(&self) -> &str;
    fn stations_api_key(&self) -> Option<&str>;
    fn geocoder_endpoint(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn http_timeout_secs(&self) -> u64;
}

pub const DEFAULT_STATIONS_ENDPOINT: &str =
    "https://api.digitransit.fi/routing/v1/routers/hsl/index/graphql";
pub const DEFAULT_GEOCODER_ENDPOINT: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "citybike-skill/0.1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;
