// Adapters layer: HTTP implementations of the domain ports.

pub mod device_address;
pub mod geocoding;
pub mod stations;

pub use device_address::HttpAddressProvider;
pub use geocoding::NominatimGeocoder;
pub use stations::DigitransitStationProvider;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use std::time::Duration;

/// Client shared by the adapters: configured user agent and request timeout.
pub(crate) fn http_client<C: ConfigProvider + ?Sized>(config: &C) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs()))
        .user_agent(config.user_agent())
        .build()?;
    Ok(client)
}
