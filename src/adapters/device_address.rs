use crate::domain::envelope::DeviceContext;
use crate::domain::ports::{AddressProvider, ConfigProvider, DeviceAddress};
use crate::utils::error::{DeviceAddressError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Device address API of the voice assistant platform. The endpoint and
/// token come with every request.
#[derive(Debug, Clone)]
pub struct HttpAddressProvider {
    client: Client,
}

impl HttpAddressProvider {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Ok(Self {
            client: super::http_client(config)?,
        })
    }
}

pub fn address_url(device: &DeviceContext) -> String {
    format!(
        "{}/v1/devices/{}/settings/address",
        device.api_endpoint.trim_end_matches('/'),
        device.device_id
    )
}

#[async_trait]
impl AddressProvider for HttpAddressProvider {
    async fn device_address(
        &self,
        device: &DeviceContext,
    ) -> std::result::Result<DeviceAddress, DeviceAddressError> {
        let url = address_url(device);
        tracing::debug!("Requesting device address from: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&device.access_token)
            .send()
            .await
            .map_err(DeviceAddressError::Network)?;

        let status = response.status();
        tracing::debug!("Device address response status: {}", status);

        if status == StatusCode::FORBIDDEN {
            return Err(DeviceAddressError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(DeviceAddressError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(DeviceAddressError::Network)?;
        serde_json::from_str(&body).map_err(|e| DeviceAddressError::Malformed {
            message: e.to_string(),
        })
    }
}
