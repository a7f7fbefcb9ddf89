use crate::domain::envelope::DeviceContext;
use crate::domain::model::{Coordinate, DomainOutcome};
use crate::domain::ports::{AddressProvider, Geocoder};
use crate::utils::error::{DeviceAddressError, Result};

/// Turns a device into a coordinate: address lookup, then geocoding.
pub struct AddressResolver<A: AddressProvider, G: Geocoder> {
    address_provider: A,
    geocoder: G,
}

impl<A: AddressProvider, G: Geocoder> AddressResolver<A, G> {
    pub fn new(address_provider: A, geocoder: G) -> Self {
        Self {
            address_provider,
            geocoder,
        }
    }

    #[cfg(test)]
    pub(crate) fn address_provider(&self) -> &A {
        &self.address_provider
    }

    /// Permission and upstream failures come back as outcomes. A response
    /// body that cannot be read at all is returned as an error.
    pub async fn resolve(&self, device: &DeviceContext) -> Result<DomainOutcome<Coordinate>> {
        let address = match self.address_provider.device_address(device).await {
            Ok(address) => address,
            Err(DeviceAddressError::PermissionDenied) => {
                tracing::info!("🔒 Device address permission not granted");
                return Ok(DomainOutcome::PermissionDenied);
            }
            Err(e @ (DeviceAddressError::Status { .. } | DeviceAddressError::Network(_))) => {
                tracing::warn!("Device address lookup failed: {}", e);
                return Ok(DomainOutcome::TransientError);
            }
            Err(e @ DeviceAddressError::Malformed { .. }) => return Err(e.into()),
        };

        let Some(query) = address.to_query() else {
            tracing::warn!("Device address has neither street nor city, cannot locate device");
            return Ok(DomainOutcome::TransientError);
        };
        tracing::debug!("Geocoding device address: {}", query);

        match self.geocoder.geocode(&query).await {
            Ok(location) => {
                tracing::debug!("Device located at {}", location);
                Ok(DomainOutcome::Success(location))
            }
            // 找不到地址和服務失敗目前都視為暫時性錯誤
            Err(e) => {
                tracing::warn!("Geocoding failed: {}", e);
                Ok(DomainOutcome::TransientError)
            }
        }
    }
}
