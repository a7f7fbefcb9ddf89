//! In-memory providers for unit tests.

use crate::domain::envelope::DeviceContext;
use crate::domain::model::{Coordinate, Station};
use crate::domain::ports::{AddressProvider, DeviceAddress, Geocoder, StationProvider};
use crate::utils::error::{DeviceAddressError, GeocodingError, StationDataError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub enum AddressReply {
    Found(DeviceAddress),
    Forbidden,
    Status(u16),
    Malformed,
}

pub struct FakeAddressProvider {
    reply: AddressReply,
    pub calls: AtomicUsize,
}

impl FakeAddressProvider {
    pub fn new(reply: AddressReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn helsinki() -> Self {
        Self::new(AddressReply::Found(DeviceAddress {
            address_line1: Some("Mannerheimintie 1".to_string()),
            city: Some("Helsinki".to_string()),
            country_code: Some("FI".to_string()),
        }))
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressProvider for FakeAddressProvider {
    async fn device_address(
        &self,
        _device: &DeviceContext,
    ) -> Result<DeviceAddress, DeviceAddressError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            AddressReply::Found(address) => Ok(address.clone()),
            AddressReply::Forbidden => Err(DeviceAddressError::PermissionDenied),
            AddressReply::Status(status) => Err(DeviceAddressError::Status { status: *status }),
            AddressReply::Malformed => Err(DeviceAddressError::Malformed {
                message: "expected value at line 1 column 1".to_string(),
            }),
        }
    }
}

/// Answers every query with the same coordinate, or "not found".
pub struct FakeGeocoder {
    location: Option<Coordinate>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            location: Coordinate::new(latitude, longitude).ok(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn not_found() -> Self {
        Self {
            location: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.location
            .ok_or_else(|| GeocodingError::NotFound(address.to_string()))
    }
}

pub struct FakeStationProvider {
    stations: Option<Vec<Station>>,
}

impl FakeStationProvider {
    pub fn with(stations: Vec<Station>) -> Self {
        Self {
            stations: Some(stations),
        }
    }

    pub fn unavailable() -> Self {
        Self { stations: None }
    }
}

#[async_trait]
impl StationProvider for FakeStationProvider {
    async fn stations(&self) -> Result<Vec<Station>, StationDataError> {
        self.stations
            .clone()
            .ok_or(StationDataError::Status { status: 503 })
    }
}

pub fn station(id: &str, name: &str, bikes: u32, latitude: f64, longitude: f64) -> Station {
    Station {
        id: id.to_string(),
        name: name.to_string(),
        bikes_available: bikes,
        coordinate: Coordinate::new(latitude, longitude).unwrap(),
    }
}

pub fn device() -> DeviceContext {
    DeviceContext {
        access_token: "token-123".to_string(),
        api_endpoint: "https://api.eu.amazonalexa.com".to_string(),
        device_id: "device-1".to_string(),
    }
}
