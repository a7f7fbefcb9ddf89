use crate::core::ranker;
use crate::core::resolver::AddressResolver;
use crate::domain::envelope::DeviceContext;
use crate::domain::model::{DomainOutcome, RankedStations};
use crate::domain::ports::{AddressProvider, Geocoder, StationProvider};
use crate::utils::error::{Result, SkillError};

/// Finds the nearest stations with bikes for a device.
pub struct NearestStationsQuery<A: AddressProvider, G: Geocoder, S: StationProvider> {
    resolver: AddressResolver<A, G>,
    station_provider: S,
}

impl<A: AddressProvider, G: Geocoder, S: StationProvider> NearestStationsQuery<A, G, S> {
    pub fn new(resolver: AddressResolver<A, G>, station_provider: S) -> Self {
        Self {
            resolver,
            station_provider,
        }
    }

    #[cfg(test)]
    pub(crate) fn resolver(&self) -> &AddressResolver<A, G> {
        &self.resolver
    }

    /// At most `limit` stations, nearest first. No station with bikes is
    /// still a success with an empty list.
    pub async fn query(
        &self,
        limit: usize,
        device: &DeviceContext,
    ) -> Result<DomainOutcome<RankedStations>> {
        if limit == 0 {
            return Err(SkillError::InvalidRequest {
                message: "station limit must be positive".to_string(),
            });
        }

        let origin = match self.resolver.resolve(device).await? {
            DomainOutcome::Success(origin) => origin,
            DomainOutcome::PermissionDenied => return Ok(DomainOutcome::PermissionDenied),
            DomainOutcome::TransientError => return Ok(DomainOutcome::TransientError),
        };

        let stations = match self.station_provider.stations().await {
            Ok(stations) => stations,
            Err(e) => {
                tracing::warn!("Fetching bike stations failed: {}", e);
                return Ok(DomainOutcome::TransientError);
            }
        };
        tracing::debug!("Fetched {} bike stations", stations.len());

        let nearest = ranker::rank(&stations, origin).truncate(limit);
        Ok(DomainOutcome::Success(nearest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{
        device, station, AddressReply, FakeAddressProvider, FakeGeocoder, FakeStationProvider,
    };

    fn query_with(
        address: FakeAddressProvider,
        stations: FakeStationProvider,
    ) -> NearestStationsQuery<FakeAddressProvider, FakeGeocoder, FakeStationProvider> {
        NearestStationsQuery::new(
            AddressResolver::new(address, FakeGeocoder::at(60.1699, 24.9384)),
            stations,
        )
    }

    fn helsinki_stations() -> Vec<crate::domain::model::Station> {
        vec![
            station("001", "Kaivopuisto", 4, 60.1560, 24.9560),
            station("002", "Kamppi", 2, 60.1690, 24.9330),
            station("003", "Rautatientori", 0, 60.1700, 24.9390),
            station("004", "Kiasma", 6, 60.1740, 24.9370),
            station("005", "Hakaniemi", 1, 60.1790, 24.9510),
        ]
    }

    #[tokio::test]
    async fn test_query_returns_at_most_limit() {
        let query = query_with(
            FakeAddressProvider::helsinki(),
            FakeStationProvider::with(helsinki_stations()),
        );

        let outcome = query.query(3, &device()).await.unwrap();

        let stations = match outcome {
            DomainOutcome::Success(stations) => stations,
            other => panic!("expected success, got {:?}", other),
        };
        let names: Vec<&str> = stations.iter().map(|s| s.station.name.as_str()).collect();
        assert_eq!(names, vec!["Kamppi", "Kiasma", "Hakaniemi"]);
    }

    #[tokio::test]
    async fn test_query_fewer_than_limit() {
        let query = query_with(
            FakeAddressProvider::helsinki(),
            FakeStationProvider::with(vec![station("002", "Kamppi", 2, 60.1690, 24.9330)]),
        );

        let outcome = query.query(3, &device()).await.unwrap();
        assert!(matches!(outcome, DomainOutcome::Success(ref s) if s.len() == 1));
    }

    #[tokio::test]
    async fn test_query_no_bikes_is_empty_success() {
        let query = query_with(
            FakeAddressProvider::helsinki(),
            FakeStationProvider::with(vec![station("003", "Rautatientori", 0, 60.1700, 24.9390)]),
        );

        let outcome = query.query(3, &device()).await.unwrap();
        assert_eq!(outcome, DomainOutcome::Success(RankedStations::default()));
    }

    #[tokio::test]
    async fn test_query_propagates_permission_denied() {
        let query = query_with(
            FakeAddressProvider::new(AddressReply::Forbidden),
            FakeStationProvider::with(helsinki_stations()),
        );

        let outcome = query.query(3, &device()).await.unwrap();
        assert_eq!(outcome, DomainOutcome::PermissionDenied);
    }

    #[tokio::test]
    async fn test_query_station_failure_is_transient() {
        let query = query_with(
            FakeAddressProvider::helsinki(),
            FakeStationProvider::unavailable(),
        );

        let outcome = query.query(3, &device()).await.unwrap();
        assert_eq!(outcome, DomainOutcome::TransientError);
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected() {
        let query = query_with(
            FakeAddressProvider::helsinki(),
            FakeStationProvider::with(helsinki_stations()),
        );

        assert!(query.query(0, &device()).await.is_err());
    }
}
