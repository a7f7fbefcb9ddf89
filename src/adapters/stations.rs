//! Bike stations from the Digitransit routing GraphQL API.

use crate::domain::model::{Coordinate, Station};
use crate::domain::ports::{ConfigProvider, StationProvider};
use crate::utils::error::{Result, StationDataError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const STATIONS_QUERY: &str =
    "{ bikeRentalStations { name stationId bikesAvailable lat lon } }";
const SUBSCRIPTION_KEY_HEADER: &str = "digitransit-subscription-key";

#[derive(Debug, Clone)]
pub struct DigitransitStationProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl DigitransitStationProvider {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Ok(Self {
            client: super::http_client(config)?,
            endpoint: config.stations_endpoint().to_string(),
            api_key: config.stations_api_key().map(str::to_string),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<StationsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationsData {
    bike_rental_stations: Vec<BikeRentalStation>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BikeRentalStation {
    station_id: String,
    name: String,
    #[serde(default)]
    bikes_available: Option<u32>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl BikeRentalStation {
    /// `None` for stations without a usable position.
    fn into_station(self) -> Option<Station> {
        let coordinate = Coordinate::new(self.lat?, self.lon?).ok()?;
        Some(Station {
            id: self.station_id,
            name: self.name,
            bikes_available: self.bikes_available.unwrap_or(0),
            coordinate,
        })
    }
}

fn parse_stations(response: GraphQlResponse) -> std::result::Result<Vec<Station>, StationDataError> {
    let data = match response.data {
        Some(data) => data,
        None => {
            let message = if response.errors.is_empty() {
                "response contained no data".to_string()
            } else {
                response
                    .errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            return Err(StationDataError::Query { message });
        }
    };

    if !response.errors.is_empty() {
        tracing::warn!("Station query returned {} partial errors", response.errors.len());
    }

    let total = data.bike_rental_stations.len();
    let stations: Vec<Station> = data
        .bike_rental_stations
        .into_iter()
        .filter_map(|raw| {
            let id = raw.station_id.clone();
            let station = raw.into_station();
            if station.is_none() {
                tracing::warn!("Skipping station {} with invalid coordinates", id);
            }
            station
        })
        .collect();

    tracing::debug!("Parsed {} of {} stations", stations.len(), total);
    Ok(stations)
}

#[async_trait]
impl StationProvider for DigitransitStationProvider {
    async fn stations(&self) -> std::result::Result<Vec<Station>, StationDataError> {
        tracing::debug!("Querying bike stations from: {}", self.endpoint);

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "query": STATIONS_QUERY }));
        if let Some(key) = &self.api_key {
            request = request.header(SUBSCRIPTION_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(StationDataError::Network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(StationDataError::Status {
                status: status.as_u16(),
            });
        }

        let body: GraphQlResponse =
            response
                .json()
                .await
                .map_err(|e| StationDataError::ParseError {
                    message: e.to_string(),
                })?;

        parse_stations(body)
    }
}
