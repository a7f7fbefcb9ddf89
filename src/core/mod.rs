pub mod conversation;
pub mod geo;
pub mod handler;
pub mod query;
pub mod ranker;
pub mod resolver;
pub mod response;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{Coordinate, DomainOutcome, RankedStations, Station};
pub use crate::domain::ports::{AddressProvider, ConfigProvider, Geocoder, StationProvider};
pub use crate::utils::error::Result;
