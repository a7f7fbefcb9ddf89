use crate::core::geo;
use crate::domain::model::{Coordinate, RankedStation, RankedStations, Station};

/// Ranks stations by distance from `origin`, nearest first, dropping the ones
/// without bikes. Equal distances keep their input order.
pub fn rank(stations: &[Station], origin: Coordinate) -> RankedStations {
    let mut ranked: Vec<RankedStation> = stations
        .iter()
        .map(|station| RankedStation {
            distance_meters: geo::distance(station.coordinate, origin),
            station: station.clone(),
        })
        .collect();

    // sort_by 是穩定排序
    ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    ranked.retain(|r| r.station.bikes_available > 0);

    tracing::debug!(
        "Ranked {} of {} stations with bikes available",
        ranked.len(),
        stations.len()
    );

    RankedStations::from_sorted(ranked)
}
