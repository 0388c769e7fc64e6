//! Great-circle geometry and the A* heuristic.

use std::collections::HashMap;

use crate::graph::{NodeId, RoadNetwork};
use crate::search::EdgeWeight;
use crate::tables::{ASSUMED_SPEED_MPH, METERS_PER_MILE};

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Seconds needed to cover one meter at the assumed average road speed.
pub const SECS_PER_METER_AT_ASSUMED_SPEED: f64 =
    3600.0 / (ASSUMED_SPEED_MPH * METERS_PER_MILE);

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Great-circle (haversine) distance between two points in meters.
pub fn haversine_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Admissible A* heuristic backed by precomputed node coordinates.
///
/// Coordinates are converted to radians once at construction so search
/// expansions avoid repeated trigonometric conversion. Estimates are
/// expressed in the unit of the active edge weight: raw great-circle meters
/// for distance-weighted search, and meters scaled by
/// [`SECS_PER_METER_AT_ASSUMED_SPEED`] for time-weighted search. Because the
/// same fixed speed derives the edge travel times, the time estimate is an
/// exact lower bound and A* optimality holds for both weights.
#[derive(Debug, Clone)]
pub struct GreatCircleEstimator {
    radians: HashMap<NodeId, (f64, f64)>,
}

impl GreatCircleEstimator {
    /// Precompute radian coordinates for every positioned node.
    pub fn new(network: &RoadNetwork) -> Self {
        let radians = network
            .facility_ids()
            .filter_map(|id| {
                network.facility(id).and_then(|facility| {
                    facility.position.map(|pos| {
                        (id, (pos.latitude.to_radians(), pos.longitude.to_radians()))
                    })
                })
            })
            .collect();
        Self { radians }
    }

    /// Estimate the remaining cost from `from` to `to` in the given weight's
    /// unit. Nodes without a position estimate zero, which stays admissible.
    pub fn estimate(&self, from: NodeId, to: NodeId, weight: EdgeWeight) -> f64 {
        let (Some(&(lat_a, lon_a)), Some(&(lat_b, lon_b))) =
            (self.radians.get(&from), self.radians.get(&to))
        else {
            return 0.0;
        };

        let h = ((lat_b - lat_a) / 2.0).sin().powi(2)
            + lat_a.cos() * lat_b.cos() * ((lon_b - lon_a) / 2.0).sin().powi(2);
        let meters = 2.0 * EARTH_RADIUS_M * h.sqrt().asin();

        match weight {
            EdgeWeight::Distance => meters,
            EdgeWeight::TravelTime => meters * SECS_PER_METER_AT_ASSUMED_SPEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_network;
    use crate::tables::{EdgeTable, NodeTable};
    use std::io::Cursor;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    #[test]
    fn haversine_matches_known_distance() {
        // St. Louis to Kansas City, roughly 384 km great-circle.
        let stl = point(38.627, -90.199);
        let kc = point(39.099, -94.578);
        let d = haversine_meters(stl, kc);
        assert!((380_000.0..390_000.0).contains(&d), "got {d}");
    }

    #[test]
    fn haversine_of_identical_points_is_zero() {
        let p = point(38.5, -92.5);
        assert_eq!(haversine_meters(p, p), 0.0);
    }

    #[test]
    fn time_estimate_is_distance_estimate_at_assumed_speed() {
        let nodes = "id,latitude,longitude\n1,38.627,-90.199\n2,39.099,-94.578\n";
        let edges = "source,target,distance\n1,2,400000\n";
        let network = build_network(
            &NodeTable::from_reader(Cursor::new(nodes)).unwrap(),
            &EdgeTable::from_reader(Cursor::new(edges)).unwrap(),
        );
        let estimator = GreatCircleEstimator::new(&network);

        let meters = estimator.estimate(1, 2, EdgeWeight::Distance);
        let seconds = estimator.estimate(1, 2, EdgeWeight::TravelTime);
        assert!((seconds - meters * SECS_PER_METER_AT_ASSUMED_SPEED).abs() < 1e-9);
    }

    #[test]
    fn unpositioned_nodes_estimate_zero() {
        // Node 3 only appears as an edge endpoint, so it has no position.
        let nodes = "id,latitude,longitude\n1,38.6,-90.2\n";
        let edges = "source,target,distance\n1,3,1000\n";
        let network = build_network(
            &NodeTable::from_reader(Cursor::new(nodes)).unwrap(),
            &EdgeTable::from_reader(Cursor::new(edges)).unwrap(),
        );
        let estimator = GreatCircleEstimator::new(&network);
        assert_eq!(estimator.estimate(1, 3, EdgeWeight::Distance), 0.0);
    }
}
