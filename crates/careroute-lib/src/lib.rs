//! careroute library entry points.
//!
//! This crate loads facility node/edge tables, builds the in-memory road
//! network, and runs pathfinding and priority-ordered route sequencing over
//! it. Higher-level consumers (CLI, presentation layers) should only depend
//! on the functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod routing;
pub mod search;
pub mod tables;

pub use error::{Error, Result};
pub use geo::{haversine_meters, GeoPoint, GreatCircleEstimator};
pub use graph::{build_network, Facility, NodeId, RoadEdge, RoadNetwork};
pub use output::RouteSummary;
pub use routing::{plan_route, RouteLeg, RoutePlan, RouteRequest};
pub use search::{find_path, find_path_dijkstra, path_cost, EdgeWeight, PathFound, SearchOptions};
pub use tables::{load_tables, EdgeTable, NodeTable};
