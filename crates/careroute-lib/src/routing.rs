//! Multi-waypoint route sequencing.
//!
//! Waypoints are visited in descending priority-score order; each consecutive
//! pair becomes a leg searched independently over the shared read-only
//! network.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{NodeId, RoadNetwork};
use crate::search::{find_path, SearchOptions};

/// Number of fuzzy-match suggestions attached to unknown-facility errors.
const SUGGESTION_LIMIT: usize = 3;

/// A multi-waypoint routing request.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// Facility names to visit, in any order.
    pub waypoints: Vec<String>,
    /// Search options applied to every leg.
    pub options: SearchOptions,
}

/// One searched leg of a planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    /// 1-based position of this leg in the route.
    pub index: usize,
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
}

/// Planned multi-leg route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// Waypoint node ids in visiting order (priority score descending).
    pub waypoints: Vec<NodeId>,
    pub legs: Vec<RouteLeg>,
    /// Concatenated per-leg paths; shared boundary nodes appear once.
    pub path: Vec<NodeId>,
    pub total_cost: f64,
    pub weight: crate::search::EdgeWeight,
}

impl RoutePlan {
    /// Number of legs in the route.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }
}

/// Compute a priority-ordered route through the requested waypoints.
///
/// Waypoint names resolve to their first registered node id. The visiting
/// order sorts by priority score descending with a stable sort, so equal
/// scores keep their input order; waypoints whose node carries no score sort
/// after all scored ones, also in input order. Fewer than two waypoints
/// produce no legs, an empty path, and zero cost.
pub fn plan_route(network: &RoadNetwork, request: &RouteRequest) -> Result<RoutePlan> {
    let mut resolved: Vec<NodeId> = Vec::with_capacity(request.waypoints.len());
    for name in &request.waypoints {
        let id = network
            .facility_id_by_name(name)
            .ok_or_else(|| Error::UnknownFacility {
                name: name.clone(),
                suggestions: network.fuzzy_facility_matches(name, SUGGESTION_LIMIT),
            })?;
        resolved.push(id);
    }

    // Stable sort: unscored nodes order after every scored one.
    resolved.sort_by(|a, b| {
        let score = |id: &NodeId| network.facility(*id).and_then(|f| f.priority_score);
        match (score(a), score(b)) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });

    let mut legs = Vec::new();
    let mut path: Vec<NodeId> = Vec::new();
    let mut total_cost = 0.0;

    for (offset, pair) in resolved.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let leg_index = offset + 1;
        let found =
            find_path(network, from, to, &request.options).map_err(|source| Error::LegFailed {
                leg: leg_index,
                from: describe_node(network, from),
                to: describe_node(network, to),
                source: Box::new(source),
            })?;

        debug!(
            leg = leg_index,
            from,
            to,
            cost = found.cost,
            hops = found.path.len().saturating_sub(1),
            "leg searched"
        );

        let skip = usize::from(!path.is_empty());
        path.extend(found.path.iter().skip(skip));
        total_cost += found.cost;
        legs.push(RouteLeg {
            index: leg_index,
            from,
            to,
            cost: found.cost,
        });
    }

    Ok(RoutePlan {
        waypoints: resolved,
        legs,
        path,
        total_cost,
        weight: request.options.weight,
    })
}

fn describe_node(network: &RoadNetwork, node: NodeId) -> String {
    network
        .facility_name(node)
        .map(|name| name.to_string())
        .unwrap_or_else(|| node.to_string())
}
