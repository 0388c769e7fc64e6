//! Single-pair shortest-path search over the road network.
//!
//! A* is the production path; Dijkstra is kept public as the brute-force
//! reference the equivalence tests compare against.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::GreatCircleEstimator;
use crate::graph::{NodeId, RoadNetwork};

/// Edge attribute used as the search cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeight {
    /// Road distance in meters.
    Distance,
    /// Derived traversal time in seconds.
    #[default]
    TravelTime,
}

impl EdgeWeight {
    /// Extract this weight from an adjacency entry.
    pub fn of(self, edge: &crate::graph::RoadEdge) -> f64 {
        match self {
            EdgeWeight::Distance => edge.distance_m,
            EdgeWeight::TravelTime => edge.travel_time_secs,
        }
    }
}

impl std::fmt::Display for EdgeWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            EdgeWeight::Distance => "distance",
            EdgeWeight::TravelTime => "travel_time",
        };
        f.write_str(value)
    }
}

/// Options applied to a single-pair search.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Edge attribute to minimise.
    pub weight: EdgeWeight,
    /// Abort after settling this many nodes. `None` leaves the search
    /// unbounded, which matches the reference behaviour.
    pub max_expansions: Option<usize>,
}

/// A computed path with its independently recomputed cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathFound {
    pub path: Vec<NodeId>,
    pub cost: f64,
}

/// Find the minimum-cost path between `start` and `goal` using A*.
///
/// The open set is a binary heap ordered by `f = g + h`, with the
/// great-circle estimator supplying `h` in the active weight's unit. Settled
/// nodes are final and never relaxed again. Among equal `f` values the
/// smaller node id pops first, keeping results deterministic.
///
/// The returned cost is recomputed from the path's edges via [`path_cost`]
/// rather than read back from the final `g`, so weight-selection mistakes
/// surface as a discrepancy under test.
pub fn find_path(
    network: &RoadNetwork,
    start: NodeId,
    goal: NodeId,
    options: &SearchOptions,
) -> Result<PathFound> {
    check_endpoints(network, start, goal)?;

    if start == goal {
        return Ok(PathFound {
            path: vec![start],
            cost: 0.0,
        });
    }

    let estimator = GreatCircleEstimator::new(network);

    let mut g_score: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut frontier = BinaryHeap::new();
    let mut expanded = 0usize;

    g_score.insert(start, 0.0);
    let h0 = estimator.estimate(start, goal, options.weight);
    frontier.push(FrontierEntry::new(start, 0.0, h0));

    while let Some(entry) = frontier.pop() {
        if settled.contains(&entry.node) {
            continue;
        }

        if entry.node == goal {
            let path = reconstruct_path(&parents, start, goal);
            let cost = path_cost(network, &path, options.weight)?;
            return Ok(PathFound { path, cost });
        }

        settled.insert(entry.node);
        expanded += 1;
        if let Some(budget) = options.max_expansions {
            if expanded > budget {
                return Err(Error::SearchBudgetExhausted {
                    start,
                    goal,
                    expanded,
                });
            }
        }

        let current_g = entry.cost.0;
        for edge in network.neighbours(entry.node) {
            let next = edge.target;
            if settled.contains(&next) {
                continue;
            }

            let tentative_g = current_g + options.weight.of(edge);
            if tentative_g < *g_score.get(&next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, entry.node);
                let h = estimator.estimate(next, goal, options.weight);
                frontier.push(FrontierEntry::new(next, tentative_g, h));
            }
        }
    }

    Err(Error::NoPath { start, goal })
}

/// Dijkstra reference with the same contract as [`find_path`], minus the
/// heuristic.
pub fn find_path_dijkstra(
    network: &RoadNetwork,
    start: NodeId,
    goal: NodeId,
    options: &SearchOptions,
) -> Result<PathFound> {
    check_endpoints(network, start, goal)?;

    if start == goal {
        return Ok(PathFound {
            path: vec![start],
            cost: 0.0,
        });
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut settled: HashSet<NodeId> = HashSet::new();
    let mut frontier = BinaryHeap::new();
    let mut expanded = 0usize;

    distances.insert(start, 0.0);
    frontier.push(FrontierEntry::new(start, 0.0, 0.0));

    while let Some(entry) = frontier.pop() {
        if settled.contains(&entry.node) {
            continue;
        }

        if entry.node == goal {
            let path = reconstruct_path(&parents, start, goal);
            let cost = path_cost(network, &path, options.weight)?;
            return Ok(PathFound { path, cost });
        }

        settled.insert(entry.node);
        expanded += 1;
        if let Some(budget) = options.max_expansions {
            if expanded > budget {
                return Err(Error::SearchBudgetExhausted {
                    start,
                    goal,
                    expanded,
                });
            }
        }

        let current = entry.cost.0;
        for edge in network.neighbours(entry.node) {
            let next = edge.target;
            if settled.contains(&next) {
                continue;
            }

            let tentative = current + options.weight.of(edge);
            if tentative < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, tentative);
                parents.insert(next, entry.node);
                frontier.push(FrontierEntry::new(next, tentative, 0.0));
            }
        }
    }

    Err(Error::NoPath { start, goal })
}

/// Sum the selected edge weight over consecutive path pairs.
///
/// Fails with [`Error::NoPath`] if a consecutive pair is not adjacent, which
/// would indicate a corrupted path.
pub fn path_cost(network: &RoadNetwork, path: &[NodeId], weight: EdgeWeight) -> Result<f64> {
    let mut total = 0.0;
    for pair in path.windows(2) {
        let edge = network
            .neighbours(pair[0])
            .iter()
            .find(|edge| edge.target == pair[1])
            .ok_or(Error::NoPath {
                start: pair[0],
                goal: pair[1],
            })?;
        total += weight.of(edge);
    }
    Ok(total)
}

fn check_endpoints(network: &RoadNetwork, start: NodeId, goal: NodeId) -> Result<()> {
    for node in [start, goal] {
        if !network.contains(node) {
            return Err(Error::UnknownNode { node });
        }
    }
    Ok(())
}

fn reconstruct_path(parents: &HashMap<NodeId, NodeId>, start: NodeId, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl FrontierEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap on f = g + h;
        // ties pop the smaller node id first.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
