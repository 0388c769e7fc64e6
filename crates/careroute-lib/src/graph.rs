use std::collections::HashMap;

use tracing::{debug, warn};

use crate::geo::GeoPoint;
use crate::tables::{EdgeTable, NodeTable};

/// Numeric identifier for a road-network node.
pub type NodeId = i64;

/// A node in the road network with its optional facility attributes.
///
/// Nodes that appear only as edge endpoints carry no position or attributes;
/// the topology still holds for them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Facility {
    pub id: NodeId,
    pub position: Option<GeoPoint>,
    pub priority_score: Option<f64>,
    pub priority_class: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
}

/// Weighted adjacency entry of the road network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadEdge {
    pub target: NodeId,
    pub distance_m: f64,
    pub travel_time_secs: f64,
}

/// In-memory road network: the session object shared by every query.
///
/// Built once per loaded dataset via [`build_network`] and read-only
/// afterwards; pathfinding and route sequencing borrow it immutably.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    facilities: HashMap<NodeId, Facility>,
    adjacency: HashMap<NodeId, Vec<RoadEdge>>,
    name_to_ids: HashMap<String, Vec<NodeId>>,
}

impl RoadNetwork {
    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, node: NodeId) -> &[RoadEdge] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a node exists in the network.
    pub fn contains(&self, node: NodeId) -> bool {
        self.facilities.contains_key(&node)
    }

    /// Lookup a facility record by node identifier.
    pub fn facility(&self, node: NodeId) -> Option<&Facility> {
        self.facilities.get(&node)
    }

    /// Iterate over every node identifier in the network.
    pub fn facility_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.facilities.keys().copied()
    }

    /// Lookup a node identifier by its case-sensitive facility name.
    ///
    /// When multiple nodes share a name, the first registered id (node-table
    /// row order) wins.
    pub fn facility_id_by_name(&self, name: &str) -> Option<NodeId> {
        self.name_to_ids
            .get(name)
            .and_then(|ids| ids.first())
            .copied()
    }

    /// Lookup a facility name by node identifier.
    pub fn facility_name(&self, node: NodeId) -> Option<&str> {
        self.facilities
            .get(&node)
            .and_then(|facility| facility.name.as_deref())
    }

    /// All known facility names, sorted.
    pub fn facility_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.name_to_ids.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Facility names similar to `name`, best match first.
    pub fn fuzzy_facility_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .name_to_ids
            .keys()
            .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate.as_str()))
            .filter(|(score, _)| *score >= 0.7)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    /// Number of nodes in the network.
    pub fn node_count(&self) -> usize {
        self.facilities.len()
    }

    /// Number of undirected edges in the network.
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.adjacency.values().map(Vec::len).sum();
        let self_loops: usize = self
            .adjacency
            .iter()
            .map(|(node, edges)| edges.iter().filter(|edge| edge.target == *node).count())
            .sum();
        (directed - self_loops) / 2 + self_loops
    }
}

/// Assemble the road network from parsed node and edge tables.
///
/// Node rows are deduplicated by id keeping the first occurrence; the number
/// of discarded duplicate rows is logged. Edges are inserted in both
/// directions; a repeated (u, v) pair overwrites the stored weights (last
/// write wins) and self-loops are retained. Edge endpoints without a node row
/// are synthesised as attribute-less nodes.
pub fn build_network(nodes: &NodeTable, edges: &EdgeTable) -> RoadNetwork {
    let mut facilities: HashMap<NodeId, Facility> = HashMap::new();
    let mut name_to_ids: HashMap<String, Vec<NodeId>> = HashMap::new();

    let mut duplicate_rows = 0usize;
    for row in &nodes.rows {
        if facilities.contains_key(&row.id) {
            duplicate_rows += 1;
            continue;
        }
        facilities.insert(
            row.id,
            Facility {
                id: row.id,
                position: Some(GeoPoint {
                    latitude: row.latitude,
                    longitude: row.longitude,
                }),
                priority_score: row.priority_score,
                priority_class: row.priority_class,
                name: row.name.clone(),
                address: row.address.clone(),
                city: row.city.clone(),
                category: row.category.clone(),
            },
        );
        if let Some(name) = &row.name {
            name_to_ids.entry(name.clone()).or_default().push(row.id);
        }
    }
    if duplicate_rows > 0 {
        warn!(duplicate_rows, "discarded duplicate node rows (keep-first)");
    }

    let mut adjacency: HashMap<NodeId, Vec<RoadEdge>> = HashMap::new();
    let mut synthesised = 0usize;
    for row in &edges.rows {
        for endpoint in [row.source, row.target] {
            if !facilities.contains_key(&endpoint) {
                facilities.insert(
                    endpoint,
                    Facility {
                        id: endpoint,
                        ..Facility::default()
                    },
                );
                synthesised += 1;
            }
        }

        insert_edge(&mut adjacency, row.source, row.target, row);
        if row.source != row.target {
            insert_edge(&mut adjacency, row.target, row.source, row);
        }
    }
    for &node in facilities.keys() {
        adjacency.entry(node).or_default();
    }
    if synthesised > 0 {
        debug!(synthesised, "synthesised nodes for endpoints without rows");
    }

    debug!(
        nodes = facilities.len(),
        edges = edges.rows.len(),
        names = name_to_ids.len(),
        "road network built"
    );

    RoadNetwork {
        facilities,
        adjacency,
        name_to_ids,
    }
}

fn insert_edge(
    adjacency: &mut HashMap<NodeId, Vec<RoadEdge>>,
    from: NodeId,
    to: NodeId,
    row: &crate::tables::EdgeRow,
) {
    let entry = adjacency.entry(from).or_default();
    if let Some(existing) = entry.iter_mut().find(|edge| edge.target == to) {
        existing.distance_m = row.distance_m;
        existing.travel_time_secs = row.travel_time_secs;
        return;
    }
    entry.push(RoadEdge {
        target: to,
        distance_m: row.distance_m,
        travel_time_secs: row.travel_time_secs,
    });
}
