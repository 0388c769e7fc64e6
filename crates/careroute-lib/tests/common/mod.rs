//! Shared fixture helpers for integration tests.

use std::io::Cursor;
use std::path::PathBuf;

use careroute_lib::{build_network, EdgeTable, NodeTable, RoadNetwork};

/// Path to the checked-in Missouri hospital node table.
#[allow(dead_code)]
pub fn fixture_nodes_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/mo_nodes.csv")
}

/// Path to the checked-in Missouri hospital edge table.
#[allow(dead_code)]
pub fn fixture_edges_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/mo_edges.csv")
}

/// Load the checked-in fixture network.
#[allow(dead_code)]
pub fn fixture_network() -> RoadNetwork {
    let nodes = NodeTable::from_path(&fixture_nodes_path()).expect("fixture nodes load");
    let edges = EdgeTable::from_path(&fixture_edges_path()).expect("fixture edges load");
    build_network(&nodes, &edges)
}

/// Build a network from inline CSV text.
#[allow(dead_code)]
pub fn network_from_csv(nodes_csv: &str, edges_csv: &str) -> RoadNetwork {
    let nodes = NodeTable::from_reader(Cursor::new(nodes_csv)).expect("inline nodes parse");
    let edges = EdgeTable::from_reader(Cursor::new(edges_csv)).expect("inline edges parse");
    build_network(&nodes, &edges)
}

/// Three scored facilities on a line: X (0.2) - Y (0.9) - Z (0.5).
///
/// Matches the waypoint-ordering scenario: sequencing [X, Y, Z] must visit
/// Y, Z, X.
#[allow(dead_code)]
pub fn scored_line_network() -> RoadNetwork {
    let nodes = "id,latitude,longitude,name,priority_score\n\
                 1,38.0,-92.0,X,0.2\n\
                 2,38.1,-92.0,Y,0.9\n\
                 3,38.2,-92.0,Z,0.5\n";
    let edges = "source,target,distance\n1,2,20000\n2,3,20000\n";
    network_from_csv(nodes, edges)
}
