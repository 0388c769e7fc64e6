mod common;

use common::{fixture_network, network_from_csv};

#[test]
fn fixture_network_loads_with_expected_shape() {
    let network = fixture_network();
    // Seven node rows plus the synthesised endpoint 99.
    assert_eq!(network.node_count(), 8);
    assert_eq!(network.edge_count(), 8);
    assert!(network.contains(99));
    assert!(network.facility(99).unwrap().position.is_none());
}

#[test]
fn duplicate_node_rows_keep_first() {
    let nodes = "id,latitude,longitude,name,priority_score\n\
                 1,38.0,-92.0,First,0.5\n\
                 1,39.0,-93.0,Second,0.9\n";
    let edges = "source,target,distance\n1,1,0\n";
    let network = network_from_csv(nodes, edges);

    let facility = network.facility(1).expect("node present");
    assert_eq!(facility.name.as_deref(), Some("First"));
    assert_eq!(facility.priority_score, Some(0.5));
    assert!(network.facility_id_by_name("Second").is_none());
}

#[test]
fn duplicate_edges_last_write_wins() {
    let nodes = "id,latitude,longitude\n1,38.0,-92.0\n2,38.1,-92.0\n";
    let edges = "source,target,distance\n1,2,20000\n2,1,30000\n";
    let network = network_from_csv(nodes, edges);

    let forward = network
        .neighbours(1)
        .iter()
        .find(|edge| edge.target == 2)
        .expect("edge kept");
    assert_eq!(forward.distance_m, 30000.0);
    let backward = network
        .neighbours(2)
        .iter()
        .find(|edge| edge.target == 1)
        .expect("reverse edge kept");
    assert_eq!(backward.distance_m, 30000.0);
    assert_eq!(network.neighbours(1).len(), 1);
}

#[test]
fn self_loops_are_retained() {
    let nodes = "id,latitude,longitude\n1,38.0,-92.0\n";
    let edges = "source,target,distance\n1,1,500\n";
    let network = network_from_csv(nodes, edges);

    let edges_of_1 = network.neighbours(1);
    assert_eq!(edges_of_1.len(), 1);
    assert_eq!(edges_of_1[0].target, 1);
    assert_eq!(network.edge_count(), 1);
}

#[test]
fn endpoint_only_nodes_are_synthesised_without_attributes() {
    let nodes = "id,latitude,longitude,name\n1,38.0,-92.0,Known\n";
    let edges = "source,target,distance\n1,42,1000\n";
    let network = network_from_csv(nodes, edges);

    let synthesised = network.facility(42).expect("endpoint present");
    assert!(synthesised.name.is_none());
    assert!(synthesised.position.is_none());
    assert!(synthesised.priority_score.is_none());
    assert_eq!(network.neighbours(42).len(), 1);
}

#[test]
fn repeated_builds_are_structurally_identical() {
    let first = fixture_network();
    let second = fixture_network();

    let mut first_ids: Vec<_> = first.facility_ids().collect();
    let mut second_ids: Vec<_> = second.facility_ids().collect();
    first_ids.sort_unstable();
    second_ids.sort_unstable();
    assert_eq!(first_ids, second_ids);

    for id in first_ids {
        let mut a: Vec<_> = first
            .neighbours(id)
            .iter()
            .map(|e| (e.target, e.distance_m.to_bits(), e.travel_time_secs.to_bits()))
            .collect();
        let mut b: Vec<_> = second
            .neighbours(id)
            .iter()
            .map(|e| (e.target, e.distance_m.to_bits(), e.travel_time_secs.to_bits()))
            .collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b, "adjacency differs for node {id}");
    }
}

#[test]
fn name_lookup_uses_first_registered_id() {
    let nodes = "id,latitude,longitude,name\n\
                 10,38.0,-92.0,Mercy\n\
                 11,38.5,-92.5,Mercy\n";
    let edges = "source,target,distance\n10,11,80000\n";
    let network = network_from_csv(nodes, edges);
    assert_eq!(network.facility_id_by_name("Mercy"), Some(10));
}

#[test]
fn fuzzy_matches_suggest_similar_names() {
    let network = fixture_network();
    let matches = network.fuzzy_facility_matches("Phelps Helth", 3);
    assert!(matches.contains(&"Phelps Health".to_string()));

    let none = network.fuzzy_facility_matches("zzzzzz", 3);
    assert!(none.is_empty());
}

#[test]
fn network_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<careroute_lib::RoadNetwork>();
}
