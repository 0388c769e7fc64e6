pub mod facilities;
pub mod path;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use careroute_lib::{build_network, EdgeTable, EdgeWeight, NodeTable, RoadNetwork, SearchOptions};

/// Edge-weight choice exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WeightArg {
    /// Minimise derived travel time.
    #[default]
    Time,
    /// Minimise road distance.
    Distance,
}

impl WeightArg {
    pub fn to_options(self, max_expansions: Option<usize>) -> SearchOptions {
        SearchOptions {
            weight: match self {
                WeightArg::Time => EdgeWeight::TravelTime,
                WeightArg::Distance => EdgeWeight::Distance,
            },
            max_expansions,
        }
    }
}

/// Load both tables and assemble the session network.
pub fn load_network(nodes: &Path, edges: &Path) -> Result<RoadNetwork> {
    let node_table = NodeTable::from_path(nodes)
        .with_context(|| format!("failed to load node table from {}", nodes.display()))?;
    let edge_table = EdgeTable::from_path(edges)
        .with_context(|| format!("failed to load edge table from {}", edges.display()))?;
    Ok(build_network(&node_table, &edge_table))
}

/// Render an unknown-facility failure with its fuzzy suggestions.
pub fn format_unknown_facility_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown facility '{}'.", name);
    if !suggestions.is_empty() {
        let formatted = if suggestions.len() == 1 {
            format!("Did you mean '{}'?", suggestions[0])
        } else {
            let joined = suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Did you mean one of: {}?", joined)
        };
        message.push(' ');
        message.push_str(&formatted);
    }
    message
}
