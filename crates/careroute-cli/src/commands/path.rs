//! Path command handler: single-pair shortest path between two facilities.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use careroute_lib::{find_path, EdgeWeight, Error as LibError, RoadNetwork};

use crate::commands::{format_unknown_facility_message, load_network, WeightArg};
use crate::output::OutputFormat;

pub fn run(
    nodes: &Path,
    edges: &Path,
    format: OutputFormat,
    from: &str,
    to: &str,
    weight: WeightArg,
    max_expansions: Option<usize>,
) -> Result<()> {
    let network = load_network(nodes, edges)?;

    let start = resolve(&network, from)?;
    let goal = resolve(&network, to)?;

    let options = weight.to_options(max_expansions);
    let found = match find_path(&network, start, goal, &options) {
        Ok(found) => found,
        Err(LibError::NoPath { .. }) => {
            return Err(anyhow::anyhow!(
                "No path found between '{from}' and '{to}'. The facilities may lie in disconnected parts of the road network."
            ));
        }
        Err(other) => return Err(other.into()),
    };

    match format {
        OutputFormat::Text => {
            println!("Path:");
            for node in &found.path {
                match network.facility_name(*node) {
                    Some(name) => println!("- {} ({})", name, node),
                    None => println!("- {}", node),
                }
            }
            let cost = match options.weight {
                EdgeWeight::TravelTime => format!("{:.2} hours", found.cost / 3600.0),
                EdgeWeight::Distance => format!("{:.2} km", found.cost / 1000.0),
            };
            println!("Cost: {cost}");
        }
        OutputFormat::Json => {
            let payload = json!({
                "from": start,
                "to": goal,
                "weight": options.weight.to_string(),
                "path": found.path,
                "cost": found.cost,
            });
            let text =
                serde_json::to_string_pretty(&payload).context("failed to serialise path")?;
            println!("{text}");
        }
    }

    Ok(())
}

fn resolve(network: &RoadNetwork, name: &str) -> Result<careroute_lib::NodeId> {
    network.facility_id_by_name(name).ok_or_else(|| {
        anyhow::anyhow!(format_unknown_facility_message(
            name,
            &network.fuzzy_facility_matches(name, 3)
        ))
    })
}
