//! Route command handler: multi-waypoint priority-ordered routing.

use std::path::Path;

use anyhow::{Context, Result};

use careroute_lib::{
    plan_route, Error as LibError, RouteRequest, RouteSummary,
};

use crate::commands::{format_unknown_facility_message, load_network, WeightArg};
use crate::output::OutputFormat;

pub fn run(
    nodes: &Path,
    edges: &Path,
    format: OutputFormat,
    via: Vec<String>,
    weight: WeightArg,
    max_expansions: Option<usize>,
) -> Result<()> {
    let network = load_network(nodes, edges)?;

    let request = RouteRequest {
        waypoints: via,
        options: weight.to_options(max_expansions),
    };

    let plan = match plan_route(&network, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(err)),
    };

    let summary = RouteSummary::from_plan(&network, &plan);
    match format {
        OutputFormat::Text => print!("{}", summary.render_plain()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .context("failed to serialise route summary")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn handle_route_failure(err: LibError) -> anyhow::Error {
    match err {
        LibError::UnknownFacility { name, suggestions } => {
            anyhow::anyhow!(format_unknown_facility_message(&name, &suggestions))
        }
        LibError::LegFailed {
            leg,
            from,
            to,
            source,
        } => anyhow::anyhow!(
            "No route for leg {} ({} -> {}): {}. The facilities may lie in disconnected parts of the road network.",
            leg,
            from,
            to,
            source
        ),
        other => anyhow::Error::new(other),
    }
}
