//! Facilities command handler: list known facility names with priority data.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::commands::load_network;
use crate::output::OutputFormat;

pub fn run(nodes: &Path, edges: &Path, format: OutputFormat) -> Result<()> {
    let network = load_network(nodes, edges)?;
    let names = network.facility_names();

    match format {
        OutputFormat::Text => {
            for name in &names {
                let facility = network
                    .facility_id_by_name(name)
                    .and_then(|id| network.facility(id));
                let mut line = name.to_string();
                if let Some(facility) = facility {
                    if let Some(score) = facility.priority_score {
                        line.push_str(&format!(" | priority {score:.2}"));
                    }
                    if let Some(class) = facility.priority_class {
                        line.push_str(&format!(" | class {class}"));
                    }
                    if let Some(city) = &facility.city {
                        line.push_str(&format!(" | {city}"));
                    }
                }
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = names
                .iter()
                .filter_map(|name| {
                    let id = network.facility_id_by_name(name)?;
                    let facility = network.facility(id)?;
                    Some(json!({
                        "id": id,
                        "name": name,
                        "priority_score": facility.priority_score,
                        "priority_class": facility.priority_class,
                        "city": facility.city,
                        "category": facility.category,
                    }))
                })
                .collect();
            let text = serde_json::to_string_pretty(&entries)
                .context("failed to serialise facility list")?;
            println!("{text}");
        }
    }

    Ok(())
}
