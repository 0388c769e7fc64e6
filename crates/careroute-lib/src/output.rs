use std::fmt::Write;

use serde::Serialize;

use crate::graph::{NodeId, RoadNetwork};
use crate::routing::{RouteLeg, RoutePlan};
use crate::search::EdgeWeight;

/// A path node resolved for display: coordinates and facility attributes
/// attached where known, so a presentation layer can render markers and
/// polylines without touching the network again.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStop {
    pub id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_class: Option<i64>,
}

impl RouteStop {
    fn resolve(network: &RoadNetwork, id: NodeId) -> Self {
        let facility = network.facility(id);
        Self {
            id,
            name: facility.and_then(|f| f.name.clone()),
            city: facility.and_then(|f| f.city.clone()),
            latitude: facility.and_then(|f| f.position.map(|p| p.latitude)),
            longitude: facility.and_then(|f| f.position.map(|p| p.longitude)),
            priority_score: facility.and_then(|f| f.priority_score),
            priority_class: facility.and_then(|f| f.priority_class),
        }
    }

    fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("node {}", self.id))
    }
}

/// Structured representation of a planned route for serialisation and text
/// rendering.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub weight: EdgeWeight,
    pub waypoints: Vec<RouteStop>,
    pub legs: Vec<RouteLeg>,
    pub path: Vec<NodeId>,
    pub total_cost: f64,
}

impl RouteSummary {
    /// Resolve a [`RoutePlan`]'s node ids against the network.
    pub fn from_plan(network: &RoadNetwork, plan: &RoutePlan) -> Self {
        Self {
            weight: plan.weight,
            waypoints: plan
                .waypoints
                .iter()
                .map(|&id| RouteStop::resolve(network, id))
                .collect(),
            legs: plan.legs.clone(),
            path: plan.path.clone(),
            total_cost: plan.total_cost,
        }
    }

    /// Render the summary as plain text.
    ///
    /// Time-weighted totals report hours; distance-weighted totals report
    /// kilometers.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Visiting order:");
        for (position, stop) in self.waypoints.iter().enumerate() {
            let mut line = format!("{}. {}", position + 1, stop.display_name());
            if let Some(score) = stop.priority_score {
                let _ = write!(line, " (priority {score:.2}");
                if let Some(class) = stop.priority_class {
                    let _ = write!(line, ", class {class}");
                }
                line.push(')');
            }
            let _ = writeln!(out, "{line}");
        }

        if !self.legs.is_empty() {
            let _ = writeln!(out, "Legs:");
            for leg in &self.legs {
                let _ = writeln!(
                    out,
                    "  {}: {} -> {} ({})",
                    leg.index,
                    leg.from,
                    leg.to,
                    format_cost(leg.cost, self.weight)
                );
            }
        }

        let total = match self.weight {
            EdgeWeight::TravelTime => format!("Total time: {:.2} hours", self.total_cost / 3600.0),
            EdgeWeight::Distance => {
                format!("Total distance: {:.2} km", self.total_cost / 1000.0)
            }
        };
        let _ = writeln!(out, "{total}");
        out
    }
}

fn format_cost(cost: f64, weight: EdgeWeight) -> String {
    match weight {
        EdgeWeight::TravelTime => format!("{cost:.0} s"),
        EdgeWeight::Distance => format!("{cost:.0} m"),
    }
}
