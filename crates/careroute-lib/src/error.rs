use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the careroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a table source lacks columns the schema requires.
    #[error("{table} table missing required columns: {}. Available: {}", .missing.join(", "), .available.join(", "))]
    MissingColumns {
        table: &'static str,
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// Raised when a required cell in a table row cannot be parsed.
    #[error("invalid {table} row {row}: {message}")]
    InvalidRow {
        table: &'static str,
        row: u64,
        message: String,
    },

    /// Raised when a facility name could not be found in the network.
    #[error("unknown facility name: {name}{}", format_suggestions(.suggestions))]
    UnknownFacility {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a raw node identifier is absent from the network.
    #[error("unknown node: {node}")]
    UnknownNode { node: NodeId },

    /// Raised when no path connects two nodes.
    #[error("no path found between {start} and {goal}")]
    NoPath { start: NodeId, goal: NodeId },

    /// Raised when a bounded search gives up before settling the goal.
    #[error("search between {start} and {goal} exhausted its expansion budget after {expanded} expansions")]
    SearchBudgetExhausted {
        start: NodeId,
        goal: NodeId,
        expanded: usize,
    },

    /// Raised when one leg of a multi-waypoint route fails.
    #[error("route leg {leg} ({from} -> {to}) failed: {source}")]
    LegFailed {
        leg: usize,
        from: String,
        to: String,
        #[source]
        source: Box<Error>,
    },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
