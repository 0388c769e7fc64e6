//! Tabular node/edge ingestion.
//!
//! This module reads the node and edge tables produced by the upstream data
//! pipeline. Column headers are normalised and matched against synonyms so
//! both the canonical schema (`id`, `source`, `priority_score`, ...) and the
//! raw export headers (`# index`, `# source`, `risk_score`, ...) load without
//! preprocessing.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::NodeId;

/// Meters per statute mile, matching the upstream pipeline's conversion.
pub const METERS_PER_MILE: f64 = 1609.0;

/// Constant average road speed assumed when deriving travel times.
pub const ASSUMED_SPEED_MPH: f64 = 50.0;

/// Derive the traversal time in seconds for an edge of the given length.
///
/// Assumes travel at a constant [`ASSUMED_SPEED_MPH`]. This is a deliberate
/// simplification, not a live-traffic estimate.
pub fn travel_time_secs(distance_m: f64) -> f64 {
    distance_m / METERS_PER_MILE / ASSUMED_SPEED_MPH * 3600.0
}

/// One row of the node table.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub id: NodeId,
    pub latitude: f64,
    pub longitude: f64,
    pub priority_score: Option<f64>,
    pub priority_class: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
}

/// One row of the edge table with its derived traversal time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRow {
    pub source: NodeId,
    pub target: NodeId,
    pub distance_m: f64,
    pub travel_time_secs: f64,
}

/// Parsed node table in source row order.
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    pub rows: Vec<NodeRow>,
}

/// Parsed edge table in source row order.
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    pub rows: Vec<EdgeRow>,
}

/// Load both tables from file paths.
pub fn load_tables(node_path: &Path, edge_path: &Path) -> Result<(NodeTable, EdgeTable)> {
    let nodes = NodeTable::from_path(node_path)?;
    let edges = EdgeTable::from_path(edge_path)?;
    Ok((nodes, edges))
}

impl NodeTable {
    /// Load the node table from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        debug!(rows = table.rows.len(), path = %path.display(), "loaded node table");
        Ok(table)
    }

    /// Load the node table from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        // Canonical field name -> accepted header synonyms (normalised).
        let synonyms: &[(&str, &[&str])] = &[
            ("id", &["id", "index", "node_id", "node"]),
            ("latitude", &["latitude", "lat"]),
            ("longitude", &["longitude", "lon", "lng"]),
            ("priority_score", &["priority_score", "risk_score", "score"]),
            ("priority_class", &["priority_class", "risk_class"]),
            ("name", &["name", "hospital_name", "facility_name"]),
            ("address", &["address", "street_address"]),
            ("city", &["city", "town"]),
            ("category", &["category", "hospital_subtype", "subtype"]),
        ];
        let required = ["id", "latitude", "longitude"];

        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let columns = ColumnMap::default().bind(&headers, synonyms, &required, "node")?;

        let mut rows = Vec::new();
        let mut row_num: u64 = 1; // header occupies line 1
        for result in csv_reader.records() {
            row_num += 1;
            let record = result?;

            let id = columns.required_parse::<NodeId>(&record, "id", row_num)?;
            let latitude = columns.required_parse::<f64>(&record, "latitude", row_num)?;
            let longitude = columns.required_parse::<f64>(&record, "longitude", row_num)?;

            rows.push(NodeRow {
                id,
                latitude,
                longitude,
                priority_score: columns.optional_parse(&record, "priority_score"),
                priority_class: columns.optional_parse(&record, "priority_class"),
                name: columns.optional_text(&record, "name"),
                address: columns.optional_text(&record, "address"),
                city: columns.optional_text(&record, "city"),
                category: columns.optional_text(&record, "category"),
            });
        }

        Ok(Self { rows })
    }
}

impl EdgeTable {
    /// Load the edge table from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        debug!(rows = table.rows.len(), path = %path.display(), "loaded edge table");
        Ok(table)
    }

    /// Load the edge table from a reader.
    ///
    /// Each row's `travel_time_secs` is derived at load time from the
    /// distance column via [`travel_time_secs`]. Distance values are not
    /// range-checked; upstream cleaning owns that.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let synonyms: &[(&str, &[&str])] = &[
            ("source", &["source", "from", "u"]),
            ("target", &["target", "to", "v"]),
            ("distance", &["distance", "distance_m", "length"]),
        ];
        let required = ["source", "target", "distance"];

        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let columns = ColumnMap::default().bind(&headers, synonyms, &required, "edge")?;

        let mut rows = Vec::new();
        let mut row_num: u64 = 1;
        for result in csv_reader.records() {
            row_num += 1;
            let record = result?;

            let source = columns.required_parse::<NodeId>(&record, "source", row_num)?;
            let target = columns.required_parse::<NodeId>(&record, "target", row_num)?;
            let distance_m = columns.required_parse::<f64>(&record, "distance", row_num)?;

            rows.push(EdgeRow {
                source,
                target,
                distance_m,
                travel_time_secs: travel_time_secs(distance_m),
            });
        }

        Ok(Self { rows })
    }
}

/// Resolved mapping from canonical column names to record indices.
#[derive(Debug, Default)]
struct ColumnMap {
    table: &'static str,
    indices: BTreeMap<&'static str, usize>,
}

impl ColumnMap {
    fn bind(
        mut self,
        headers: &StringRecord,
        synonyms: &[(&'static str, &[&str])],
        required: &[&str],
        table: &'static str,
    ) -> Result<Self> {
        self.table = table;
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

        for (canon, alts) in synonyms {
            'outer: for alt in *alts {
                let alt_n = normalize_header(alt);
                for (i, h) in normalized.iter().enumerate() {
                    if h == &alt_n {
                        self.indices.insert(*canon, i);
                        break 'outer;
                    }
                }
            }
        }

        let missing: Vec<String> = required
            .iter()
            .filter(|c| !self.indices.contains_key(**c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns {
                table,
                missing,
                available: headers.iter().map(|h| h.to_string()).collect(),
            });
        }

        Ok(self)
    }

    fn raw<'r>(&self, record: &'r StringRecord, field: &str) -> Option<&'r str> {
        self.indices.get(field).and_then(|&i| record.get(i))
    }

    fn required_parse<T: std::str::FromStr>(
        &self,
        record: &StringRecord,
        field: &'static str,
        row: u64,
    ) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        let raw = self.raw(record, field).ok_or_else(|| Error::InvalidRow {
            table: self.table,
            row,
            message: format!("missing value for column '{field}'"),
        })?;
        raw.parse::<T>().map_err(|e| Error::InvalidRow {
            table: self.table,
            row,
            message: format!("invalid {field} '{raw}': {e}"),
        })
    }

    fn optional_parse<T: std::str::FromStr>(
        &self,
        record: &StringRecord,
        field: &str,
    ) -> Option<T> {
        self.raw(record, field)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<T>().ok())
    }

    fn optional_text(&self, record: &StringRecord, field: &str) -> Option<String> {
        self.raw(record, field)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    }
}

/// Normalise a header cell for robust matching: lowercase, keep only
/// alphanumerics and underscores (drops `# `, whitespace, punctuation).
fn normalize_header(header: &str) -> String {
    header
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
