//! Transfer steps - the nodes of a transfer plan
//!
//! Each table pair expands into three steps (export, relocate, import)
//! whose parameters mirror what the downstream operators expect: AVRO
//! staging objects named `{table}-*.avro`, bucket-to-bucket object copy,
//! truncate-and-replace import with schema autodetection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::table_list::TablePair;

/// Export file format for staged table data
pub const EXPORT_FORMAT: &str = "AVRO";

/// Import write mode: replace the destination table contents
pub const WRITE_DISPOSITION: &str = "WRITE_TRUNCATE";

/// Derive a graph-safe node identifier from a table identifier.
///
/// Table ids use `project:dataset.table`; the colon is not a legal
/// task-name character downstream, so every colon becomes an underscore.
pub fn node_id(table: &str) -> String {
    table.replace(':', "_")
}

/// Operation kind plus its operator parameters.
///
/// Serialized with an internal `kind` tag so the manifest stays
/// self-describing for the downstream scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// No-op sentinel anchoring the independent chains
    Marker,

    /// Export a table into wildcard-named staging objects
    ExportToStorage {
        source_table: String,
        destination_uris: Vec<String>,
        export_format: String,
    },

    /// Copy staged objects between the two regional buckets
    RelocateObjects {
        source_bucket: String,
        source_object: String,
        destination_bucket: String,
    },

    /// Import staged objects into the destination table
    ImportFromStorage {
        bucket: String,
        source_objects: Vec<String>,
        destination_table: String,
        source_format: String,
        write_disposition: String,
        autodetect: bool,
    },
}

/// One node of the transfer plan. Created once per table pair (or sentinel),
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStep {
    pub id: Arc<str>,
    #[serde(flatten)]
    pub kind: StepKind,
}

impl TransferStep {
    pub fn marker(id: &str) -> Self {
        Self {
            id: Arc::from(id),
            kind: StepKind::Marker,
        }
    }

    pub fn export(pair: &TablePair, source_bucket: &str) -> Self {
        Self {
            id: Arc::from(format!("{}_export", node_id(&pair.source_table))),
            kind: StepKind::ExportToStorage {
                source_table: pair.source_table.clone(),
                destination_uris: vec![format!(
                    "gs://{}/{}-*.avro",
                    source_bucket, pair.source_table
                )],
                export_format: EXPORT_FORMAT.to_string(),
            },
        }
    }

    pub fn relocate(pair: &TablePair, source_bucket: &str, dest_bucket: &str) -> Self {
        Self {
            id: Arc::from(format!("{}_relocate", node_id(&pair.source_table))),
            kind: StepKind::RelocateObjects {
                source_bucket: source_bucket.to_string(),
                source_object: format!("{}-*.avro", pair.source_table),
                destination_bucket: dest_bucket.to_string(),
            },
        }
    }

    pub fn import(pair: &TablePair, dest_bucket: &str) -> Self {
        Self {
            id: Arc::from(format!("{}_import", node_id(&pair.dest_table))),
            kind: StepKind::ImportFromStorage {
                bucket: dest_bucket.to_string(),
                source_objects: vec![format!("{}-*.avro", pair.source_table)],
                destination_table: pair.dest_table.clone(),
                source_format: EXPORT_FORMAT.to_string(),
                write_disposition: WRITE_DISPOSITION.to_string(),
                autodetect: true,
            },
        }
    }
}
