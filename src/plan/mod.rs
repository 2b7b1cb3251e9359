//! Plan Module - transfer plan construction (nodes + edges)
//!
//! Contains the plan representation and its construction:
//! - `step`: TransferStep nodes and id derivation
//! - `graph`: TransferGraph built from plan edges
//! - `validate`: structural checks before deployment
//! - `manifest`: YAML/JSON emission
//!
//! The plan is immutable after construction and rebuilt in full on every
//! invocation; all scheduling, retries, and execution belong to the
//! external orchestrator that consumes the manifest.

pub mod graph;
pub mod manifest;
pub mod step;
pub mod validate;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::table_list::TablePair;

pub use graph::{TransferGraph, END_NODE, START_NODE};
pub use manifest::render;
pub use step::{StepKind, TransferStep};
pub use validate::{validate_plan, PlanReport};

/// Default plan name, overridable with `--name`
pub const DEFAULT_PLAN_NAME: &str = "bq_copy_across_locations";

/// Explicit inputs to plan construction.
///
/// These were ambient variable-store lookups in earlier tooling; they are
/// plain parameters here so a plan build has no hidden load-time coupling.
#[derive(Debug, Clone)]
pub struct PlanParams {
    pub name: String,
    pub source_bucket: String,
    pub dest_bucket: String,
}

/// Declarative defaults carried in the manifest for the orchestrator.
///
/// Data only: retry counts and alerting switches are interpreted by the
/// scheduler, never by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorDefaults {
    pub owner: String,
    pub depends_on_past: bool,
    pub email_on_failure: bool,
    pub email_on_retry: bool,
    pub retries: u32,
    pub retry_delay_secs: u64,
    pub schedule: Option<String>,
}

impl Default for OrchestratorDefaults {
    fn default() -> Self {
        Self {
            owner: "etl".to_string(),
            depends_on_past: false,
            email_on_failure: false,
            email_on_retry: false,
            retries: 1,
            retry_delay_secs: 300,
            schedule: None,
        }
    }
}

/// Directed edge between two plan nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: Arc<str>,
    pub to: Arc<str>,
}

impl Edge {
    fn new(from: &Arc<str>, to: &Arc<str>) -> Self {
        Self {
            from: Arc::clone(from),
            to: Arc::clone(to),
        }
    }
}

/// The serializable transfer plan handed to the external orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferPlan {
    pub name: String,
    pub defaults: OrchestratorDefaults,
    pub steps: Vec<TransferStep>,
    pub edges: Vec<Edge>,
}

impl TransferPlan {
    /// Number of export→relocate→import chains (excludes sentinels)
    pub fn chain_count(&self) -> usize {
        self.steps.len().saturating_sub(2) / 3
    }
}

/// Build a transfer plan from parsed table pairs.
///
/// Each pair becomes a `start → export → relocate → import → end` chain;
/// chains are wired in input order and stay mutually independent so the
/// orchestrator can run them in parallel. Duplicate table ids yield
/// duplicate step ids on purpose: the orchestrator's validation layer owns
/// rejection, and collapsing them here would hide the conflict.
pub fn build_plan(pairs: &[TablePair], params: &PlanParams) -> TransferPlan {
    let mut steps: Vec<TransferStep> = Vec::with_capacity(pairs.len() * 3 + 2);
    let mut edges: Vec<Edge> = Vec::with_capacity(pairs.len() * 4);

    let start = TransferStep::marker(START_NODE);
    let end = TransferStep::marker(END_NODE);
    let start_id = Arc::clone(&start.id);
    let end_id = Arc::clone(&end.id);
    steps.push(start);
    steps.push(end);

    for pair in pairs {
        info!(
            source_table = %pair.source_table,
            dest_table = %pair.dest_table,
            "generating transfer chain"
        );

        let export = TransferStep::export(pair, &params.source_bucket);
        let relocate = TransferStep::relocate(pair, &params.source_bucket, &params.dest_bucket);
        let import = TransferStep::import(pair, &params.dest_bucket);

        edges.push(Edge::new(&start_id, &export.id));
        edges.push(Edge::new(&export.id, &relocate.id));
        edges.push(Edge::new(&relocate.id, &import.id));
        edges.push(Edge::new(&import.id, &end_id));

        steps.push(export);
        steps.push(relocate);
        steps.push(import);
    }

    if pairs.is_empty() {
        // Keep the sentinels connected so the plan stays runnable
        edges.push(Edge::new(&start_id, &end_id));
    }

    TransferPlan {
        name: params.name.clone(),
        defaults: OrchestratorDefaults::default(),
        steps,
        edges,
    }
}
