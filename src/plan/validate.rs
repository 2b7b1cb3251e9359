//! Plan validation - structural checks before handing off to the scheduler

use rustc_hash::FxHashSet;

use crate::error::{Result, ShiftError};
use crate::plan::{TransferGraph, TransferPlan};

/// Summary returned by [`validate_plan`] for operator-facing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanReport {
    pub nodes: usize,
    pub edges: usize,
    pub chains: usize,
    /// Step ids that appear more than once, in first-occurrence order.
    ///
    /// Duplicates are not an error here: the builder never de-duplicates,
    /// and the downstream orchestrator owns rejection. They are surfaced so
    /// operators see the conflict before deployment.
    pub duplicates: Vec<String>,
}

/// Validate a plan's structure: every edge endpoint must name a known step,
/// and the graph must be acyclic. Returns the report on success.
pub fn validate_plan(plan: &TransferPlan) -> Result<PlanReport> {
    let graph = TransferGraph::from_plan(plan);

    for edge in &plan.edges {
        for endpoint in [&edge.from, &edge.to] {
            if !graph.contains(endpoint) {
                return Err(ShiftError::UnknownStep {
                    from: edge.from.to_string(),
                    to: edge.to.to_string(),
                    unknown: endpoint.to_string(),
                });
            }
        }
    }

    graph.detect_cycles()?;

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut flagged: FxHashSet<&str> = FxHashSet::default();
    let mut duplicates = Vec::new();
    for step in &plan.steps {
        if !seen.insert(step.id.as_ref()) && flagged.insert(step.id.as_ref()) {
            duplicates.push(step.id.to_string());
        }
    }

    Ok(PlanReport {
        nodes: plan.steps.len(),
        edges: plan.edges.len(),
        chains: plan.chain_count(),
        duplicates,
    })
}
