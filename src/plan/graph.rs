//! TransferGraph - DAG structure built from a transfer plan
//!
//! Uses Arc<str> node ids, FxHashMap adjacency and SmallVec edge lists,
//! with DFS three-color cycle detection.

use std::collections::VecDeque;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::error::ShiftError;
use crate::plan::TransferPlan;

/// Stack-allocated edge lists: sentinels aside, nodes have 0-1 edges
pub type DepVec = SmallVec<[Arc<str>; 4]>;

/// Identifier of the shared start sentinel
pub const START_NODE: &str = "start";

/// Identifier of the shared end sentinel
pub const END_NODE: &str = "end";

/// Graph of step dependencies built from plan edges.
pub struct TransferGraph {
    /// node_id -> successor node_ids
    adjacency: FxHashMap<Arc<str>, DepVec>,
    /// node_id -> predecessor node_ids
    predecessors: FxHashMap<Arc<str>, DepVec>,
    /// All node ids in plan order (duplicates collapsed)
    node_ids: Vec<Arc<str>>,
    /// Quick lookup for node existence
    node_set: FxHashSet<Arc<str>>,
}

impl TransferGraph {
    pub fn from_plan(plan: &TransferPlan) -> Self {
        let capacity = plan.steps.len();
        let mut adjacency: FxHashMap<Arc<str>, DepVec> =
            FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let mut predecessors: FxHashMap<Arc<str>, DepVec> =
            FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let mut node_ids: Vec<Arc<str>> = Vec::with_capacity(capacity);
        let mut node_set: FxHashSet<Arc<str>> =
            FxHashSet::with_capacity_and_hasher(capacity, Default::default());

        for step in &plan.steps {
            let id = Arc::clone(&step.id);
            if node_set.insert(Arc::clone(&id)) {
                node_ids.push(Arc::clone(&id));
                adjacency.insert(Arc::clone(&id), DepVec::new());
                predecessors.insert(id, DepVec::new());
            }
        }

        for edge in &plan.edges {
            let src = node_set
                .get(&edge.from)
                .cloned()
                .unwrap_or_else(|| Arc::clone(&edge.from));
            let tgt = node_set
                .get(&edge.to)
                .cloned()
                .unwrap_or_else(|| Arc::clone(&edge.to));

            adjacency
                .entry(Arc::clone(&src))
                .or_default()
                .push(Arc::clone(&tgt));
            predecessors.entry(tgt).or_default().push(src);
        }

        Self {
            adjacency,
            predecessors,
            node_ids,
            node_set,
        }
    }

    /// Get predecessors of a node
    #[inline]
    pub fn dependencies(&self, node_id: &str) -> &[Arc<str>] {
        static EMPTY: &[Arc<str>] = &[];
        self.predecessors
            .get(node_id)
            .map_or(EMPTY, SmallVec::as_slice)
    }

    /// Get successors of a node
    #[inline]
    pub fn successors(&self, node_id: &str) -> &[Arc<str>] {
        static EMPTY: &[Arc<str>] = &[];
        self.adjacency
            .get(node_id)
            .map_or(EMPTY, SmallVec::as_slice)
    }

    /// Check if a node exists
    #[inline]
    pub fn contains(&self, node_id: &str) -> bool {
        self.node_set.contains(node_id)
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Nodes with no successors (the end sentinel, in a well-formed plan)
    pub fn final_nodes(&self) -> Vec<Arc<str>> {
        self.node_ids
            .iter()
            .filter(|id| {
                self.adjacency
                    .get(id.as_ref())
                    .is_none_or(SmallVec::is_empty)
            })
            .cloned()
            .collect()
    }

    /// Check if there's a path from `from` to `to` (BFS)
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }

        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut queue: VecDeque<&str> = VecDeque::new();

        queue.push_back(from);
        visited.insert(from);

        while let Some(current) = queue.pop_front() {
            if let Some(neighbors) = self.adjacency.get(current) {
                for neighbor in neighbors {
                    if neighbor.as_ref() == to {
                        return true;
                    }
                    if !visited.contains(neighbor.as_ref()) {
                        visited.insert(neighbor.as_ref());
                        queue.push_back(neighbor.as_ref());
                    }
                }
            }
        }

        false
    }

    /// Detect cycles using DFS with three-color marking.
    ///
    /// White: unvisited. Gray: in the current DFS stack. Black: fully
    /// processed. A Gray neighbor means a cycle; the error carries the path.
    pub fn detect_cycles(&self) -> Result<(), ShiftError> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let mut colors: FxHashMap<Arc<str>, Color> = self
            .node_ids
            .iter()
            .map(|id| (Arc::clone(id), Color::White))
            .collect();
        let mut stack: Vec<Arc<str>> = Vec::new();

        fn dfs(
            node: Arc<str>,
            adjacency: &FxHashMap<Arc<str>, DepVec>,
            colors: &mut FxHashMap<Arc<str>, Color>,
            stack: &mut Vec<Arc<str>>,
        ) -> Result<(), String> {
            colors.insert(Arc::clone(&node), Color::Gray);
            stack.push(Arc::clone(&node));

            if let Some(neighbors) = adjacency.get(&node) {
                for neighbor in neighbors {
                    match colors.get(neighbor) {
                        Some(Color::Gray) => {
                            let cycle_start = stack
                                .iter()
                                .position(|x| x.as_ref() == neighbor.as_ref())
                                .unwrap_or(0);
                            let cycle: Vec<&str> =
                                stack[cycle_start..].iter().map(|s| s.as_ref()).collect();
                            return Err(format!("{} → {}", cycle.join(" → "), neighbor));
                        }
                        Some(Color::White) | None => {
                            dfs(Arc::clone(neighbor), adjacency, colors, stack)?;
                        }
                        Some(Color::Black) => {}
                    }
                }
            }

            stack.pop();
            colors.insert(node, Color::Black);
            Ok(())
        }

        for node_id in &self.node_ids {
            if colors.get(node_id) == Some(&Color::White) {
                if let Err(cycle) = dfs(
                    Arc::clone(node_id),
                    &self.adjacency,
                    &mut colors,
                    &mut stack,
                ) {
                    return Err(ShiftError::CycleDetected { cycle });
                }
            }
        }

        Ok(())
    }
}
