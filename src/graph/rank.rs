// src/graph/rank.rs

//! Rank assignment for registered stages.
//!
//! Builds a directed graph over stage ids (producer -> consumer for every
//! shared label), rejects cycles, then layers stages by longest path from
//! the sources. After a pass, every consumer sits at least one rank above
//! every producer it shares a label with.

use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{FlowdagError, Result};
use crate::graph::adjacency::AdjacencyIndex;
use crate::graph::stage::Stage;
use crate::types::StageId;

/// Recompute every stage's priority from the current adjacency relation.
///
/// Priorities are written back only when the graph is acyclic; on a cycle the
/// stage map is left untouched and the offending stage is reported.
pub(crate) fn assign_ranks<W>(
    stages: &mut IndexMap<StageId, Stage<W>>,
    index: &AdjacencyIndex,
) -> Result<()> {
    // A stage consuming its own output is the smallest possible cycle;
    // catch it before the graph pass, which only sees distinct-node edges.
    for stage in stages.values() {
        if let Some(label) = stage.outputs.iter().find(|l| stage.inputs.contains(*l)) {
            return Err(FlowdagError::CyclicDependency {
                stage: stage.id,
                labels: vec![label.clone()],
            });
        }
    }

    let mut graph: DiGraphMap<StageId, ()> = DiGraphMap::new();

    for id in stages.keys() {
        graph.add_node(*id);
    }

    // Edge direction: producer -> consumer for every shared label.
    for stage in stages.values() {
        for label in &stage.outputs {
            for consumer in index.consumers(label) {
                if *consumer != stage.id {
                    graph.add_edge(stage.id, *consumer, ());
                }
            }
        }
    }

    let order = match toposort(&graph, None) {
        Ok(order) => order,
        Err(cycle) => {
            let id = cycle.node_id();
            let labels = stages
                .get(&id)
                .map(|s| s.inputs.iter().chain(&s.outputs).cloned().collect())
                .unwrap_or_default();
            return Err(FlowdagError::CyclicDependency { stage: id, labels });
        }
    };

    // Longest-path layering in topological order: a stage's rank is final by
    // the time it is visited, so one forward sweep drives each consumer to
    // max(rank, producer + 1). A neighbour reached through several shared
    // labels is visited once per label, which is idempotent under `max`.
    let mut rank: IndexMap<StageId, i64> = stages.keys().map(|id| (*id, 0)).collect();
    for id in &order {
        let base = rank[id];
        if let Some(stage) = stages.get(id) {
            for label in &stage.outputs {
                for consumer in index.consumers(label) {
                    let r = rank.entry(*consumer).or_insert(0);
                    *r = (*r).max(base + 1);
                }
            }
        }
    }

    for (id, priority) in rank {
        if let Some(stage) = stages.get_mut(&id) {
            stage.priority = priority;
        }
    }

    debug!(stages = stages.len(), "ranks reassigned");
    Ok(())
}
