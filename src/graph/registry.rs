// src/graph/registry.rs

//! The stage registry: owns all stages and their derived indexes.

use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::errors::{FlowdagError, Result};
use crate::graph::adjacency::AdjacencyIndex;
use crate::graph::rank;
use crate::graph::stage::Stage;
use crate::types::{Labels, StageId};

/// Dependency graph of registered stages.
///
/// Stages are inserted once and live for the registry's lifetime. Every
/// registration updates the adjacency indexes, re-ranks the whole graph and
/// re-sorts the stage collection, so iteration always reflects the latest
/// dependency order. Equal ranks keep their previous relative order across
/// re-sorts.
#[derive(Debug)]
pub struct Registry<W> {
    pub(crate) stages: IndexMap<StageId, Stage<W>>,
    index: AdjacencyIndex,
    next_id: u64,
}

impl<W> Registry<W> {
    pub fn new() -> Self {
        Self {
            stages: IndexMap::new(),
            index: AdjacencyIndex::default(),
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Register a stage consuming `inputs` and producing `outputs`.
    ///
    /// Single labels promote to one-element sequences; see [`Labels`].
    /// The returned [`StageId`] is minted from a monotonic counter, so equal
    /// work values still get distinct stages.
    ///
    /// If the new stage would close a cycle through shared labels the
    /// registration is rejected with [`FlowdagError::CyclicDependency`] and
    /// the registry is left exactly as before the call.
    pub fn register(
        &mut self,
        inputs: impl Into<Labels>,
        outputs: impl Into<Labels>,
        work: W,
    ) -> Result<StageId> {
        let inputs = inputs.into().into_vec();
        let outputs = outputs.into().into_vec();
        let id = StageId(self.next_id);
        self.next_id += 1;

        debug!(stage = %id, ?inputs, ?outputs, "registering stage");
        self.index.insert(id, &inputs, &outputs);
        self.stages.insert(id, Stage::new(id, inputs, outputs, work));

        if let Err(err) = rank::assign_ranks(&mut self.stages, &self.index) {
            if let Some(stage) = self.stages.shift_remove(&id) {
                self.index.remove(id, &stage.inputs, &stage.outputs);
            }
            warn!(stage = %id, error = %err, "registration rejected; graph unchanged");
            return Err(err);
        }

        // Stable sort: ties keep the order produced by the previous sort.
        self.stages
            .sort_by(|_, a, _, b| a.priority.cmp(&b.priority));

        Ok(id)
    }

    /// Look up a stage by id.
    pub fn stage(&self, id: StageId) -> Result<&Stage<W>> {
        self.stages.get(&id).ok_or(FlowdagError::UnknownStage(id))
    }

    /// Stages producing any of this stage's input labels.
    ///
    /// A neighbour sharing several labels appears once per shared label; the
    /// duplicates are deliberate and callers that need a set must dedupe.
    pub fn predecessors(&self, id: StageId) -> Result<Vec<StageId>> {
        let stage = self.stage(id)?;
        let mut predecessors = Vec::new();
        for label in &stage.inputs {
            predecessors.extend_from_slice(self.index.producers(label));
        }
        Ok(predecessors)
    }

    /// Stages consuming any of this stage's output labels.
    ///
    /// Same duplicate semantics as [`predecessors`](Self::predecessors).
    pub fn successors(&self, id: StageId) -> Result<Vec<StageId>> {
        let stage = self.stage(id)?;
        let mut successors = Vec::new();
        for label in &stage.outputs {
            successors.extend_from_slice(self.index.consumers(label));
        }
        Ok(successors)
    }

    /// Stages none of whose input labels has a registered producer.
    ///
    /// These are the natural entry points of a run and a sensible seed for
    /// [`simulate`](Self::simulate).
    pub fn sources(&self) -> Vec<StageId> {
        self.stages
            .values()
            .filter(|s| s.inputs.iter().all(|l| !self.index.has_producer(l)))
            .map(|s| s.id)
            .collect()
    }

    /// Work items in current rank order.
    ///
    /// Restartable and side-effect free; re-iterating after a registration
    /// reflects the new order.
    pub fn iter(&self) -> impl Iterator<Item = &W> {
        self.stages.values().map(|s| &s.work)
    }

    /// Full stage views in current rank order.
    pub fn stages(&self) -> impl Iterator<Item = &Stage<W>> {
        self.stages.values()
    }
}

impl<W> Default for Registry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, W> IntoIterator for &'a Registry<W> {
    type Item = &'a W;
    type IntoIter = std::iter::Map<
        indexmap::map::Values<'a, StageId, Stage<W>>,
        fn(&'a Stage<W>) -> &'a W,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.stages.values().map(|s| &s.work)
    }
}

/// Human-readable dump of all stages in rank order, one per line.
/// Diagnostics only; not a machine-parsed format.
impl<W: fmt::Debug> fmt::Display for Registry<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.values().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}
