// src/graph/adjacency.rs

//! Label-to-stage adjacency indexes.
//!
//! Two mappings derived entirely from registered stages: which stages produce
//! a label and which consume it. Entries are appended on registration and
//! only removed when a rejected registration is rolled back.

use std::collections::HashMap;

use crate::types::{Label, StageId};

#[derive(Debug, Clone, Default)]
pub(crate) struct AdjacencyIndex {
    producers_of: HashMap<Label, Vec<StageId>>,
    consumers_of: HashMap<Label, Vec<StageId>>,
}

impl AdjacencyIndex {
    /// Record a stage under each of its input and output labels.
    pub(crate) fn insert(&mut self, id: StageId, inputs: &[Label], outputs: &[Label]) {
        for label in inputs {
            self.consumers_of.entry(label.clone()).or_default().push(id);
        }
        for label in outputs {
            self.producers_of.entry(label.clone()).or_default().push(id);
        }
    }

    /// Undo [`insert`](Self::insert) for a stage whose registration was
    /// rejected. Empty label entries are dropped so the index never refers to
    /// a stage the registry does not hold.
    pub(crate) fn remove(&mut self, id: StageId, inputs: &[Label], outputs: &[Label]) {
        for label in inputs {
            if let Some(ids) = self.consumers_of.get_mut(label) {
                ids.retain(|other| *other != id);
                if ids.is_empty() {
                    self.consumers_of.remove(label);
                }
            }
        }
        for label in outputs {
            if let Some(ids) = self.producers_of.get_mut(label) {
                ids.retain(|other| *other != id);
                if ids.is_empty() {
                    self.producers_of.remove(label);
                }
            }
        }
    }

    /// Stages whose outputs include `label`.
    pub(crate) fn producers(&self, label: &Label) -> &[StageId] {
        self.producers_of.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Stages whose inputs include `label`.
    pub(crate) fn consumers(&self, label: &Label) -> &[StageId] {
        self.consumers_of.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any registered stage produces `label`.
    pub(crate) fn has_producer(&self, label: &Label) -> bool {
        !self.producers(label).is_empty()
    }
}
