// src/graph/stage.rs

//! Stage metadata: declared labels, opaque work payload and current rank.

use std::fmt;

use crate::types::{Label, StageId};

/// One registered unit of work.
///
/// The registry never invokes or inspects `work`; the only field it mutates
/// after registration is the rank, via the per-registration ranking pass.
#[derive(Debug, Clone)]
pub struct Stage<W> {
    pub id: StageId,
    /// Labels this stage requires before it can run.
    pub inputs: Vec<Label>,
    /// Labels this stage makes available once it has run.
    pub outputs: Vec<Label>,
    /// Caller-supplied payload, carried through untouched.
    pub work: W,
    /// Relative rank; higher means "runs later". Maintained by the registry.
    pub(crate) priority: i64,
}

impl<W> Stage<W> {
    pub(crate) fn new(id: StageId, inputs: Vec<Label>, outputs: Vec<Label>, work: W) -> Self {
        Self {
            id,
            inputs,
            outputs,
            work,
            priority: 0,
        }
    }

    /// Current relative rank of this stage.
    pub fn priority(&self) -> i64 {
        self.priority
    }
}

fn fmt_labels(f: &mut fmt::Formatter<'_>, labels: &[Label]) -> fmt::Result {
    write!(f, "[")?;
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{label}")?;
    }
    write!(f, "]")
}

/// Diagnostic rendering: `priority: [inputs] -- work --> [outputs]`.
impl<W: fmt::Debug> fmt::Display for Stage<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.priority)?;
        fmt_labels(f, &self.inputs)?;
        write!(f, " -- {:?} --> ", self.work)?;
        fmt_labels(f, &self.outputs)
    }
}
