// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::types::{Label, StageId};

#[derive(Error, Debug)]
pub enum FlowdagError {
    #[error("unknown stage: {0}")]
    UnknownStage(StageId),

    #[error("cyclic dependency involving {stage} (labels {labels:?})")]
    CyclicDependency { stage: StageId, labels: Vec<Label> },

    #[error("{stage} is missing inputs {missing:?}")]
    MissingInputs { stage: StageId, missing: Vec<Label> },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FlowdagError>;
