// src/dryrun.rs

//! Dry-run execution over the registry.
//!
//! Walks stages in rank order against a hypothetical set of available labels
//! without invoking any stage's work. The run validates that the current
//! order actually respects data availability.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::errors::{FlowdagError, Result};
use crate::graph::registry::Registry;
use crate::types::Label;

impl<W> Registry<W> {
    /// Simulate execution given the labels available before any stage runs.
    ///
    /// Stages are visited in rank order. A stage whose inputs are covered by
    /// the cumulative available set contributes its outputs; the first stage
    /// whose inputs are not covered aborts the run with
    /// [`FlowdagError::MissingInputs`]. Later stages are never skipped and
    /// retried: a gap means either the seed is insufficient or the ranking
    /// failed to produce a valid order.
    pub fn simulate<I>(&self, seed: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Label>,
    {
        let mut available: HashSet<Label> = seed.into_iter().map(Into::into).collect();
        debug!(seed = ?available, "dry run starting");

        for stage in self.stages.values() {
            info!(stage = %stage.id, priority = stage.priority(), "dry run: considering stage");

            let missing: Vec<Label> = stage
                .inputs
                .iter()
                .filter(|label| !available.contains(*label))
                .cloned()
                .collect();

            if !missing.is_empty() {
                warn!(stage = %stage.id, ?missing, "dry run: inputs unavailable; aborting");
                return Err(FlowdagError::MissingInputs {
                    stage: stage.id,
                    missing,
                });
            }

            available.extend(stage.outputs.iter().cloned());
        }

        info!(stages = self.stages.len(), "dry run completed");
        Ok(())
    }
}
