// src/lib.rs

//! Dependency-ordered stage registry.
//!
//! Stages declare the data labels they consume and produce; the registry
//! derives an execution order from those declarations, with no explicit edge
//! list built by the caller. Each registration re-ranks the whole graph and
//! keeps the stage collection sorted by rank, and a dry-run validator checks
//! feasibility against a hypothetical initial data set.
//!
//! Work payloads are opaque: the registry never invokes them and only touches
//! them for diagnostics. Binding real data to stages is the caller's job.
//!
//! ```
//! use flowdag::Registry;
//!
//! let mut graph = Registry::new();
//! let parse = graph.register("raw", "ast", "parse")?;
//! let lower = graph.register("ast", "ir", "lower")?;
//!
//! assert!(graph.stage(parse)?.priority() < graph.stage(lower)?.priority());
//!
//! let order: Vec<_> = graph.iter().copied().collect();
//! assert_eq!(order, ["parse", "lower"]);
//!
//! graph.simulate(["raw"])?;
//! # Ok::<(), flowdag::FlowdagError>(())
//! ```

pub mod errors;
pub mod graph;
pub mod logging;
pub mod types;

mod dryrun;

pub use errors::{FlowdagError, Result};
pub use graph::{Registry, Stage};
pub use types::{Label, Labels, StageId};
