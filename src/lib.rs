//! # transpile-batch
//!
//! A batch transpilation orchestration library.
//!
//! Given a directory tree of source scripts and a transpiler engine, this
//! crate discovers the sources, decides which must be (re)compiled, runs
//! the engine per file, writes the generated artifacts, and aggregates the
//! whole batch into one report:
//!
//! - **Discovery**: deterministic, lexically ordered walk of the source root
//! - **Incremental builds**: mtime-based skipping of up-to-date outputs
//! - **Source maps**: map file plus a copy of the original next to each
//!   generated file
//! - **Partial failure**: one broken file never aborts the batch; the
//!   report lists every failure from a single run
//!
//! The engine itself is a black box behind the [`Engine`] trait; this
//! crate does no parsing or code generation of its own.
//!
//! ## Quick Start
//!
//! ```ignore
//! use transpile_batch::{run_batch, BuildConfig};
//!
//! let config = BuildConfig::builder("src/scripts", "target/generated")
//!     .incremental(true)
//!     .build();
//!
//! // `loader` is your EngineLoader implementation.
//! let report = run_batch(&config, &loader)?;
//! println!("{}", report.summary());
//! if !report.is_success() {
//!     eprintln!("{}", report.failure_list());
//!     std::process::exit(1);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: per-run build configuration
//! - [`discover`]: source tree discovery
//! - [`paths`]: output path derivation
//! - [`engine`]: the engine contract and adapter
//! - [`batch`]: the orchestrator
//! - [`report`]: aggregated batch results
//! - [`error`]: fatal and per-unit error types

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod discover;
pub mod engine;
pub mod error;
pub mod paths;
pub mod report;

#[cfg(test)]
mod test_engine;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use transpile_batch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BatchCompiler, BatchError, BatchReport, BatchResult, BuildConfig, CompileOptions, Engine,
        EngineAdapter, EngineError, EngineLoader, EngineLocation, EngineOutput, OutputPlan,
        SourceUnit, UnitError, UnitOutcome, run_batch,
    };
}

// =============================================================================
// High-Level API
// =============================================================================

pub use batch::{BatchCompiler, UnitOutcome, run_batch};
pub use report::BatchReport;

// =============================================================================
// Infrastructure
// =============================================================================

pub use config::{BuildConfig, BuildConfigBuilder};
pub use discover::{SourceUnit, discover_sources};
pub use engine::{
    CompileOptions, CompileRequest, Engine, EngineAdapter, EngineLoader, EngineLocation,
    EngineOutput,
};
pub use error::{BatchError, BatchResult, EngineError, UnitError};
pub use paths::{GENERATED_EXTENSION, MAP_SUFFIX, OutputPlan, SOURCE_EXTENSION};
