//! Batch orchestration.
//!
//! [`BatchCompiler`] drives one run: discover sources, then process each
//! unit fully before starting the next. A unit failure is recorded in the
//! report and the loop continues; the batch never aborts for a per-file
//! error, so a developer gets every broken file from a single run instead
//! of iterating one error at a time. Only setup errors (missing source
//! root, engine load failure) abort before any unit is attempted.
//!
//! # Example
//!
//! ```ignore
//! use transpile_batch::{BatchCompiler, BuildConfig, EngineAdapter};
//!
//! let config = BuildConfig::builder("src/scripts", "target/generated")
//!     .incremental(true)
//!     .build();
//! let engine = EngineAdapter::load(&loader, &config.engine_location)?;
//!
//! let report = BatchCompiler::new(&config, &engine).run()?;
//! if !report.is_success() {
//!     eprintln!("{}", report.failure_list());
//!     std::process::exit(1);
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info, warn};

use crate::config::BuildConfig;
use crate::discover::{SourceUnit, discover_sources};
use crate::engine::{CompileOptions, EngineAdapter, EngineLoader};
use crate::error::{BatchResult, UnitError};
use crate::paths::OutputPlan;
use crate::report::BatchReport;

/// Result of processing one source unit.
#[derive(Debug)]
pub enum UnitOutcome {
    /// The unit compiled and all artifacts were written.
    Compiled,
    /// The unit was not compiled.
    Skipped {
        /// Why the unit was skipped (e.g. `"up to date"`).
        reason: String,
    },
    /// The unit failed; the batch continues.
    Failed {
        /// What went wrong.
        error: UnitError,
    },
}

/// Sequential orchestrator for one batch run.
///
/// Holds the immutable configuration and the exclusively-owned engine
/// adapter by reference; no other state is shared across units.
pub struct BatchCompiler<'a> {
    config: &'a BuildConfig,
    engine: &'a EngineAdapter,
}

impl<'a> BatchCompiler<'a> {
    /// Create an orchestrator over `config` and a loaded engine.
    pub fn new(config: &'a BuildConfig, engine: &'a EngineAdapter) -> Self {
        Self { config, engine }
    }

    /// Discover and process every source file under the configured root.
    ///
    /// Returns the finalized report; per-unit failures are recorded in it,
    /// never raised. The caller turns a non-success report into its own
    /// failure signal.
    pub fn run(&self) -> BatchResult<BatchReport> {
        let start = Instant::now();
        let units = discover_sources(&self.config.source_root)?;

        let mut report = BatchReport::new();
        for unit in &units {
            let outcome = self.process(unit);
            match &outcome {
                UnitOutcome::Compiled => {}
                UnitOutcome::Skipped { reason } => info!("skip {} ({reason})", unit.name()),
                UnitOutcome::Failed { error } => error!("{}: {error}", unit.name()),
            }
            report.record(unit.name(), outcome);
        }
        report.finalize(start.elapsed());

        info!("{}", report.summary());
        if !report.is_success() {
            error!("{}", report.failure_list());
        }
        Ok(report)
    }

    fn process(&self, unit: &SourceUnit) -> UnitOutcome {
        let plan = OutputPlan::derive(unit, self.config);
        if let Err(error) = self.prepare(&plan) {
            return UnitOutcome::Failed { error };
        }

        let source_path = unit.source_path(&self.config.source_root);
        if self.config.incremental && up_to_date(&source_path, &plan.generated) {
            return UnitOutcome::Skipped { reason: "up to date".to_string() };
        }

        match self.compile_unit(&source_path, &plan) {
            Ok(()) => UnitOutcome::Compiled,
            Err(error) => UnitOutcome::Failed { error },
        }
    }

    /// Make sure the generated file's directory exists and no output path
    /// is occupied by a directory.
    fn prepare(&self, plan: &OutputPlan) -> Result<(), UnitError> {
        let Some(parent) = plan.generated.parent() else {
            return Ok(());
        };
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|err| UnitError::io(parent, err))?;
        } else if let Some(path) = directory_conflict(plan) {
            warn!(
                "cannot write {}: a directory with the same name exists",
                path.display()
            );
            return Err(UnitError::PathConflict { path });
        }
        Ok(())
    }

    fn compile_unit(&self, source_path: &Path, plan: &OutputPlan) -> Result<(), UnitError> {
        let source =
            fs::read_to_string(source_path).map_err(|err| UnitError::io(source_path, err))?;

        let options = CompileOptions {
            bare: self.config.bare,
            source_maps: self.config.source_maps,
        };
        let output = self.engine.compile(&source, plan, options)?;

        fs::write(&plan.generated, &output.code)
            .map_err(|err| UnitError::io(&plan.generated, err))?;
        info!("compiled {}", plan.source_name);

        if let (Some(copied), Some(map_path), Some(map_name)) =
            (&plan.copied_source, &plan.map, &plan.map_name)
        {
            fs::copy(source_path, copied).map_err(|err| UnitError::io(copied, err))?;
            info!("copied {}", plan.source_name);

            let map = output.map.ok_or_else(|| UnitError::Compilation {
                message: "engine returned no source map".to_string(),
            })?;
            fs::write(map_path, map).map_err(|err| UnitError::io(map_path, err))?;
            info!("wrote source map {map_name}");
        }

        Ok(())
    }
}

/// Load the engine from `config.engine_location` and run a full batch.
///
/// Convenience wrapper over [`EngineAdapter::load`] plus
/// [`BatchCompiler::run`].
pub fn run_batch<L: EngineLoader + ?Sized>(
    config: &BuildConfig,
    loader: &L,
) -> BatchResult<BatchReport> {
    let engine = EngineAdapter::load(loader, &config.engine_location)?;
    info!("transpiler engine version: {}", engine.version());
    BatchCompiler::new(config, &engine).run()
}

/// First output path in the plan occupied by an existing directory, if any.
fn directory_conflict(plan: &OutputPlan) -> Option<PathBuf> {
    plan.paths().find(|path| path.is_dir()).map(Path::to_path_buf)
}

/// Whether `generated` exists and is at least as new as `source`.
///
/// Equal timestamps count as up to date, so coarse filesystem clocks do
/// not cause rebuild thrash.
fn up_to_date(source: &Path, generated: &Path) -> bool {
    let Ok(generated_meta) = fs::metadata(generated) else {
        return false;
    };
    let Ok(source_meta) = fs::metadata(source) else {
        return false;
    };
    match (generated_meta.modified(), source_meta.modified()) {
        (Ok(generated_mtime), Ok(source_mtime)) => generated_mtime >= source_mtime,
        _ => false,
    }
}
