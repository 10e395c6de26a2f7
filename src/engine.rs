//! Transpiler engine abstraction.
//!
//! The orchestrator never sees engine internals: it depends on the narrow
//! [`Engine`] capability (a version string and a `compile` operation), so
//! any conforming implementation (a different engine version, a native
//! reimplementation) can be substituted.
//!
//! [`EngineAdapter`] owns exactly one loaded engine instance for the
//! lifetime of a run. The engine is not safe for concurrent invocation, so
//! the adapter enters and exits it around each call through a mutex guard;
//! the guard drops on every path, so a failing call cannot leave the engine
//! entered and corrupt later calls.

use std::path::PathBuf;

use parking_lot::Mutex;

use crate::error::{BatchError, EngineError};
use crate::paths::OutputPlan;

/// Typed options projected into each engine call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Suppress the engine's default output wrapper.
    pub bare: bool,
    /// Ask the engine to produce a source map.
    pub source_maps: bool,
}

/// One compile call against the engine.
///
/// The names are relative forward-slash names from the unit's
/// [`OutputPlan`]; the engine embeds them in generated artifacts (source
/// map `sources`/`file` entries), never touches the filesystem with them.
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    /// Full source text of the unit.
    pub source: &'a str,
    /// Relative name of the source file.
    pub source_name: &'a str,
    /// Relative name of the generated file.
    pub generated_name: &'a str,
    /// Relative name of the source map file, when maps are requested.
    pub map_name: Option<&'a str>,
    /// Typed engine options.
    pub options: CompileOptions,
}

/// Raw output of one engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    /// Generated target-language code.
    pub code: String,
    /// Serialized source map, when one was requested.
    pub map: Option<String>,
}

/// The transpiler engine capability.
///
/// Implementations are stateful per load but must be stateless across
/// independent `compile` calls: a [`EngineError::Compilation`] failure on
/// one call must not affect subsequent calls on the same instance.
pub trait Engine: Send {
    /// The loaded engine's version string.
    fn version(&self) -> &str;

    /// Compile one unit's source text.
    fn compile(&mut self, request: &CompileRequest<'_>) -> Result<EngineOutput, EngineError>;
}

/// An already-resolved engine resource location.
///
/// Resolution order (explicit URL, then local path, then the bundled
/// default) is the host tool's concern; by the time a location reaches
/// this crate it is a concrete handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EngineLocation {
    /// The engine asset bundled with the host tool.
    #[default]
    Bundled,
    /// A local engine file.
    File(PathBuf),
    /// A remote engine resource.
    Url(String),
}

impl EngineLocation {
    /// Classify a user-supplied location string.
    ///
    /// Tries URL first, then local path; an empty string means the bundled
    /// default. Helper for hosts without their own resolution layer.
    pub fn parse(input: &str) -> Self {
        if input.is_empty() {
            Self::Bundled
        } else if input.contains("://") {
            Self::Url(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }
}

/// Loads an [`Engine`] from a resolved location.
///
/// A load failure is fatal for the whole run: without an engine no
/// compilation can proceed.
pub trait EngineLoader {
    /// Load and initialize an engine instance.
    fn load(&self, location: &EngineLocation) -> Result<Box<dyn Engine>, EngineError>;
}

/// Owns the single loaded engine instance for one batch run.
pub struct EngineAdapter {
    engine: Mutex<Box<dyn Engine>>,
    version: String,
}

impl std::fmt::Debug for EngineAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineAdapter")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl EngineAdapter {
    /// Load the engine from `location` and construct the adapter.
    ///
    /// The version string is captured immediately, so it is available
    /// before any file is processed. Fails with [`BatchError::EngineLoad`]
    /// if the engine resource cannot be loaded or initialized.
    pub fn load<L: EngineLoader + ?Sized>(
        loader: &L,
        location: &EngineLocation,
    ) -> Result<Self, BatchError> {
        let engine = loader
            .load(location)
            .map_err(|err| BatchError::EngineLoad {
                message: err.to_string(),
            })?;
        let version = engine.version().to_string();
        Ok(Self {
            engine: Mutex::new(engine),
            version,
        })
    }

    /// Wrap an already-constructed engine instance.
    pub fn new(engine: Box<dyn Engine>) -> Self {
        let version = engine.version().to_string();
        Self {
            engine: Mutex::new(engine),
            version,
        }
    }

    /// The loaded engine's version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Compile one unit's source text.
    ///
    /// When source maps are enabled, the returned code ends with a
    /// single-line `sourceMappingURL` comment naming the unit's map file
    /// and `map` holds the serialized map. When disabled, the code is the
    /// engine's raw output and `map` is always `None`.
    pub fn compile(
        &self,
        source: &str,
        plan: &OutputPlan,
        options: CompileOptions,
    ) -> Result<EngineOutput, EngineError> {
        let request = CompileRequest {
            source,
            source_name: &plan.source_name,
            generated_name: &plan.generated_name,
            map_name: plan.map_name.as_deref(),
            options,
        };

        let mut output = {
            let mut engine = self.engine.lock();
            engine.compile(&request)?
        };

        if options.source_maps {
            if let Some(map_name) = request.map_name {
                output.code.push_str(&format!("\n//# sourceMappingURL={map_name}"));
            }
        } else {
            output.map = None;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::BuildConfig;
    use crate::discover::SourceUnit;
    use crate::test_engine::StubLoader;

    use super::*;

    fn plan(source_maps: bool) -> OutputPlan {
        let config = BuildConfig::builder("in", "out").source_maps(source_maps).build();
        OutputPlan::derive(&SourceUnit::new("a/b.src"), &config)
    }

    fn adapter() -> EngineAdapter {
        EngineAdapter::load(&StubLoader, &EngineLocation::Bundled).unwrap()
    }

    #[test]
    fn parse_classifies_url_then_path() {
        assert_eq!(
            EngineLocation::parse("https://example.org/engine.js"),
            EngineLocation::Url("https://example.org/engine.js".to_string())
        );
        assert_eq!(
            EngineLocation::parse("lib/engine.js"),
            EngineLocation::File(PathBuf::from("lib/engine.js"))
        );
        assert_eq!(EngineLocation::parse(""), EngineLocation::Bundled);
    }

    #[test]
    fn version_available_after_load() {
        assert!(!adapter().version().is_empty());
    }

    #[test]
    fn adapter_debug_output_names_the_version() {
        let text = format!("{:?}", adapter());
        assert!(text.contains("1.2.0-stub"));
    }

    #[test]
    fn load_failure_is_fatal() {
        let missing = EngineLocation::File(PathBuf::from("no/such/engine.js"));
        let err = EngineAdapter::load(&StubLoader, &missing).unwrap_err();
        assert!(matches!(err, BatchError::EngineLoad { .. }));
    }

    #[test]
    fn appends_map_reference_when_maps_enabled() {
        let adapter = adapter();
        let options = CompileOptions { bare: true, source_maps: true };
        let output = adapter.compile("x = 1", &plan(true), options).unwrap();
        assert!(output.code.ends_with("//# sourceMappingURL=a/b.gen.map"));
        assert!(output.map.is_some());
    }

    #[test]
    fn raw_output_without_maps() {
        let adapter = adapter();
        let options = CompileOptions { bare: true, source_maps: false };
        let output = adapter.compile("x = 1", &plan(false), options).unwrap();
        assert!(!output.code.contains("sourceMappingURL"));
        assert_eq!(output.map, None);
    }

    #[test]
    fn failed_call_does_not_poison_the_engine() {
        let adapter = adapter();
        let options = CompileOptions::default();
        let err = adapter.compile("this is not valid", &plan(false), options);
        assert!(err.is_err());

        // The same instance keeps compiling after a per-call failure.
        let ok = adapter.compile("x = 1", &plan(false), options);
        assert!(ok.is_ok());
    }
}
