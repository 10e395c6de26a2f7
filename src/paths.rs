//! Output path derivation.
//!
//! [`OutputPlan::derive`] is a pure function from a discovered unit and the
//! build configuration to the full set of artifact paths for that unit. No
//! I/O happens here; the orchestrator checks the filesystem against the
//! plan afterwards.

use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::discover::SourceUnit;

/// Extension of recognized source script files (without the dot).
pub const SOURCE_EXTENSION: &str = "src";

/// Extension of generated output files (without the dot).
pub const GENERATED_EXTENSION: &str = "gen";

/// Suffix appended to a generated file name to form its source map name.
pub const MAP_SUFFIX: &str = ".map";

/// The set of output artifact paths for one source unit.
///
/// The `*_name` fields are forward-slash relative names, used in engine
/// calls and log lines; the path fields are resolved under the output root.
///
/// `map`, `copied_source`, and `map_name` are all present iff source maps
/// are enabled: map artifacts only ever exist as a pair with the copied
/// original, never individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    /// Relative name of the source file (e.g. `widgets/a.src`).
    pub source_name: String,
    /// Relative name of the generated file (e.g. `widgets/a.gen`).
    pub generated_name: String,
    /// Relative name of the source map file, when maps are enabled.
    pub map_name: Option<String>,
    /// Where the generated code is written.
    pub generated: PathBuf,
    /// Where the source map is written, when maps are enabled.
    pub map: Option<PathBuf>,
    /// Where the original source is copied, when maps are enabled.
    pub copied_source: Option<PathBuf>,
}

impl OutputPlan {
    /// Derive the output plan for `unit` under `config`.
    ///
    /// The generated name swaps the source extension for the generated
    /// extension; the map name appends [`MAP_SUFFIX`] to the generated
    /// name; the copied source keeps the original relative path. All three
    /// resolve under `config.output_root`. The mapping is total and
    /// injective over well-formed relative paths: two distinct sources
    /// never derive the same generated path. Duplicate-path collisions are
    /// a configuration error and are not detected here.
    pub fn derive(unit: &SourceUnit, config: &BuildConfig) -> Self {
        let source_name = unit.name();
        let stem = source_name
            .strip_suffix(&format!(".{SOURCE_EXTENSION}"))
            .unwrap_or(&source_name);
        let generated_name = format!("{stem}.{GENERATED_EXTENSION}");
        let generated = config.output_root.join(unit.rel().with_extension(GENERATED_EXTENSION));

        let (map_name, map, copied_source) = if config.source_maps {
            let map_name = format!("{generated_name}{MAP_SUFFIX}");
            let mut map = generated.clone().into_os_string();
            map.push(MAP_SUFFIX);
            (
                Some(map_name),
                Some(PathBuf::from(map)),
                Some(config.output_root.join(unit.rel())),
            )
        } else {
            (None, None, None)
        };

        Self {
            source_name,
            generated_name,
            map_name,
            generated,
            map,
            copied_source,
        }
    }

    /// Iterate over every present output path in the plan.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        [
            Some(self.generated.as_path()),
            self.map.as_deref(),
            self.copied_source.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}
