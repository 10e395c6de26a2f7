//! Build configuration.
//!
//! One [`BuildConfig`] describes one batch run and is immutable for its
//! duration. Use [`BuildConfigBuilder`] for fluent construction:
//!
//! ```ignore
//! use transpile_batch::BuildConfig;
//!
//! let config = BuildConfig::builder("src/scripts", "target/generated")
//!     .bare(true)
//!     .source_maps(true)
//!     .incremental(true)
//!     .build();
//! ```

use std::path::{Path, PathBuf};

use crate::engine::EngineLocation;

/// Configuration for one batch run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory tree to discover source files under. Must exist.
    pub source_root: PathBuf,
    /// Directory to write generated artifacts under. Created as needed.
    pub output_root: PathBuf,
    /// Suppress the engine's default output wrapper.
    pub bare: bool,
    /// Emit a source map and a copy of the original source per unit.
    pub source_maps: bool,
    /// Skip units whose generated output is already up to date.
    pub incremental: bool,
    /// Resolved location of the transpiler engine resource.
    pub engine_location: EngineLocation,
}

impl BuildConfig {
    /// Create a builder with the two required directories.
    pub fn builder(
        source_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> BuildConfigBuilder {
        BuildConfigBuilder {
            source_root: source_root.into(),
            output_root: output_root.into(),
            bare: false,
            source_maps: false,
            incremental: false,
            engine_location: EngineLocation::Bundled,
        }
    }

    /// The configured source root.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// The configured output root.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}

/// Fluent builder for [`BuildConfig`].
#[derive(Debug, Clone)]
pub struct BuildConfigBuilder {
    source_root: PathBuf,
    output_root: PathBuf,
    bare: bool,
    source_maps: bool,
    incremental: bool,
    engine_location: EngineLocation,
}

impl BuildConfigBuilder {
    /// Suppress the engine's default output wrapper.
    ///
    /// Default: `false`.
    pub fn bare(mut self, bare: bool) -> Self {
        self.bare = bare;
        self
    }

    /// Emit a source map and a copy of the original source next to each
    /// generated file.
    ///
    /// Default: `false`.
    pub fn source_maps(mut self, source_maps: bool) -> Self {
        self.source_maps = source_maps;
        self
    }

    /// Only compile units whose generated output is missing or older than
    /// the source.
    ///
    /// Default: `false` (every discovered unit compiles).
    pub fn incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    /// Use an engine resource other than the bundled default.
    pub fn engine_location(mut self, location: EngineLocation) -> Self {
        self.engine_location = location;
        self
    }

    /// Finalize the configuration.
    pub fn build(self) -> BuildConfig {
        BuildConfig {
            source_root: self.source_root,
            output_root: self.output_root,
            bare: self.bare,
            source_maps: self.source_maps,
            incremental: self.incremental,
            engine_location: self.engine_location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = BuildConfig::builder("in", "out").build();
        assert_eq!(config.source_root, PathBuf::from("in"));
        assert_eq!(config.output_root, PathBuf::from("out"));
        assert!(!config.bare);
        assert!(!config.source_maps);
        assert!(!config.incremental);
        assert_eq!(config.engine_location, EngineLocation::Bundled);
    }

    #[test]
    fn builder_sets_all_options() {
        let config = BuildConfig::builder("in", "out")
            .bare(true)
            .source_maps(true)
            .incremental(true)
            .engine_location(EngineLocation::File(PathBuf::from("lib/engine.bin")))
            .build();
        assert!(config.bare);
        assert!(config.source_maps);
        assert!(config.incremental);
        assert_eq!(
            config.engine_location,
            EngineLocation::File(PathBuf::from("lib/engine.bin"))
        );
    }
}
