//! Stub engine used by unit tests.
//!
//! Implements a tiny assignment language: each non-empty line must read
//! `name = value` and becomes `var name = value;`. Anything else is a
//! compilation error, which gives tests a deterministic way to break
//! individual files.

use serde_json::json;

use crate::engine::{CompileRequest, Engine, EngineLoader, EngineLocation, EngineOutput};
use crate::error::EngineError;

pub(crate) struct StubEngine;

impl Engine for StubEngine {
    fn version(&self) -> &str {
        "1.2.0-stub"
    }

    fn compile(&mut self, request: &CompileRequest<'_>) -> Result<EngineOutput, EngineError> {
        let mut statements = Vec::new();
        for (idx, line) in request.source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((name, value)) = line.split_once('=') else {
                return Err(EngineError::compilation(format!(
                    "unexpected statement on line {}: {line}",
                    idx + 1
                )));
            };
            statements.push(format!("var {} = {};", name.trim(), value.trim()));
        }

        let body = statements.join("\n");
        let code = if request.options.bare {
            body
        } else {
            format!("(function() {{\n{body}\n}}).call(this);")
        };

        let map = request.options.source_maps.then(|| {
            json!({
                "version": 3,
                "file": request.generated_name,
                "sources": [request.source_name],
                "mappings": "AAAA",
            })
            .to_string()
        });

        Ok(EngineOutput { code, map })
    }
}

/// Loader that hands out [`StubEngine`] instances.
///
/// `Bundled` always loads; a `File` location must exist; `Url` locations
/// fail, standing in for an unreachable remote resource.
pub(crate) struct StubLoader;

impl EngineLoader for StubLoader {
    fn load(&self, location: &EngineLocation) -> Result<Box<dyn Engine>, EngineError> {
        match location {
            EngineLocation::Bundled => Ok(Box::new(StubEngine)),
            EngineLocation::File(path) if path.is_file() => Ok(Box::new(StubEngine)),
            EngineLocation::File(path) => Err(EngineError::load(format!(
                "engine file not found: {}",
                path.display()
            ))),
            EngineLocation::Url(url) => {
                Err(EngineError::load(format!("cannot fetch engine from {url}")))
            }
        }
    }
}
