//! Stylesheet-rewrite stage - routes preprocessor dialects to the compiler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{normalize_path, SassVariables};
use crate::request::{ModuleRequest, StyleDialect};
use crate::stage::toolchain::{StyleCompiler, TransformError};
use crate::stage::{BuildStage, StageOrder, TransformOutput};

/// Resolved variables source handed to the style compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariablesSource {
    /// Framework default variables.
    Default,
    /// User variables file, absolute and lexically normalized.
    File(PathBuf),
}

/// Rewrites `.scss` and `.sass` modules through the preprocessor compiler
/// with the framework variables in scope.
///
/// Declared `Pre` so preprocessor output exists before any later stage that
/// expects plain stylesheet syntax. Only registered when the
/// stylesheet-variables option is truthy.
pub struct StyleStage {
    compiler: Arc<dyn StyleCompiler>,
    variables: VariablesSource,
}

impl StyleStage {
    pub fn new(variables: &SassVariables, root: &Path, compiler: Arc<dyn StyleCompiler>) -> Self {
        let variables = match variables {
            SassVariables::File(path) => VariablesSource::File(normalize_path(root, path)),
            SassVariables::Enabled(_) => VariablesSource::Default,
        };
        Self {
            compiler,
            variables,
        }
    }

    pub fn variables(&self) -> &VariablesSource {
        &self.variables
    }
}

impl BuildStage for StyleStage {
    fn name(&self) -> &'static str {
        "vela:style"
    }

    fn order(&self) -> StageOrder {
        StageOrder::Pre
    }

    fn transform(&self, source: &str, id: &str) -> Result<Option<TransformOutput>, TransformError> {
        let request = ModuleRequest::parse(id);

        // One extension set per dialect; a request never routes to the
        // other dialect's compiler invocation.
        for dialect in [StyleDialect::Scss, StyleDialect::Sass] {
            if request.is_style(dialect.extensions()) {
                let code = self
                    .compiler
                    .compile(source, dialect, &self.variables)
                    .map_err(|source| TransformError::Style {
                        id: id.to_string(),
                        source,
                    })?;
                // TODO: thread source maps through once the style compiler
                // exposes them.
                return Ok(Some(TransformOutput::code(code)));
            }
        }

        Ok(None)
    }
}
