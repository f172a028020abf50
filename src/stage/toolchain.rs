//! External compiler collaborators driven by the transform stages.
//!
//! The plugin never compiles content itself; it decides whether and with
//! what parameters to invoke these. Each collaborator behaves as a pure
//! `(source, options) -> transformed source` function. Failures carry the
//! offending module id so the host can attribute them.

use std::sync::Arc;

use thiserror::Error;

use crate::config::ComponentCase;
use crate::request::StyleDialect;
use crate::stage::style::VariablesSource;

/// Errors raised by a per-module transform hook.
///
/// Never caught inside the pipeline: the host surfaces them per module.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Style compile failed for '{id}': {source}")]
    Style {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Template compile failed for '{id}': {source}")]
    Template {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Import mapping failed for '{id}': {source}")]
    ImportMap {
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Preprocessor-to-CSS compiler.
pub trait StyleCompiler: Send + Sync {
    /// Compile `source` written in `dialect`, with the framework variables
    /// from `variables` in scope.
    fn compile(
        &self,
        source: &str,
        dialect: StyleDialect,
        variables: &VariablesSource,
    ) -> anyhow::Result<String>;
}

/// Component-template-to-code compiler.
pub trait TemplateCompiler: Send + Sync {
    /// Compile a template sub-block, auto-registering components written in
    /// `case`. `treeshaking` selects between narrow per-component imports
    /// and the full runtime bundle.
    fn compile(&self, source: &str, case: ComponentCase, treeshaking: bool) -> anyhow::Result<String>;
}

/// Import rewriter for script modules.
pub trait ImportMapper: Send + Sync {
    /// Rewrite framework import statements (adding or narrowing imports),
    /// leaving all other code untouched.
    fn map_imports(&self, source: &str) -> anyhow::Result<String>;
}

/// The set of external compilers a composed pipeline drives.
#[derive(Clone)]
pub struct Toolchain {
    pub style: Arc<dyn StyleCompiler>,
    pub template: Arc<dyn TemplateCompiler>,
    pub imports: Arc<dyn ImportMapper>,
}

impl Toolchain {
    pub fn new(
        style: Arc<dyn StyleCompiler>,
        template: Arc<dyn TemplateCompiler>,
        imports: Arc<dyn ImportMapper>,
    ) -> Self {
        Self {
            style,
            template,
            imports,
        }
    }
}
