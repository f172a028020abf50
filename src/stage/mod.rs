//! Transform stage registry - the conditionally registered units of the
//! build pipeline.
//!
//! ```text
//! Options -> compose -> [config, style?, script?] -> host lifecycle hooks
//! ```
//!
//! Each stage implements [`BuildStage`], an explicit interface of named
//! optional callbacks the host drives at three lifecycle points:
//! configuration-merge (`config`), configuration-finalization
//! (`config_resolved`) and per-module transform (`transform`). Hooks report
//! pass-through with `None`; that is a first-class outcome, not an error.

mod config_inject;
mod script;
mod style;
mod toolchain;
mod treeshake;

pub use config_inject::ConfigInjectStage;
pub use script::ScriptStage;
pub use style::{StyleStage, VariablesSource};
pub use toolchain::{ImportMapper, StyleCompiler, TemplateCompiler, Toolchain, TransformError};
pub use treeshake::SealedFlag;

use crate::config::{ConfigFragment, ResolvedBuildConfig};

/// Declared scheduling priority of a stage.
///
/// Ordering is explicit, not an artifact of registration order: the
/// composer sorts stages by this key before handing them to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageOrder {
    /// Runs before generic transforms, e.g. preprocessor output must exist
    /// before stages that expect plain stylesheet syntax.
    Pre,
    Normal,
    Post,
}

/// Output of an active rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    pub map: Option<String>,
}

impl TransformOutput {
    /// A rewrite without a source map.
    pub fn code(code: String) -> Self {
        Self { code, map: None }
    }
}

/// One named unit of the transform pipeline.
///
/// Stages are stateless across module invocations except for the sealed
/// treeshaking flag in the script stage, written once at finalization.
/// `Send + Sync` because the host may run `transform` concurrently across
/// independent modules.
pub trait BuildStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn order(&self) -> StageOrder {
        StageOrder::Normal
    }

    /// Configuration-merge hook. A returned fragment is merged into the
    /// host configuration before any content transform executes.
    fn config(&self) -> Option<ConfigFragment> {
        None
    }

    /// Configuration-finalization hook. Called exactly once, before any
    /// `transform` call.
    fn config_resolved(&self, _resolved: &ResolvedBuildConfig) {}

    /// Per-module transform hook. `Ok(None)` passes the module through
    /// unchanged; errors propagate to the host's per-module reporting.
    fn transform(&self, _source: &str, _id: &str) -> Result<Option<TransformOutput>, TransformError> {
        Ok(None)
    }
}
