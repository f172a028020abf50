//! Script/template-rewrite stage - auto-import and treeshaking transforms.

use std::sync::Arc;

use crate::config::{BuildMode, ComponentCase, ResolvedBuildConfig};
use crate::request::ModuleRequest;
use crate::stage::toolchain::{ImportMapper, TemplateCompiler, TransformError};
use crate::stage::treeshake::SealedFlag;
use crate::stage::{BuildStage, StageOrder, TransformOutput};

/// Rewrites compiled-template sub-blocks through the template compiler and,
/// when treeshaking is on, maps framework imports in script modules.
///
/// Not registered for `ssr-server` builds: template auto-registration is a
/// client/server-rendering concept with no meaning in a server-only script
/// context.
pub struct ScriptStage {
    template: Arc<dyn TemplateCompiler>,
    imports: Arc<dyn ImportMapper>,
    component_case: ComponentCase,
    dev_treeshaking: bool,
    treeshaking: SealedFlag,
}

impl ScriptStage {
    pub fn new(
        component_case: ComponentCase,
        dev_treeshaking: bool,
        template: Arc<dyn TemplateCompiler>,
        imports: Arc<dyn ImportMapper>,
    ) -> Self {
        Self {
            template,
            imports,
            component_case,
            dev_treeshaking,
            treeshaking: SealedFlag::new(),
        }
    }

    /// Current treeshaking decision (seeded `true` until finalization).
    pub fn treeshaking_enabled(&self) -> bool {
        self.treeshaking.get()
    }
}

impl BuildStage for ScriptStage {
    fn name(&self) -> &'static str {
        "vela:script"
    }

    fn order(&self) -> StageOrder {
        StageOrder::Normal
    }

    fn config_resolved(&self, resolved: &ResolvedBuildConfig) {
        // Development builds skip import narrowing unless the user opted in;
        // the decision is frozen here for the remainder of the build.
        let enabled = self.dev_treeshaking || resolved.mode != BuildMode::Development;
        self.treeshaking.seal(enabled);
        tracing::debug!(enabled, mode = ?resolved.mode, "sealed treeshaking flag");
    }

    fn transform(&self, source: &str, id: &str) -> Result<Option<TransformOutput>, TransformError> {
        let request = ModuleRequest::parse(id);

        if request.is_template() {
            let code = self
                .template
                .compile(source, self.component_case, self.treeshaking.get())
                .map_err(|source| TransformError::Template {
                    id: id.to_string(),
                    source,
                })?;
            return Ok(Some(TransformOutput::code(code)));
        }

        if self.treeshaking.get() && request.is_script() {
            let code = self
                .imports
                .map_imports(source)
                .map_err(|source| TransformError::ImportMap {
                    id: id.to_string(),
                    source,
                })?;
            return Ok(Some(TransformOutput::code(code)));
        }

        Ok(None)
    }
}
