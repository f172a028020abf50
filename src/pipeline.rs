//! Pipeline composer - ties the stages together for the host.

use crate::config::{
    check_peer_plugin, ConfigFragment, HostContext, Options, ResolvedBuildConfig, RunMode,
    SetupError,
};
use crate::stage::{
    BuildStage, ConfigInjectStage, ScriptStage, StyleStage, Toolchain, TransformError,
    TransformOutput,
};

/// The ordered list of stages to register with the host.
pub struct Pipeline {
    stages: Vec<Box<dyn BuildStage>>,
}

/// Build the stage list from merged options.
///
/// This is the main entry point of the plugin. The peer-plugin precondition
/// is checked before anything registers; the config resolver runs once,
/// here, at setup time. Stage inclusion rules:
///
/// - config-injection: always, and always first
/// - stylesheet-rewrite: iff the stylesheet-variables option is truthy
/// - script/template-rewrite: unless run mode is `ssr-server`
pub fn compose(
    options: &Options,
    host: &HostContext,
    tools: &Toolchain,
) -> Result<Pipeline, SetupError> {
    options.validate()?;
    check_peer_plugin(host)?;

    let mut stages: Vec<Box<dyn BuildStage>> =
        vec![Box::new(ConfigInjectStage::new(options.run_mode))];

    if options.sass_variables.is_enabled() {
        stages.push(Box::new(StyleStage::new(
            &options.sass_variables,
            host.root(),
            tools.style.clone(),
        )));
    }

    if options.run_mode != RunMode::SsrServer {
        stages.push(Box::new(ScriptStage::new(
            options.auto_import_component_case,
            options.dev_treeshaking,
            tools.template.clone(),
            tools.imports.clone(),
        )));
    }

    // Declared priority decides the final order. The sort is stable, so the
    // config stage stays ahead of the other `Pre` stage and its fragment is
    // visible to the host before any content transform runs.
    stages.sort_by_key(|stage| stage.order());

    tracing::debug!(
        run_mode = options.run_mode.as_str(),
        stages = ?stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
        "composed build pipeline"
    );

    Ok(Pipeline { stages })
}

impl Pipeline {
    pub fn stages(&self) -> &[Box<dyn BuildStage>] {
        &self.stages
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Collect the configuration-merge fragments, in stage order.
    pub fn config_fragments(&self) -> Vec<ConfigFragment> {
        self.stages.iter().filter_map(|stage| stage.config()).collect()
    }

    /// Broadcast configuration finalization to every stage. The host calls
    /// this exactly once, before any per-module transform.
    pub fn finalize(&self, resolved: &ResolvedBuildConfig) {
        for stage in &self.stages {
            stage.config_resolved(resolved);
        }
    }

    /// Run one module through the stages in order, feeding each rewrite
    /// forward. `Ok(None)` means no stage touched the module.
    pub fn transform_module(
        &self,
        id: &str,
        source: &str,
    ) -> Result<Option<TransformOutput>, TransformError> {
        let mut current: Option<TransformOutput> = None;

        for stage in &self.stages {
            let input = current.as_ref().map_or(source, |out| out.code.as_str());
            if let Some(output) = stage.transform(input, id)? {
                current = Some(output);
            }
        }

        Ok(current)
    }
}
