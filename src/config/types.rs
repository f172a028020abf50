use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;

/// Target deployment context for the produced bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Browser bundle of a client-only app.
    WebClient,
    /// Node bundle serving pre-rendered pages.
    WebServer,
    /// Server-side-rendering bundle, no client runtime.
    SsrServer,
}

impl RunMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            RunMode::WebClient => "web-client",
            RunMode::WebServer => "web-server",
            RunMode::SsrServer => "ssr-server",
        }
    }
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "web-client" => Ok(RunMode::WebClient),
            "web-server" => Ok(RunMode::WebServer),
            "ssr-server" => Ok(RunMode::SsrServer),
            other => Err(ConfigError::InvalidRunMode {
                value: other.to_string(),
            }),
        }
    }
}

/// Casing convention for auto-imported component tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentCase {
    /// `<ve-btn>`
    Kebab,
    /// `<VeBtn>`
    Pascal,
}

/// Source of the framework variables injected ahead of user stylesheets.
///
/// `true` uses the framework defaults, `false` disables the stylesheet stage
/// entirely, a path points at a user variables file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SassVariables {
    Enabled(bool),
    File(PathBuf),
}

impl SassVariables {
    /// Whether the stylesheet-rewrite stage should be registered at all.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, SassVariables::Enabled(false))
    }
}

/// User-facing plugin options.
///
/// Field names mirror what the host config file uses (camelCase). Every
/// field has a default, so a partially specified record merges per-field:
/// user values win, unspecified fields keep defaults. Immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub run_mode: RunMode,
    pub auto_import_component_case: ComponentCase,
    pub sass_variables: SassVariables,
    pub dev_treeshaking: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            run_mode: RunMode::WebClient,
            auto_import_component_case: ComponentCase::Kebab,
            sass_variables: SassVariables::Enabled(true),
            dev_treeshaking: false,
        }
    }
}

impl Options {
    /// Override the run mode.
    pub fn with_run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    /// Override the auto-import component casing.
    pub fn with_component_case(mut self, case: ComponentCase) -> Self {
        self.auto_import_component_case = case;
        self
    }

    /// Override the stylesheet variables source.
    pub fn with_sass_variables(mut self, variables: SassVariables) -> Self {
        self.sass_variables = variables;
        self
    }

    /// Override the development treeshaking toggle.
    pub fn with_dev_treeshaking(mut self, enabled: bool) -> Self {
        self.dev_treeshaking = enabled;
        self
    }
}
