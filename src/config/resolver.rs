//! Host build-configuration derivation.
//!
//! Produces the configuration fragment the host merges at
//! configuration-merge time: module-resolution aliases re-pointing the
//! framework dist bundle and platform shim per run mode, plus compile-time
//! defines. Also owns the one fatal setup precondition, the companion SFC
//! compiler plugin check.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::loader::ConfigError;
use crate::config::types::RunMode;

/// Name the companion SFC compiler plugin registers under in the host.
pub const PEER_PLUGIN: &str = "vue";

/// Errors that abort pipeline setup. No partial or degraded mode exists:
/// setup either yields a full pipeline or fails before any stage registers.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Companion plugin '{expected}' not found in host plugin list; register it before the Vela plugin")]
    MissingPeerPlugin { expected: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What the host exposes to the plugin at setup time.
#[derive(Debug, Clone)]
pub struct HostContext {
    root: PathBuf,
    plugins: Vec<String>,
}

impl HostContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            plugins: Vec::new(),
        }
    }

    /// Record a plugin already registered with the host.
    pub fn with_plugin(mut self, name: impl Into<String>) -> Self {
        self.plugins.push(name.into());
        self
    }

    /// Project root all relative option paths resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p == name)
    }
}

/// Host build mode as resolved at configuration-finalization time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

/// Finalized host configuration, handed to every stage's `config_resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBuildConfig {
    pub mode: BuildMode,
}

/// One module-resolution alias for the host to install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    pub find: String,
    pub replacement: String,
}

/// Configuration fragment contributed at configuration-merge time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigFragment {
    pub aliases: Vec<Alias>,
    pub defines: BTreeMap<String, serde_json::Value>,
}

/// Verify the companion SFC compiler plugin is registered with the host.
/// Its absence is the one fatal, non-recoverable setup failure.
pub fn check_peer_plugin(host: &HostContext) -> Result<(), SetupError> {
    if host.has_plugin(PEER_PLUGIN) {
        return Ok(());
    }

    tracing::error!(
        expected = PEER_PLUGIN,
        "companion plugin missing from host plugin list; add it before the Vela plugin"
    );
    Err(SetupError::MissingPeerPlugin {
        expected: PEER_PLUGIN,
    })
}

/// Derive the run-mode keyed configuration fragment.
pub fn resolve_build_config(run_mode: RunMode) -> ConfigFragment {
    let server = run_mode != RunMode::WebClient;

    let dist = if server {
        "vela/dist/vela.server.mjs"
    } else {
        "vela/dist/vela.client.mjs"
    };
    let platform = if server {
        "vela/platform/node.mjs"
    } else {
        "vela/platform/web.mjs"
    };

    let mut defines = BTreeMap::new();
    defines.insert("__VELA_CLIENT__".to_string(), serde_json::Value::Bool(!server));
    defines.insert("__VELA_SERVER__".to_string(), serde_json::Value::Bool(server));
    defines.insert(
        "__VELA_SSR__".to_string(),
        serde_json::Value::Bool(run_mode == RunMode::SsrServer),
    );

    ConfigFragment {
        // Longest prefix first so the shim alias wins over the bare package.
        aliases: vec![
            Alias {
                find: "vela/platform".to_string(),
                replacement: platform.to_string(),
            },
            Alias {
                find: "vela".to_string(),
                replacement: dist.to_string(),
            },
        ],
        defines,
    }
}

/// Anchor `path` at `root` and fold `.` / `..` components lexically.
///
/// No filesystem access: the variables file doesn't have to exist yet at
/// setup time.
pub(crate) fn normalize_path(root: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !matches!(
                    normalized.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_))
                ) {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
