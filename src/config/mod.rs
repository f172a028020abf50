//! Plugin options and host build-configuration resolution.
//!
//! [`Options`] is constructed once per build invocation (defaults merged
//! with user input, per-field) and stays immutable for the run. The
//! resolver derives the host configuration fragment keyed by run mode and
//! validates the companion-plugin precondition.

mod loader;
mod resolver;
mod types;

pub use loader::ConfigError;
pub use resolver::{
    check_peer_plugin, resolve_build_config, Alias, BuildMode, ConfigFragment, HostContext,
    ResolvedBuildConfig, SetupError, PEER_PLUGIN,
};
pub use types::{ComponentCase, Options, RunMode, SassVariables};

pub(crate) use resolver::normalize_path;
