//! Build-time bundler integration for the Vela component framework.
//!
//! The host asks this crate two questions per build: which transform stages
//! to register, and, per module, whether and how to rewrite its content:
//!
//! ```text
//! Options + HostContext -> compose -> [config, style?, script?] stages
//!                                          |
//!                        host lifecycle hooks per stage:
//!                        config / config_resolved / transform
//! ```
//!
//! Content compilers (preprocessor, template, import mapper) are injected
//! as a [`stage::Toolchain`]; the crate only decides whether and with what
//! parameters to invoke them.

pub mod config;
pub mod pipeline;
pub mod request;
pub mod stage;

pub use config::{
    BuildMode, ComponentCase, ConfigError, HostContext, Options, ResolvedBuildConfig, RunMode,
    SassVariables, SetupError,
};
pub use pipeline::{compose, Pipeline};
pub use request::{ModuleRequest, RequestKind, StyleDialect};
pub use stage::{BuildStage, StageOrder, Toolchain, TransformError, TransformOutput};
