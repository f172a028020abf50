//! Shared test utilities and recording mock collaborators.

#![allow(dead_code, unused_imports)]

use std::sync::{Arc, Mutex};

use vela_build::stage::{
    ImportMapper, StyleCompiler, TemplateCompiler, Toolchain, VariablesSource,
};
use vela_build::{ComponentCase, HostContext, StyleDialect};

/// Install a fmt subscriber once so `RUST_LOG=debug cargo test` shows the
/// pipeline diagnostics.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Style compiler that records every `(dialect, variables)` invocation.
#[derive(Default)]
pub struct RecordingStyleCompiler {
    pub calls: Mutex<Vec<(StyleDialect, VariablesSource)>>,
    fail: bool,
}

impl RecordingStyleCompiler {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

impl StyleCompiler for RecordingStyleCompiler {
    fn compile(
        &self,
        source: &str,
        dialect: StyleDialect,
        variables: &VariablesSource,
    ) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("stylesheet did not parse");
        }
        self.calls.lock().unwrap().push((dialect, variables.clone()));
        Ok(format!("/* compiled:{} */\n{source}", dialect.as_str()))
    }
}

/// Template compiler that records every `(case, treeshaking)` invocation.
#[derive(Default)]
pub struct RecordingTemplateCompiler {
    pub calls: Mutex<Vec<(ComponentCase, bool)>>,
    fail: bool,
}

impl RecordingTemplateCompiler {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

impl TemplateCompiler for RecordingTemplateCompiler {
    fn compile(
        &self,
        source: &str,
        case: ComponentCase,
        treeshaking: bool,
    ) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("unknown component tag");
        }
        self.calls.lock().unwrap().push((case, treeshaking));
        Ok(format!("/* render:{case:?}:{treeshaking} */\n{source}"))
    }
}

/// Import mapper that records each source it rewrote.
#[derive(Default)]
pub struct RecordingImportMapper {
    pub calls: Mutex<Vec<String>>,
}

impl ImportMapper for RecordingImportMapper {
    fn map_imports(&self, source: &str) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(source.to_string());
        Ok(format!("/* mapped */\n{source}"))
    }
}

/// A toolchain of recording mocks, with handles kept for inspection.
pub struct TestTools {
    pub style: Arc<RecordingStyleCompiler>,
    pub template: Arc<RecordingTemplateCompiler>,
    pub imports: Arc<RecordingImportMapper>,
}

impl TestTools {
    pub fn new() -> Self {
        Self {
            style: Arc::new(RecordingStyleCompiler::default()),
            template: Arc::new(RecordingTemplateCompiler::default()),
            imports: Arc::new(RecordingImportMapper::default()),
        }
    }

    pub fn toolchain(&self) -> Toolchain {
        Toolchain::new(
            self.style.clone(),
            self.template.clone(),
            self.imports.clone(),
        )
    }
}

/// A host context with the companion plugin registered.
pub fn host() -> HostContext {
    HostContext::new("/app").with_plugin("vue")
}
