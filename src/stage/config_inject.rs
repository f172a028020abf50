//! Config-injection stage - hands the derived fragment to the host.

use crate::config::{ConfigFragment, RunMode};
use crate::stage::{BuildStage, StageOrder};

/// Contributes the run-mode keyed configuration fragment at
/// configuration-merge time. Runs once, never per module, and does not
/// consult the request classifier.
pub struct ConfigInjectStage {
    fragment: ConfigFragment,
}

impl ConfigInjectStage {
    pub fn new(run_mode: RunMode) -> Self {
        Self {
            fragment: crate::config::resolve_build_config(run_mode),
        }
    }

    pub fn fragment(&self) -> &ConfigFragment {
        &self.fragment
    }
}

impl BuildStage for ConfigInjectStage {
    fn name(&self) -> &'static str {
        "vela:config"
    }

    fn order(&self) -> StageOrder {
        StageOrder::Pre
    }

    fn config(&self) -> Option<ConfigFragment> {
        Some(self.fragment.clone())
    }
}
