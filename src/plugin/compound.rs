//! Pairwise plugin composition.

use std::sync::Arc;

use crate::http::request::RequestArguments;
use crate::plugin::{NoopPlugin, Plugin, RequestExecution};

/// Runs `left` inside `right` on both hooks.
pub struct CompoundPlugin {
    left: Arc<dyn Plugin>,
    right: Arc<dyn Plugin>,
}

impl CompoundPlugin {
    pub fn new(left: Arc<dyn Plugin>, right: Arc<dyn Plugin>) -> Self {
        Self { left, right }
    }
}

impl Plugin for CompoundPlugin {
    fn prepare(&self, arguments: &RequestArguments, execution: RequestExecution) -> RequestExecution {
        self.right
            .prepare(arguments, self.left.prepare(arguments, execution))
    }

    fn apply(&self, arguments: &RequestArguments, execution: RequestExecution) -> RequestExecution {
        self.right.apply(arguments, self.left.apply(arguments, execution))
    }
}

/// Fold plugins left to right; the last one ends up outermost. No plugins yields `NoopPlugin`.
pub fn compose(plugins: impl IntoIterator<Item = Arc<dyn Plugin>>) -> Arc<dyn Plugin> {
    plugins
        .into_iter()
        .reduce(|left, right| Arc::new(CompoundPlugin::new(left, right)) as Arc<dyn Plugin>)
        .unwrap_or_else(|| Arc::new(NoopPlugin))
}
