use super::scene::SceneFrame;
use crate::diagnostics::SceneSummary;

/// Consumer of processed frames (display layer, planner, recorder).
pub trait SceneSink {
    fn emit(&mut self, index: u64, scene: &SceneFrame);
}

impl<F> SceneSink for F
where
    F: FnMut(u64, &SceneFrame),
{
    fn emit(&mut self, index: u64, scene: &SceneFrame) {
        self(index, scene)
    }
}

/// Keeps a [`SceneSummary`] per emitted frame.
#[derive(Clone, Debug, Default)]
pub struct SummarySink {
    pub summaries: Vec<SceneSummary>,
}

impl SceneSink for SummarySink {
    fn emit(&mut self, index: u64, scene: &SceneFrame) {
        self.summaries.push(SceneSummary::from_scene(index, scene));
    }
}
