//! Stage lifecycle hooks.

use clientgen_core::{GenerationRequest, Result, Stage};

/// A plugin that can hook into a generation run.
///
/// Plugins are called before and after every stage that touches the
/// workspace. Returning an error from a hook aborts the run; the workspace is
/// still torn down.
///
/// # Example
///
/// ```ignore
/// struct TimingPlugin {
///     started: Mutex<HashMap<Stage, Instant>>,
/// }
///
/// impl Plugin for TimingPlugin {
///     fn name(&self) -> &'static str { "timing" }
///
///     fn on_before_stage(&self, stage: Stage, _req: &GenerationRequest) -> Result<()> {
///         self.started.lock().unwrap().insert(stage, Instant::now());
///         Ok(())
///     }
///
///     fn on_after_stage(&self, stage: Stage, _req: &GenerationRequest) -> Result<()> {
///         if let Some(start) = self.started.lock().unwrap().get(&stage) {
///             println!("{} took {:?}", stage, start.elapsed());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Called before a stage runs.
    #[allow(unused_variables)]
    fn on_before_stage(&self, stage: Stage, request: &GenerationRequest) -> Result<()> {
        Ok(())
    }

    /// Called after a stage completes successfully.
    #[allow(unused_variables)]
    fn on_after_stage(&self, stage: Stage, request: &GenerationRequest) -> Result<()> {
        Ok(())
    }
}
