use crate::models::ViewState;

/// Rendering boundary. The orchestrator never touches a view directly;
/// it hands every new `ViewState` to a sink.
///
/// `render` is called while the orchestrator's state lock is held, so
/// implementations must not call back into the orchestrator.
pub trait ViewSink: Send + Sync {
    fn render(&self, view: &ViewState);
}
