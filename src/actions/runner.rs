//! Action Executor port.

use std::cell::RefCell;
use std::rc::Rc;

/// One-way call into the external action-execution service.
///
/// `run` is fire-and-forget: it must not block the caller, and whether the
/// action ultimately succeeds is invisible to game logic. Implementations
/// log failures on their own side.
pub trait ActionRunner {
    /// Request execution of the action with the given entity id.
    fn run(&self, entity_id: &str);
}

/// Runner that does nothing. The inert default for sessions without an
/// external executor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRunner;

impl ActionRunner for NoopRunner {
    fn run(&self, _entity_id: &str) {}
}

/// Runner that records every call, for tests.
///
/// Clones share the call log.
#[derive(Clone, Debug, Default)]
pub struct RecordingRunner {
    calls: Rc<RefCell<Vec<String>>>,
}

impl RecordingRunner {
    /// Create a runner with an empty call log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entity ids run so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Drain the call log.
    pub fn take_calls(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

impl ActionRunner for RecordingRunner {
    fn run(&self, entity_id: &str) {
        self.calls.borrow_mut().push(entity_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_runner_shares_log_across_clones() {
        let runner = RecordingRunner::new();
        let handle = runner.clone();

        runner.run("script.a");
        handle.run("script.b");

        assert_eq!(runner.calls(), vec!["script.a", "script.b"]);
        assert_eq!(runner.take_calls().len(), 2);
        assert!(runner.calls().is_empty());
    }
}
