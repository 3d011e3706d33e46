use std::cell::Cell;

/// Run state shared by a host's loop callbacks and its teardown.
///
/// A loop can halt itself (after an error) without tearing anything down;
/// teardown still has to run exactly once afterwards.
#[derive(Debug, Default)]
pub struct Lifecycle {
    halted: Cell<bool>,
    stopped: Cell<bool>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether callbacks should keep mutating the game.
    pub fn is_running(&self) -> bool {
        !self.halted.get() && !self.stopped.get()
    }

    /// Quiet every callback. Teardown is still owed.
    pub fn halt(&self) {
        self.halted.set(true);
    }

    /// Returns true exactly once; that caller must release the host's resources.
    pub fn begin_stop(&self) -> bool {
        !self.stopped.replace(true)
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_lifecycle_is_running() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.is_running());
        assert!(!lifecycle.is_stopped());
    }

    #[test]
    fn test_halted_loop_still_gets_teardown() {
        let lifecycle = Lifecycle::new();
        lifecycle.halt();

        assert!(!lifecycle.is_running());
        assert!(lifecycle.begin_stop(), "teardown must run after a halt");
        assert!(lifecycle.is_stopped());
    }

    #[test]
    fn test_teardown_runs_once() {
        let lifecycle = Lifecycle::new();

        assert!(lifecycle.begin_stop());
        assert!(!lifecycle.begin_stop());
        assert!(!lifecycle.is_running());
    }
}
