//! Single-in-flight run gate.

/// Regeneration state of the watch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Regenerating,
    /// A qualifying change arrived while regenerating; one more run is owed.
    PendingRerun,
}

/// Serializes regeneration: at most one run in flight, and any number of
/// changes during a run collapse into a single follow-up.
#[derive(Debug, Clone)]
pub struct RunGate {
    state: RunState,
}

impl Default for RunGate {
    fn default() -> Self {
        Self::new()
    }
}

impl RunGate {
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Ask for a run. Returns `true` if the caller should start one now;
    /// otherwise the request is folded into the pending follow-up.
    pub fn request(&mut self) -> bool {
        match self.state {
            RunState::Idle => {
                self.state = RunState::Regenerating;
                true
            }
            RunState::Regenerating | RunState::PendingRerun => {
                self.state = RunState::PendingRerun;
                false
            }
        }
    }

    /// Mark the current run as finished. Returns `true` if a follow-up run
    /// must start immediately (the gate stays in `Regenerating`).
    pub fn finish(&mut self) -> bool {
        match self.state {
            RunState::PendingRerun => {
                self.state = RunState::Regenerating;
                true
            }
            RunState::Idle | RunState::Regenerating => {
                self.state = RunState::Idle;
                false
            }
        }
    }
}
