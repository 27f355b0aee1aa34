use std::fmt;

/// Lifecycle of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Running,
    Draining,
    Done,
}

impl DispatchState {
    /// The state that follows this one. `Done` is terminal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            DispatchState::Idle => DispatchState::Running,
            DispatchState::Running => DispatchState::Draining,
            DispatchState::Draining | DispatchState::Done => DispatchState::Done,
        }
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DispatchState::Idle => "idle",
            DispatchState::Running => "running",
            DispatchState::Draining => "draining",
            DispatchState::Done => "done",
        };
        f.write_str(label)
    }
}
