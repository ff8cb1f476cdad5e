use std::fmt;

use super::errors::FlowError;

/// Where a passkey flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowState {
    Idle,
    /// Waiting for the server's begin response
    OptionsRequested,
    /// Waiting for the platform ceremony
    PlatformCeremonyPending,
    /// Waiting for the server's finish response
    ResponseSubmitted,
    Complete,
    Failed,
}

impl FlowState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }

    /// Whether `self -> next` is a legal transition.
    ///
    /// The happy path is strictly linear; any in-flight state may fail.
    pub fn can_transition_to(self, next: FlowState) -> bool {
        use FlowState::*;
        match (self, next) {
            (Idle, OptionsRequested)
            | (OptionsRequested, PlatformCeremonyPending)
            | (PlatformCeremonyPending, ResponseSubmitted)
            | (ResponseSubmitted, Complete) => true,
            (OptionsRequested | PlatformCeremonyPending | ResponseSubmitted, Failed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::OptionsRequested => "OptionsRequested",
            Self::PlatformCeremonyPending => "PlatformCeremonyPending",
            Self::ResponseSubmitted => "ResponseSubmitted",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// Current state of a flow plus every state it has passed through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowTracker {
    state: FlowState,
    history: Vec<FlowState>,
}

impl Default for FlowTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowTracker {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            history: vec![FlowState::Idle],
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// States visited so far, starting with `Idle`.
    pub fn history(&self) -> &[FlowState] {
        &self.history
    }

    pub fn advance(&mut self, next: FlowState) -> Result<(), FlowError> {
        if !self.state.can_transition_to(next) {
            return Err(FlowError::InvalidFlowState(self.state));
        }
        tracing::debug!("Passkey flow: {} -> {}", self.state, next);
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Moves an in-flight flow to `Failed`. No-op for `Idle` and terminal states.
    pub fn fail(&mut self) {
        if self.state.can_transition_to(FlowState::Failed) {
            tracing::debug!("Passkey flow: {} -> {}", self.state, FlowState::Failed);
            self.state = FlowState::Failed;
            self.history.push(FlowState::Failed);
        }
    }

    /// Returns the tracker to `Idle`, discarding the history.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
