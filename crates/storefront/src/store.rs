use tracing::debug;

/// A state value with a pure transition function.
pub trait Reducer: Clone + core::fmt::Debug {
    type Action: core::fmt::Debug;

    /// Stable name used in logs (e.g. "cart").
    const NAME: &'static str;

    /// Compute the next state. Must not mutate `self`.
    fn reduce(&self, action: &Self::Action) -> Self;
}

/// Owner of one reducer state.
#[derive(Debug, Clone, Default)]
pub struct Store<S: Reducer> {
    state: S,
    revision: u64,
}

impl<S: Reducer> Store<S> {
    pub fn new(state: S) -> Self {
        Self { state, revision: 0 }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Number of dispatched actions.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: S::Action) -> &S {
        debug!(store = S::NAME, revision = self.revision, ?action, "dispatch");
        self.state = self.state.reduce(&action);
        self.revision += 1;
        &self.state
    }
}
