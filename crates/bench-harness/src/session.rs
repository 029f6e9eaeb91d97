//! A core instance wired to its callback table.

use console_core::{Callbacks, Configuration, ConstantTables, RuntimeState};

/// Anything the timing loop can reset and step.
pub trait Workload {
    /// Returns to the power-on baseline.
    fn reset(&mut self);

    /// Advances one step.
    fn iterate(&mut self);
}

/// Owns the mutable core state; borrows the shared configuration and tables.
#[derive(Debug)]
pub struct Session<'a, C> {
    configuration: &'a Configuration,
    constants: &'a ConstantTables,
    state: Box<RuntimeState>,
    callbacks: C,
}

impl<'a, C: Callbacks> Session<'a, C> {
    /// Builds a session. The state is allocated here, not on [`Self::reset`].
    #[must_use]
    pub fn new(
        configuration: &'a Configuration,
        constants: &'a ConstantTables,
        callbacks: C,
    ) -> Self {
        Self {
            configuration,
            constants,
            state: Box::new(RuntimeState::new()),
            callbacks,
        }
    }

    /// Current core state.
    #[must_use]
    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    /// The callback table.
    #[must_use]
    pub const fn callbacks(&self) -> &C {
        &self.callbacks
    }
}

impl<C: Callbacks> Workload for Session<'_, C> {
    fn reset(&mut self) {
        console_core::reset(
            self.configuration,
            self.constants,
            &mut self.state,
            &mut self.callbacks,
            false,
        );
    }

    fn iterate(&mut self) {
        console_core::iterate(
            self.configuration,
            self.constants,
            &mut self.state,
            &mut self.callbacks,
        );
    }
}
