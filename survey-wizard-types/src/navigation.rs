use std::collections::BTreeSet;

/// Error type for navigation transitions that violate their preconditions.
///
/// A wired-up presentation layer disables the offending control before the
/// transition can be requested, so these indicate a driver bug and should
/// not be swallowed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// `back` requested on the first step.
    #[error("Cannot step back from the first step")]
    AtFirstStep,

    /// `next` or `skip` requested after all steps were traversed.
    #[error("All {step_count} steps are already complete")]
    AtTerminal { step_count: usize },

    /// `skip` requested on a step that is not optional.
    #[error("Cannot skip step {step}: it is not optional")]
    NotOptional { step: usize },
}

/// A navigation transition request, as raised by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Advance to the next step.
    Next,
    /// Return to the previous step.
    Back,
    /// Skip the current optional step.
    Skip,
    /// Return to the first step.
    Reset,
}

/// The wizard's step state: the active step index and the set of skipped
/// steps.
///
/// `Navigation` is an immutable value. Every transition takes the current
/// state and returns the next one wholesale, so there is no window where
/// the step index and the skipped set disagree. `active_step` ranges over
/// `[0, step_count]`; `step_count` itself is the terminal "all complete"
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    active_step: usize,
    skipped: BTreeSet<usize>,
    optional: BTreeSet<usize>,
    step_count: usize,
}

impl Navigation {
    /// Start at the first step of a wizard with `step_count` steps, none of
    /// them optional.
    pub fn new(step_count: usize) -> Self {
        Self::with_optional_steps(step_count, [])
    }

    /// Start with the given step indices marked optional (skippable).
    pub fn with_optional_steps(
        step_count: usize,
        optional: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            active_step: 0,
            skipped: BTreeSet::new(),
            optional: optional.into_iter().filter(|&s| s < step_count).collect(),
            step_count,
        }
    }

    /// Get the active step index.
    pub fn active_step(&self) -> usize {
        self.active_step
    }

    /// Get the number of steps.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Check if all steps were traversed (the wizard shows its completion
    /// view).
    pub fn is_complete(&self) -> bool {
        self.active_step == self.step_count
    }

    /// Check if a step was skipped.
    pub fn is_skipped(&self, step: usize) -> bool {
        self.skipped.contains(&step)
    }

    /// Check if a step is optional.
    pub fn is_optional(&self, step: usize) -> bool {
        self.optional.contains(&step)
    }

    /// Advance to the next step, unmarking the current step if it was
    /// previously skipped. Advancing past the last step enters the
    /// terminal state.
    pub fn next(&self) -> Result<Self, NavigationError> {
        if self.is_complete() {
            return Err(NavigationError::AtTerminal {
                step_count: self.step_count,
            });
        }
        let mut next = self.clone();
        next.skipped.remove(&next.active_step);
        next.active_step += 1;
        Ok(next)
    }

    /// Return to the previous step. Skip markings are untouched.
    pub fn back(&self) -> Result<Self, NavigationError> {
        if self.active_step == 0 {
            return Err(NavigationError::AtFirstStep);
        }
        let mut back = self.clone();
        back.active_step -= 1;
        Ok(back)
    }

    /// Skip the current step: mark it skipped, then advance. Only valid on
    /// an optional step.
    pub fn skip(&self) -> Result<Self, NavigationError> {
        if self.is_complete() {
            return Err(NavigationError::AtTerminal {
                step_count: self.step_count,
            });
        }
        if !self.is_optional(self.active_step) {
            return Err(NavigationError::NotOptional {
                step: self.active_step,
            });
        }
        let mut next = self.clone();
        next.skipped.insert(next.active_step);
        next.active_step += 1;
        Ok(next)
    }

    /// Return to the first step. The skipped set is untouched.
    pub fn reset(&self) -> Self {
        Self {
            active_step: 0,
            ..self.clone()
        }
    }

    /// Apply a transition event.
    pub fn apply(&self, event: NavEvent) -> Result<Self, NavigationError> {
        match event {
            NavEvent::Next => self.next(),
            NavEvent::Back => self.back(),
            NavEvent::Skip => self.skip(),
            NavEvent::Reset => Ok(self.reset()),
        }
    }
}
