//! Shared progression state.
//!
//! [`ProgressionState`] is the single source of truth of one step indicator:
//! the ordered steps and the current index. The embedding application is its
//! only writer; separators, markers and views observe it through
//! [`ProgressionState::index_changed`].
//!
//! # Example
//!
//! ```
//! use horizon_steps::{ProgressionState, StepState};
//!
//! let state = ProgressionState::from_titles(["Cart", "Shipping", "Payment"]);
//! state.index_changed.connect(|index| println!("now on step {index}"));
//!
//! state.advance();
//! assert_eq!(state.current_index(), 1);
//! assert_eq!(state.step_state(0), StepState::Completed);
//!
//! state.set_current_index(10).unwrap(); // clamped to the last step
//! assert_eq!(state.current_index(), 2);
//! ```

use horizon_steps_core::logging::targets;
use horizon_steps_core::{Property, ReadOnlyProperty, Signal};
use serde::{Deserialize, Serialize};

use crate::error::ProgressionError;
use crate::step::{Step, StepState, resolve};

/// What [`ProgressionState::set_current_index`] does with an index outside
/// `0..len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// Clamp into `0..len`. The indicator can never become unrenderable.
    #[default]
    Clamp,
    /// Return [`ProgressionError::IndexOutOfRange`] and leave the state as is.
    Reject,
}

/// The ordered steps and the current index of one indicator.
pub struct ProgressionState {
    steps: Vec<Step>,
    current_index: Property<usize>,
    policy: IndexPolicy,

    /// Emitted with the new index after every actual change.
    pub index_changed: Signal<usize>,
}

impl ProgressionState {
    /// Create a state over `steps`, starting at the first step.
    pub fn new(steps: Vec<Step>) -> Self {
        Self::with_policy(steps, IndexPolicy::default())
    }

    /// Create a state with an explicit out-of-range policy.
    pub fn with_policy(steps: Vec<Step>, policy: IndexPolicy) -> Self {
        Self {
            steps,
            current_index: Property::new(0),
            policy,
            index_changed: Signal::new(),
        }
    }

    /// Create a state from plain titles.
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(titles.into_iter().map(Step::new).collect())
    }

    /// Create a state from arbitrary items, mapping each one to a step.
    pub fn from_data<T, F>(items: &[T], mut to_step: F) -> Self
    where
        F: FnMut(&T) -> Step,
    {
        Self::new(items.iter().map(|item| to_step(item)).collect())
    }

    /// The steps, in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The out-of-range policy.
    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// The current index.
    pub fn current_index(&self) -> usize {
        self.current_index.get()
    }

    /// A read-only handle on the current index for observers that must not
    /// move it.
    pub fn current_index_property(&self) -> ReadOnlyProperty<'_, usize> {
        ReadOnlyProperty::new(&self.current_index)
    }

    /// The current step, `None` for an empty sequence.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps.get(self.current_index())
    }

    /// Check if the current step is the first one.
    pub fn is_first(&self) -> bool {
        self.current_index() == 0
    }

    /// Check if the current step is the last one (or there are no steps).
    pub fn is_last(&self) -> bool {
        self.current_index() + 1 >= self.steps.len()
    }

    /// The state of the step at `index`, resolved against the current index.
    pub fn step_state(&self, index: usize) -> StepState {
        resolve(index, self.current_index(), self.steps.len())
    }

    /// Move to `index`.
    ///
    /// Out-of-range indices are clamped or rejected according to the policy.
    /// Returns `Ok(true)` if the index changed, in which case
    /// [`index_changed`](Self::index_changed) has been emitted.
    pub fn set_current_index(&self, index: usize) -> Result<bool, ProgressionError> {
        let len = self.steps.len();
        let target = if index < len {
            index
        } else {
            match self.policy {
                IndexPolicy::Clamp => {
                    let clamped = len.saturating_sub(1);
                    tracing::warn!(
                        target: targets::STATE,
                        index,
                        len,
                        clamped,
                        "step index out of range, clamping"
                    );
                    clamped
                }
                IndexPolicy::Reject => {
                    tracing::warn!(target: targets::STATE, index, len, "step index out of range, rejected");
                    return Err(ProgressionError::IndexOutOfRange { index, len });
                }
            }
        };

        Ok(self.apply(target))
    }

    /// Move to the next step. No-op on the last step.
    ///
    /// Returns `true` if the index changed.
    pub fn advance(&self) -> bool {
        if self.is_last() {
            return false;
        }
        self.apply(self.current_index() + 1)
    }

    /// Move to the previous step. No-op on the first step.
    ///
    /// Returns `true` if the index changed.
    pub fn retreat(&self) -> bool {
        if self.is_first() {
            return false;
        }
        self.apply(self.current_index() - 1)
    }

    fn apply(&self, index: usize) -> bool {
        match self.current_index.replace(index) {
            Some(previous) => {
                tracing::debug!(target: targets::STATE, previous, current = index, "step index changed");
                self.index_changed.emit(index);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for ProgressionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressionState")
            .field("steps", &self.steps)
            .field("current_index", &self.current_index())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    fn three_steps() -> ProgressionState {
        ProgressionState::from_titles(["First", "Second", "Third"])
    }

    fn record(state: &ProgressionState) -> Arc<Mutex<Vec<usize>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        state.index_changed.connect(move |&index| sink.lock().push(index));
        seen
    }

    #[test]
    fn test_starts_at_first_step() {
        let state = three_steps();
        assert_eq!(state.current_index(), 0);
        assert!(state.is_first());
        assert!(!state.is_last());
        assert_eq!(state.current_step().map(|s| s.title.as_str()), Some("First"));
    }

    #[test]
    fn test_set_current_index_is_idempotent() {
        let state = three_steps();
        let seen = record(&state);

        assert_eq!(state.set_current_index(1), Ok(true));
        assert_eq!(state.set_current_index(1), Ok(false));
        assert_eq!(state.current_index(), 1);
        assert_eq!(*seen.lock(), vec![1]);
    }

    #[test]
    fn test_clamps_out_of_range() {
        let state = three_steps();
        assert_eq!(state.set_current_index(7), Ok(true));
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.set_current_index(usize::MAX), Ok(false));
    }

    #[test]
    fn test_reject_policy() {
        let state = ProgressionState::with_policy(
            vec![Step::new("a"), Step::new("b")],
            IndexPolicy::Reject,
        );
        let seen = record(&state);

        assert_eq!(
            state.set_current_index(2),
            Err(ProgressionError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(state.current_index(), 0);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_advance_and_retreat_stop_at_ends() {
        let state = three_steps();
        let seen = record(&state);

        assert!(!state.retreat());
        assert_eq!(state.current_index(), 0);

        assert!(state.advance());
        assert!(state.advance());
        assert!(state.is_last());
        assert!(!state.advance());
        assert_eq!(state.current_index(), 2);

        assert!(state.retreat());
        assert_eq!(*seen.lock(), vec![1, 2, 1]);
    }

    #[test]
    fn test_step_state_follows_index() {
        let state = three_steps();
        state.set_current_index(1).unwrap();

        assert_eq!(state.step_state(0), StepState::Completed);
        assert_eq!(state.step_state(1), StepState::Current);
        assert_eq!(state.step_state(2), StepState::Uncompleted);
    }

    #[test]
    fn test_read_only_index_tracks_changes() {
        let state = three_steps();
        let index = state.current_index_property();
        assert_eq!(index.get(), 0);

        state.advance();
        state.advance();
        assert_eq!(index.get(), 2);
    }

    #[test]
    fn test_empty_sequence() {
        let state = ProgressionState::new(Vec::new());
        assert!(state.is_empty());
        assert!(state.is_last());
        assert!(state.current_step().is_none());
        assert!(!state.advance());
        assert!(!state.retreat());
        assert_eq!(state.set_current_index(3), Ok(false));
        assert_eq!(state.step_state(0), StepState::Uncompleted);
    }

    #[test]
    fn test_from_data() {
        struct Page {
            name: &'static str,
            icon: &'static str,
        }
        let pages = [
            Page { name: "Account", icon: "person" },
            Page { name: "Review", icon: "eye" },
        ];

        let state = ProgressionState::from_data(&pages, |page| Step::new(page.name).with_icon(page.icon));
        assert_eq!(state.len(), 2);
        assert_eq!(state.steps()[1].icon.as_deref(), Some("eye"));
    }
}
