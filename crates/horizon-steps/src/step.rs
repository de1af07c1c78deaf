//! Steps and their visual state.

use serde::{Deserialize, Serialize};

/// One stage of a linear progression.
///
/// Steps have no identity beyond their position in the owning sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Title shown under the step marker.
    pub title: String,
    /// Optional icon name drawn inside the marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Step {
    /// Create a step with a title and no icon.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: None,
        }
    }

    /// Attach an icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

impl From<&str> for Step {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for Step {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

/// Visual state of a step relative to the current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    /// The step lies ahead of the current one.
    Uncompleted,
    /// The step is the current one.
    Current,
    /// The step lies behind the current one.
    Completed,
}

/// Color class a state is drawn with unless the theme overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Muted color shared by uncompleted and current steps.
    Disabled,
    /// Accent color of completed steps.
    Primary,
}

impl StepState {
    /// The default color class of this state.
    ///
    /// Uncompleted and current steps share the disabled treatment, completed
    /// steps use the primary color.
    pub fn color_role(self) -> ColorRole {
        match self {
            Self::Uncompleted | Self::Current => ColorRole::Disabled,
            Self::Completed => ColorRole::Primary,
        }
    }
}

/// Resolve the state of the step at `index`.
///
/// `count` is the number of steps; an empty sequence has no current step, so
/// every index resolves to [`StepState::Uncompleted`].
///
/// ```
/// use horizon_steps::{resolve, StepState};
///
/// assert_eq!(resolve(0, 1, 3), StepState::Completed);
/// assert_eq!(resolve(1, 1, 3), StepState::Current);
/// assert_eq!(resolve(2, 1, 3), StepState::Uncompleted);
/// assert_eq!(resolve(0, 0, 0), StepState::Uncompleted);
/// ```
pub fn resolve(index: usize, current_index: usize, count: usize) -> StepState {
    if count == 0 {
        return StepState::Uncompleted;
    }

    match index.cmp(&current_index) {
        std::cmp::Ordering::Less => StepState::Completed,
        std::cmp::Ordering::Equal => StepState::Current,
        std::cmp::Ordering::Greater => StepState::Uncompleted,
    }
}
