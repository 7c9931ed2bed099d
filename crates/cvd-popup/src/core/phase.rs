//! Setup/operating state machine.
//!
//! # Design
//! - The phase is explicit state on the controller, not re-derived from class membership.
//! - Transitions are pure functions so the rendering code only reads the result.

/// Step within the setup flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupStep {
    /// No type chosen yet; only the selector is usable.
    ChooseType,
    /// A type is chosen; severity and reset are usable.
    AdjustSeverity,
}

impl SetupStep {
    /// Step implied by the current selection.
    #[must_use]
    pub const fn for_selection(has_selection: bool) -> Self {
        if has_selection {
            Self::AdjustSeverity
        } else {
            Self::ChooseType
        }
    }
}

/// High-level popup phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupPhase {
    /// Setup confirmed; main controls are live.
    Operating,
    /// Setup in progress.
    Setup(SetupStep),
}

impl Default for PopupPhase {
    fn default() -> Self {
        Self::Setup(SetupStep::ChooseType)
    }
}

impl PopupPhase {
    /// Whether setup has been confirmed (the container is "activated").
    #[must_use]
    pub const fn is_activated(self) -> bool {
        matches!(self, Self::Operating)
    }

    /// Re-evaluate the setup step after the selection changed. Operating is unaffected.
    #[must_use]
    pub const fn select(self, has_selection: bool) -> Self {
        match self {
            Self::Operating => Self::Operating,
            Self::Setup(_) => Self::Setup(SetupStep::for_selection(has_selection)),
        }
    }

    /// Enter (or restart) setup.
    #[must_use]
    pub const fn enter_setup(self, has_selection: bool) -> Self {
        Self::Setup(SetupStep::for_selection(has_selection))
    }

    /// Leave setup, confirming or cancelling it. Without a selected type the popup stays on
    /// the first setup step.
    #[must_use]
    pub const fn close_setup(self, has_selection: bool) -> Self {
        if has_selection {
            Self::Operating
        } else {
            Self::Setup(SetupStep::ChooseType)
        }
    }

    /// Whether the enable, delta and setup controls accept input.
    #[must_use]
    pub const fn main_controls_enabled(self) -> bool {
        self.is_activated()
    }

    /// Whether severity and reset accept input.
    #[must_use]
    pub const fn step_two_enabled(self) -> bool {
        matches!(self, Self::Setup(SetupStep::AdjustSeverity))
    }
}

/// Settings captured when setup is entered, restored if it is cancelled.
#[derive(Clone, Debug, PartialEq)]
pub struct RestoreSnapshot {
    /// Stored type value at the time setup began (may be empty).
    pub cvd_type: String,
    /// Stored severity at the time setup began.
    pub severity: f64,
}

#[cfg(test)]
mod tests {
    use super::{PopupPhase, SetupStep};

    #[test]
    fn selection_moves_between_setup_steps() {
        let phase = PopupPhase::default();
        let phase = phase.select(true);
        assert_eq!(phase, PopupPhase::Setup(SetupStep::AdjustSeverity));
        assert!(phase.step_two_enabled());
        let phase = phase.select(false);
        assert_eq!(phase, PopupPhase::Setup(SetupStep::ChooseType));
        assert!(!phase.step_two_enabled());
        assert!(!phase.main_controls_enabled());
    }

    #[test]
    fn selection_does_not_leave_operating() {
        assert_eq!(PopupPhase::Operating.select(false), PopupPhase::Operating);
        assert_eq!(PopupPhase::Operating.select(true), PopupPhase::Operating);
    }

    #[test]
    fn setup_round_trip() {
        let phase = PopupPhase::Operating.enter_setup(true);
        assert_eq!(phase, PopupPhase::Setup(SetupStep::AdjustSeverity));
        assert!(!phase.is_activated());
        let phase = phase.close_setup(true);
        assert!(phase.is_activated());
        assert!(phase.main_controls_enabled());
        assert!(!phase.step_two_enabled());
    }

    #[test]
    fn closing_setup_without_type_stays_on_first_step() {
        let phase = PopupPhase::default().close_setup(false);
        assert_eq!(phase, PopupPhase::Setup(SetupStep::ChooseType));
        assert!(!phase.main_controls_enabled());
        let phase = PopupPhase::Setup(SetupStep::AdjustSeverity).close_setup(false);
        assert_eq!(phase, PopupPhase::Setup(SetupStep::ChooseType));
    }
}
