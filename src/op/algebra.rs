use crate::SplatState;

/// How a predicate result is combined with the existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectOp {
    /// Select exactly the splats the predicate holds for.
    Set,
    /// Select untouched splats the predicate holds for.
    Add,
    /// Deselect selected splats the predicate holds for.
    Remove,
}

/// A state mutation rule, the `(filter, apply, revert)` triple of a [`StateOp`](crate::StateOp).
///
/// [`StateRule::revert`] is the inverse of [`StateRule::apply`] on every state accepted by
/// [`StateRule::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateRule {
    /// Combine a predicate with the selection.
    Select(SelectOp),
    /// Select every untouched splat.
    SelectAll,
    /// Flip the selection of every selectable splat.
    SelectInverse,
    /// Deselect every selected splat.
    SelectNone,
    /// Hide the selected splats.
    Hide,
    /// Show the hidden splats.
    Unhide,
    /// Delete the selected splats.
    Delete,
    /// Restore the deleted splats.
    Reset,
}

impl StateRule {
    /// Whether the rule consults the caller predicate in [`StateRule::filter`].
    pub fn uses_predicate(self) -> bool {
        matches!(self, Self::Select(_))
    }

    /// Whether a splat in `state` is touched, `hit` being the caller predicate result.
    ///
    /// Rules other than [`StateRule::Select`] ignore `hit`.
    pub fn filter(self, state: SplatState, hit: bool) -> bool {
        match self {
            Self::Select(SelectOp::Add) => state.is_normal() && hit,
            Self::Select(SelectOp::Remove) => state.is_selected() && hit,
            Self::Select(SelectOp::Set) => state.is_selected() != hit,
            Self::SelectAll => state.is_normal(),
            Self::SelectInverse => state.is_selectable(),
            Self::SelectNone | Self::Hide | Self::Delete => state.is_selected(),
            Self::Unhide => state.is_hidden(),
            Self::Reset => state.is_deleted(),
        }
    }

    /// The forward bit transform.
    pub fn apply(self, state: SplatState) -> SplatState {
        match self {
            Self::Select(SelectOp::Add) | Self::SelectAll => state | SplatState::SELECT,
            Self::Select(SelectOp::Remove) | Self::SelectNone => state - SplatState::SELECT,
            Self::Select(SelectOp::Set) | Self::SelectInverse => state ^ SplatState::SELECT,
            Self::Hide => state | SplatState::HIDE,
            Self::Unhide => state - SplatState::HIDE,
            Self::Delete => state | SplatState::DELETE,
            Self::Reset => state - SplatState::DELETE,
        }
    }

    /// The inverse bit transform.
    pub fn revert(self, state: SplatState) -> SplatState {
        match self {
            Self::Select(SelectOp::Add) | Self::SelectAll => state - SplatState::SELECT,
            Self::Select(SelectOp::Remove) | Self::SelectNone => state | SplatState::SELECT,
            Self::Select(SelectOp::Set) | Self::SelectInverse => state ^ SplatState::SELECT,
            Self::Hide => state - SplatState::HIDE,
            Self::Unhide => state | SplatState::HIDE,
            Self::Delete => state - SplatState::DELETE,
            Self::Reset => state | SplatState::DELETE,
        }
    }
}
