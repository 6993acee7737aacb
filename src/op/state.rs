use crate::{
    EntityId, Scene, SelectOp, SplatState, Splats, StateRule, op::target_splats, parallel,
};

/// An operation flipping state bits of a captured set of splats.
///
/// The set is computed once at construction from the rule filter and never re-evaluated, so
/// [`StateOp::undo`] reverts exactly what [`StateOp::apply`] changed.
#[derive(Debug, Clone)]
pub struct StateOp {
    target: EntityId,
    rule: StateRule,
    indices: Vec<u32>,
}

impl StateOp {
    /// Create a new state operation for a rule not consulting a predicate.
    pub fn new(target: EntityId, splats: &Splats, rule: StateRule) -> Self {
        Self::new_with_predicate(target, splats, rule, |_| true)
    }

    /// Create a new selection operation combining `pred` with the current selection.
    pub fn selection(
        target: EntityId,
        splats: &Splats,
        op: SelectOp,
        pred: impl Fn(usize) -> bool + Sync,
    ) -> Self {
        Self::new_with_predicate(target, splats, StateRule::Select(op), pred)
    }

    /// Create a new state operation with all the options.
    pub fn new_with_predicate(
        target: EntityId,
        splats: &Splats,
        rule: StateRule,
        pred: impl Fn(usize) -> bool + Sync,
    ) -> Self {
        let state = splats.state();
        let indices = parallel::build_index(state.len(), |i| rule.filter(state[i], pred(i)));

        log::debug!("{rule:?} captured {} splats", indices.len());

        Self {
            target,
            rule,
            indices,
        }
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn rule(&self) -> StateRule {
        self.rule
    }

    /// Get the captured indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn apply(&self, scene: &mut Scene) {
        self.run(scene, StateRule::apply);
    }

    pub fn undo(&self, scene: &mut Scene) {
        self.run(scene, StateRule::revert);
    }

    fn run(&self, scene: &mut Scene, f: fn(StateRule, SplatState) -> SplatState) {
        let Some(splats) = target_splats(scene, self.target) else {
            return;
        };

        let rule = self.rule;
        parallel::for_each_at(splats.state_mut(), &self.indices, |_, state| {
            *state = f(rule, *state);
        });
        splats.update_state();
    }
}
