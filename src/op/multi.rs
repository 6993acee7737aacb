use crate::{EditOp, Scene};

/// An ordered bundle of operations applied and undone as one.
///
/// Apply runs the operations in order, undo runs them in reverse order, so operations writing
/// the same data restore it correctly.
#[derive(Debug, Clone, Default)]
pub struct MultiOp {
    ops: Vec<EditOp>,
}

impl MultiOp {
    /// Create a new multi operation.
    pub fn new(ops: impl IntoIterator<Item = EditOp>) -> Self {
        Self {
            ops: ops.into_iter().collect(),
        }
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn apply(&mut self, scene: &mut Scene) {
        for op in self.ops.iter_mut() {
            op.apply(scene);
        }
    }

    pub fn undo(&mut self, scene: &mut Scene) {
        for op in self.ops.iter_mut().rev() {
            op.undo(scene);
        }
    }
}
