mod algebra;
mod color;
mod multi;
mod splat;
mod state;
mod transform;

pub use algebra::*;
pub use color::*;
pub use multi::*;
pub use splat::*;
pub use state::*;
pub use transform::*;

use crate::{EntityId, Scene, Splats};

/// A reversible edit operation.
///
/// Every variant captures what it needs at construction, [`EditOp::apply`] and [`EditOp::undo`]
/// never fail. A variant whose entity is gone logs a warning and does nothing.
#[derive(Debug, Clone)]
pub enum EditOp {
    State(StateOp),
    SplatTransform(SplatTransformOp),
    EntityTransform(EntityTransformOp),
    PlacePivot(PlacePivotOp),
    Multi(MultiOp),
    AddSplat(AddSplatOp),
    DuplicateSelection(DuplicateSelectionOp),
    SetColorAdjustment(SetColorAdjustmentOp),
    PaintColor(PaintColorOp),
}

impl EditOp {
    /// Apply the operation.
    pub fn apply(&mut self, scene: &mut Scene) {
        match self {
            Self::State(op) => op.apply(scene),
            Self::SplatTransform(op) => op.apply(scene),
            Self::EntityTransform(op) => op.apply(scene),
            Self::PlacePivot(op) => op.apply(scene),
            Self::Multi(op) => op.apply(scene),
            Self::AddSplat(op) => op.apply(scene),
            Self::DuplicateSelection(op) => op.apply(scene),
            Self::SetColorAdjustment(op) => op.apply(scene),
            Self::PaintColor(op) => op.apply(scene),
        }
    }

    /// Undo the operation.
    pub fn undo(&mut self, scene: &mut Scene) {
        match self {
            Self::State(op) => op.undo(scene),
            Self::SplatTransform(op) => op.undo(scene),
            Self::EntityTransform(op) => op.undo(scene),
            Self::PlacePivot(op) => op.undo(scene),
            Self::Multi(op) => op.undo(scene),
            Self::AddSplat(op) => op.undo(scene),
            Self::DuplicateSelection(op) => op.undo(scene),
            Self::SetColorAdjustment(op) => op.undo(scene),
            Self::PaintColor(op) => op.undo(scene),
        }
    }

    /// Get a short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::State(_) => "state",
            Self::SplatTransform(_) => "splat transform",
            Self::EntityTransform(_) => "entity transform",
            Self::PlacePivot(_) => "place pivot",
            Self::Multi(_) => "multi",
            Self::AddSplat(_) => "add splat",
            Self::DuplicateSelection(_) => "duplicate selection",
            Self::SetColorAdjustment(_) => "set color adjustment",
            Self::PaintColor(_) => "paint color",
        }
    }
}

macro_rules! impl_from_op {
    ($($variant:ident($op:ty)),* $(,)?) => {
        $(
            impl From<$op> for EditOp {
                fn from(op: $op) -> Self {
                    Self::$variant(op)
                }
            }
        )*
    };
}

impl_from_op!(
    State(StateOp),
    SplatTransform(SplatTransformOp),
    EntityTransform(EntityTransformOp),
    PlacePivot(PlacePivotOp),
    Multi(MultiOp),
    AddSplat(AddSplatOp),
    DuplicateSelection(DuplicateSelectionOp),
    SetColorAdjustment(SetColorAdjustmentOp),
    PaintColor(PaintColorOp),
);

/// Get the splats of `target`, warning if the entity is gone.
fn target_splats(scene: &mut Scene, target: EntityId) -> Option<&mut Splats> {
    match scene.get_mut(target) {
        Some(entity) => Some(&mut entity.splats),
        None => {
            log::warn!("Entity {target:?} is gone, operation skipped");
            None
        }
    }
}
