use std::collections::HashMap;

use glam::*;

use crate::{
    AddSplatOp, ColorAdjustment, DuplicateSelectionOp, EditHistory, EditOp, EntityId,
    EntityTransformOp, Error, HistoryConfig, MultiOp, PaintColor, PaintColorOp, PlacePivotOp,
    Scene, SelectOp, SetColorAdjustmentOp, SplatTransformOp, Splats, StateOp, StateRule,
    Transform, TransformPalette, parallel, pivot_delta_in_frame, restore_palette_slots,
};

/// The state captured when a transform gesture starts.
#[derive(Debug, Clone)]
struct TransformGesture {
    target: EntityId,
    palette_map: HashMap<u16, u16>,
    indices: Vec<u32>,
    frame: Mat4,
    entity_start: Transform,
}

/// An edit session on one splat entity of a scene.
///
/// The session turns edit intents into operations, checks their preconditions and records them
/// in its [`EditHistory`]. There is one session per scene, nothing is global.
#[derive(Debug, Default)]
pub struct EditSession {
    target: Option<EntityId>,
    history: EditHistory,
    gesture: Option<TransformGesture>,
}

impl EditSession {
    /// Create a new session with an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session with the history configuration.
    pub fn new_with(config: HistoryConfig) -> Self {
        Self {
            history: EditHistory::new_with(config),
            ..Default::default()
        }
    }

    /// Bind the session to an entity, cancelling any transform gesture.
    pub fn set_target(&mut self, scene: &mut Scene, target: Option<EntityId>) {
        log::debug!("Edit target set to {target:?}");

        self.cancel_gesture(scene);
        self.target = target;
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Whether the target has selected splats.
    pub fn has_selection(&self, scene: &Scene) -> bool {
        self.splats(scene)
            .map(|(_, splats)| splats.has_selection())
            .unwrap_or(false)
    }

    fn splats<'a>(&self, scene: &'a Scene) -> Result<(EntityId, &'a Splats), Error> {
        let target = self.target.ok_or(Error::NoEditTarget)?;
        let entity = scene.get(target).ok_or(Error::StaleEntity(target))?;
        Ok((target, &entity.splats))
    }

    fn add(&mut self, op: impl Into<EditOp>, scene: &mut Scene) {
        let op = op.into();
        log::debug!("Adding {} operation", op.name());
        self.history.add(op, scene);
    }

    /// Combine `pred` with the selection of the target.
    pub fn add_selection_op(
        &mut self,
        scene: &mut Scene,
        op: SelectOp,
        pred: impl Fn(usize) -> bool + Sync,
    ) -> Result<(), Error> {
        let (target, splats) = self.splats(scene)?;
        let op = StateOp::selection(target, splats, op, pred);
        self.add(op, scene);
        Ok(())
    }

    fn add_state_op(&mut self, scene: &mut Scene, rule: StateRule) -> Result<(), Error> {
        let (target, splats) = self.splats(scene)?;
        let op = StateOp::new(target, splats, rule);
        self.add(op, scene);
        Ok(())
    }

    pub fn add_select_all_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        self.add_state_op(scene, StateRule::SelectAll)
    }

    pub fn add_select_inverse_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        self.add_state_op(scene, StateRule::SelectInverse)
    }

    pub fn add_select_none_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        self.add_state_op(scene, StateRule::SelectNone)
    }

    /// Hide the selected splats.
    pub fn add_hide_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        self.add_state_op(scene, StateRule::Hide)
    }

    /// Show the hidden splats.
    pub fn add_unhide_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        self.add_state_op(scene, StateRule::Unhide)
    }

    /// Delete the selected splats.
    pub fn add_delete_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        self.add_state_op(scene, StateRule::Delete)
    }

    /// Restore the deleted splats.
    pub fn add_reset_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        self.add_state_op(scene, StateRule::Reset)
    }

    /// Blend `paint` into the splats `pred` holds for.
    pub fn add_paint_op(
        &mut self,
        scene: &mut Scene,
        paint: PaintColor,
        pred: impl Fn(usize) -> bool + Sync,
    ) -> Result<(), Error> {
        let (target, splats) = self.splats(scene)?;
        let op = PaintColorOp::new(target, splats, paint, pred);
        self.add(op, scene);
        Ok(())
    }

    pub fn add_color_adjustment_op(
        &mut self,
        scene: &mut Scene,
        old: ColorAdjustment,
        new: ColorAdjustment,
    ) -> Result<(), Error> {
        let (target, _) = self.splats(scene)?;
        self.add(SetColorAdjustmentOp::new(target, old, new), scene);
        Ok(())
    }

    pub fn add_place_pivot_op(
        &mut self,
        scene: &mut Scene,
        old: Transform,
        new: Transform,
    ) -> Result<(), Error> {
        self.splats(scene)?;
        self.add(PlacePivotOp::new(old, new), scene);
        Ok(())
    }

    /// Append copies of the selection to the target.
    pub fn add_duplicate_selection_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        let (target, splats) = self.splats(scene)?;
        let op = DuplicateSelectionOp::new(target, splats);
        self.add(op, scene);
        Ok(())
    }

    /// Copy the selection into a new entity.
    pub fn add_duplicate_to_instance_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        let (target, splats) = self.splats(scene)?;
        let op = AddSplatOp::new(target, splats);
        self.add(op, scene);
        Ok(())
    }

    /// Move the selection into a new entity, deleting it from the target.
    pub fn add_separate_selection_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        let (target, splats) = self.splats(scene)?;
        let op = MultiOp::new([
            AddSplatOp::new(target, splats).into(),
            StateOp::new(target, splats, StateRule::Delete).into(),
        ]);
        self.add(op, scene);
        Ok(())
    }

    /// Start a transform gesture.
    ///
    /// Every selected splat is moved to a copy of its palette slot, one copy per distinct slot.
    /// Without a selection the gesture moves the whole entity.
    pub fn start_transform_op(&mut self, scene: &mut Scene) -> Result<(), Error> {
        self.cancel_gesture(scene);

        let target = self.target.ok_or(Error::NoEditTarget)?;
        let entity = scene.get_mut(target).ok_or(Error::StaleEntity(target))?;
        let frame = entity.transform.world_matrix();
        let entity_start = entity.transform;
        let splats = &mut entity.splats;

        let state = splats.state();
        let indices = parallel::build_index(state.len(), |i| state[i].is_selected());
        let mut palette_map = HashMap::new();

        if !indices.is_empty() {
            let mut distinct = indices
                .iter()
                .map(|&i| splats.transform_index()[i as usize])
                .collect::<Vec<_>>();
            distinct.sort_unstable();
            distinct.dedup();
            if splats.palette.len() + distinct.len() > TransformPalette::CAPACITY {
                return Err(Error::PaletteFull {
                    capacity: TransformPalette::CAPACITY,
                });
            }

            let (transform_index, palette) = splats.transform_index_and_palette_mut();
            for &i in &indices {
                let old = transform_index[i as usize];
                let new = match palette_map.get(&old) {
                    Some(&new) => new,
                    None => {
                        let original = palette.get(old).unwrap_or(Mat4::IDENTITY);
                        let new = palette.add_transform(original)?;
                        palette_map.insert(old, new);
                        new
                    }
                };
                transform_index[i as usize] = new;
            }
            splats.update_transform_index();

            log::debug!(
                "Transform gesture allocated {} palette slots for {} splats",
                palette_map.len(),
                indices.len()
            );
        }

        self.gesture = Some(TransformGesture {
            target,
            palette_map,
            indices,
            frame,
            entity_start,
        });
        Ok(())
    }

    /// Preview the gesture with the pivot moved from `old` to `new`, without recording history.
    pub fn update_transform_op(
        &mut self,
        scene: &mut Scene,
        old: &Transform,
        new: &Transform,
    ) -> Result<(), Error> {
        let gesture = self.gesture.as_ref().ok_or(Error::NoTransformGesture)?;
        let entity = scene
            .get_mut(gesture.target)
            .ok_or(Error::StaleEntity(gesture.target))?;
        if gesture.palette_map.is_empty() {
            let delta = new.world_matrix() * old.world_matrix().inverse();
            entity.transform = Transform::from_matrix(delta * gesture.frame);
            entity.splats.make_selection_bounds_dirty();
            return Ok(());
        }

        let delta = pivot_delta_in_frame(old, new, gesture.frame);
        let palette = &mut entity.splats.palette;
        for (&old_index, &new_index) in &gesture.palette_map {
            if let Some(original) = palette.get(old_index) {
                palette.set(new_index, delta * original);
            }
        }
        entity.splats.make_selection_bounds_dirty();
        Ok(())
    }

    /// Finish the gesture, recording the pivot movement from `old` to `new`.
    ///
    /// Nothing is recorded for an entity gesture that did not move the pivot.
    pub fn end_transform_op(
        &mut self,
        scene: &mut Scene,
        old: Transform,
        new: Transform,
    ) -> Result<(), Error> {
        let gesture = self.gesture.take().ok_or(Error::NoTransformGesture)?;
        if !scene.valid(gesture.target) {
            return Err(Error::StaleEntity(gesture.target));
        }

        if !gesture.palette_map.is_empty() {
            let op = MultiOp::new([
                SplatTransformOp::new(
                    gesture.target,
                    old,
                    new,
                    gesture.frame,
                    gesture.palette_map,
                    gesture.indices,
                )
                .into(),
                PlacePivotOp::new(old, new).into(),
            ]);
            self.add(op, scene);
        } else if old.world_matrix() != new.world_matrix() {
            let delta = new.world_matrix() * old.world_matrix().inverse();
            let moved = Transform::from_matrix(delta * gesture.frame);
            let op = MultiOp::new([
                EntityTransformOp::new(gesture.target, gesture.entity_start, moved).into(),
                PlacePivotOp::new(old, new).into(),
            ]);
            self.add(op, scene);
        }

        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the last operation, cancelling any transform gesture first.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        self.cancel_gesture(scene);
        self.history.undo(scene)
    }

    /// Redo the next operation, cancelling any transform gesture first.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        self.cancel_gesture(scene);
        self.history.redo(scene)
    }

    /// Drop the whole history, e.g. when the scene changes.
    pub fn clear_history(&mut self, scene: &mut Scene) {
        self.cancel_gesture(scene);
        self.history.clear();
    }

    /// Put back everything an unfinished transform gesture moved.
    fn cancel_gesture(&mut self, scene: &mut Scene) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };

        let Some(entity) = scene.get_mut(gesture.target) else {
            log::warn!("Entity {:?} is gone, gesture dropped", gesture.target);
            return;
        };

        log::debug!("Cancelling transform gesture on {:?}", gesture.target);

        if gesture.palette_map.is_empty() {
            entity.transform = gesture.entity_start;
            entity.splats.make_selection_bounds_dirty();
        } else {
            restore_palette_slots(&mut entity.splats, &gesture.palette_map, &gesture.indices);
        }
    }
}
