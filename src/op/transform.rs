use std::collections::HashMap;

use glam::*;

use crate::{EntityId, Scene, Splats, Transform, op::target_splats, parallel};

/// An operation moving selected splats through freshly allocated palette slots.
///
/// The palette map pairs each original slot with the slot allocated for it when the gesture
/// started. The pivot delta is applied in the frame of the owning entity.
#[derive(Debug, Clone)]
pub struct SplatTransformOp {
    target: EntityId,
    old_pivot: Transform,
    new_pivot: Transform,
    frame: Mat4,
    palette_map: HashMap<u16, u16>,
    indices: Vec<u32>,
}

impl SplatTransformOp {
    /// Create a new splat transform operation.
    ///
    /// `frame` is the world matrix of the entity when the gesture started, `indices` are the
    /// splats that were moved to the new slots of `palette_map`.
    pub fn new(
        target: EntityId,
        old_pivot: Transform,
        new_pivot: Transform,
        frame: Mat4,
        palette_map: HashMap<u16, u16>,
        indices: Vec<u32>,
    ) -> Self {
        Self {
            target,
            old_pivot,
            new_pivot,
            frame,
            palette_map,
            indices,
        }
    }

    pub fn palette_map(&self) -> &HashMap<u16, u16> {
        &self.palette_map
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Compute the matrix of a new slot from the matrix of its original slot.
    pub fn transformed(&self, original: Mat4) -> Mat4 {
        pivot_delta_in_frame(&self.old_pivot, &self.new_pivot, self.frame) * original
    }

    pub fn apply(&self, scene: &mut Scene) {
        let Some(splats) = target_splats(scene, self.target) else {
            return;
        };

        let (transform_index, palette) = splats.transform_index_and_palette_mut();
        for (&old, &new) in &self.palette_map {
            let Some(original) = palette.get(old) else {
                log::error!("Palette slot {old} missing");
                continue;
            };
            palette.set(new, self.transformed(original));
        }

        let map = &self.palette_map;
        parallel::for_each_at(transform_index, &self.indices, |_, index| {
            if let Some(&new) = map.get(index) {
                *index = new;
            }
        });
        splats.update_transform_index();
    }

    pub fn undo(&self, scene: &mut Scene) {
        let Some(splats) = target_splats(scene, self.target) else {
            return;
        };

        restore_palette_slots(splats, &self.palette_map, &self.indices);
    }
}

/// Point `indices` back from the new slots of `palette_map` to the original ones and reset the
/// new slots to copies of the originals.
pub(crate) fn restore_palette_slots(
    splats: &mut Splats,
    palette_map: &HashMap<u16, u16>,
    indices: &[u32],
) {
    let inverse_map = palette_map
        .iter()
        .map(|(&old, &new)| (new, old))
        .collect::<HashMap<_, _>>();

    let (transform_index, palette) = splats.transform_index_and_palette_mut();
    parallel::for_each_at(transform_index, indices, |_, index| {
        if let Some(&old) = inverse_map.get(index) {
            *index = old;
        }
    });

    for (&old, &new) in palette_map {
        if let Some(original) = palette.get(old) {
            palette.set(new, original);
        }
    }
    splats.update_transform_index();
}

/// Get the pivot movement from `old` to `new` expressed in the space of `frame`.
pub fn pivot_delta_in_frame(old: &Transform, new: &Transform, frame: Mat4) -> Mat4 {
    let delta = new.world_matrix() * old.world_matrix().inverse();
    frame.inverse() * delta * frame
}

/// An operation moving a whole entity.
#[derive(Debug, Clone)]
pub struct EntityTransformOp {
    target: EntityId,
    old: Transform,
    new: Transform,
}

impl EntityTransformOp {
    pub fn new(target: EntityId, old: Transform, new: Transform) -> Self {
        Self { target, old, new }
    }

    pub fn apply(&self, scene: &mut Scene) {
        self.set(scene, self.new);
    }

    pub fn undo(&self, scene: &mut Scene) {
        self.set(scene, self.old);
    }

    fn set(&self, scene: &mut Scene, transform: Transform) {
        match scene.get_mut(self.target) {
            Some(entity) => {
                entity.transform = transform;
                entity.splats.make_selection_bounds_dirty();
            }
            None => log::warn!("Entity {:?} is gone, transform skipped", self.target),
        }
    }
}

/// An operation placing the pivot.
#[derive(Debug, Clone)]
pub struct PlacePivotOp {
    old: Transform,
    new: Transform,
}

impl PlacePivotOp {
    pub fn new(old: Transform, new: Transform) -> Self {
        Self { old, new }
    }

    pub fn apply(&self, scene: &mut Scene) {
        scene.pivot.transform = self.new;
    }

    pub fn undo(&self, scene: &mut Scene) {
        scene.pivot.transform = self.old;
    }
}
