use std::ops::Range;

use glam::*;
use rayon::prelude::*;

use crate::{
    EntityId, Scene, SplatEntity, SplatState, Splats, op::target_splats, parallel,
};

/// An operation copying the selected splats into a new entity.
///
/// The copies keep their selection, the originals are deselected. Undo destroys the created
/// entity if it is still alive and reselects the originals.
#[derive(Debug, Clone)]
pub struct AddSplatOp {
    source: EntityId,
    indices: Vec<u32>,
    transform: Mat4,
    created: Option<EntityId>,
}

impl AddSplatOp {
    /// Create a new add splat operation from the current selection of `source`.
    pub fn new(source: EntityId, splats: &Splats) -> Self {
        let state = splats.state();
        let indices = parallel::build_index(state.len(), |i| state[i].is_selected());

        log::debug!("Add splat captured {} splats", indices.len());

        Self {
            source,
            indices,
            transform: splats.palette.last(),
            created: None,
        }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Get the palette transform given to the new instance.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Get the entity created by the last apply.
    pub fn created(&self) -> Option<EntityId> {
        self.created
    }

    pub fn apply(&mut self, scene: &mut Scene) {
        let Some(source) = scene.get(self.source) else {
            log::warn!("Entity {:?} is gone, nothing to copy", self.source);
            return;
        };

        let mut splats = Splats::new();
        splats.merge(&source.splats, &self.indices);
        splats
            .transform_index_mut()
            .par_iter_mut()
            .for_each(|index| *index = 0);
        splats.palette.set(0, self.transform);
        splats.update_transform_index();

        let entity = SplatEntity {
            name: format!("{} copy", source.name),
            transform: source.transform,
            splats,
            color_adjustment: source.color_adjustment,
        };

        if let Some(source) = target_splats(scene, self.source) {
            parallel::for_each_at(source.state_mut(), &self.indices, |_, state| {
                state.remove(SplatState::SELECT);
            });
            source.update_state();
        }

        self.created = Some(scene.create_entity(entity));
    }

    pub fn undo(&mut self, scene: &mut Scene) {
        match self.created.take() {
            Some(id) if scene.valid(id) => {
                scene.destroy(id);
            }
            Some(id) => log::warn!("Entity {id:?} was destroyed elsewhere, skipped"),
            None => {}
        }

        if let Some(source) = target_splats(scene, self.source) {
            parallel::for_each_at(source.state_mut(), &self.indices, |_, state| {
                state.insert(SplatState::SELECT);
            });
            source.update_state();
        }
    }
}

/// An operation appending copies of the selected splats to the same collection.
///
/// The copies stay selected, the originals are deselected. Undo truncates the appended range.
#[derive(Debug, Clone)]
pub struct DuplicateSelectionOp {
    target: EntityId,
    indices: Vec<u32>,
    appended: Option<Range<u32>>,
}

impl DuplicateSelectionOp {
    /// Create a new duplicate operation from the current selection of `splats`.
    pub fn new(target: EntityId, splats: &Splats) -> Self {
        let state = splats.state();
        let indices = parallel::build_index(state.len(), |i| state[i].is_selected());

        log::debug!("Duplicate captured {} splats", indices.len());

        Self {
            target,
            indices,
            appended: None,
        }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Get the range appended by the last apply.
    pub fn appended(&self) -> Option<Range<u32>> {
        self.appended.clone()
    }

    pub fn apply(&mut self, scene: &mut Scene) {
        let Some(splats) = target_splats(scene, self.target) else {
            return;
        };

        self.appended = Some(splats.duplicate(&self.indices));

        parallel::for_each_at(splats.state_mut(), &self.indices, |_, state| {
            state.remove(SplatState::SELECT);
        });
        splats.update_state();
    }

    pub fn undo(&mut self, scene: &mut Scene) {
        let Some(splats) = target_splats(scene, self.target) else {
            return;
        };

        parallel::for_each_at(splats.state_mut(), &self.indices, |_, state| {
            state.insert(SplatState::SELECT);
        });

        // A rejected truncate leaves the copies in place, the counts still follow the reselection.
        let truncated = self
            .appended
            .take()
            .is_some_and(|range| splats.truncate(range));
        if !truncated {
            splats.update_state();
        }
    }
}
