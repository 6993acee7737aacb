use crate::{ColorAdjustment, Pivot, Splats, Transform};

/// A generational handle to a [`SplatEntity`] in a [`Scene`].
///
/// A handle outlives its entity safely, [`Scene::valid`] tells whether it still points to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    /// Get the slot index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Get the generation of the slot when the entity was created.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A splat instance in the scene.
#[derive(Debug, Clone, Default)]
pub struct SplatEntity {
    pub name: String,
    pub transform: Transform,
    pub splats: Splats,
    pub color_adjustment: ColorAdjustment,
}

impl SplatEntity {
    /// Create a new entity with the identity transform and neutral color adjustment.
    pub fn new(name: impl Into<String>, splats: Splats) -> Self {
        Self {
            name: name.into(),
            splats,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entity: Option<SplatEntity>,
}

/// The scene holding the splat entities and the pivot being edited.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,

    /// The interactive manipulation handle.
    pub pivot: Pivot,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, reusing a free slot when there is one.
    pub fn create_entity(&mut self, entity: SplatEntity) -> EntityId {
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.generation = slot.generation.wrapping_add(1);
                slot.entity = Some(entity);
                EntityId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entity: Some(entity),
                });
                EntityId {
                    index: self.slots.len() as u32 - 1,
                    generation: 0,
                }
            }
        };

        log::debug!("Created entity {id:?}");

        id
    }

    /// Remove an entity, returning it if the handle was still valid.
    pub fn destroy(&mut self, id: EntityId) -> Option<SplatEntity> {
        if !self.valid(id) {
            log::warn!("Entity {id:?} already destroyed");
            return None;
        }

        log::debug!("Destroying entity {id:?}");

        self.free.push(id.index);
        self.slots[id.index as usize].entity.take()
    }

    /// Whether `id` still refers to a live entity.
    pub fn valid(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.generation == id.generation && slot.entity.is_some())
    }

    pub fn get(&self, id: EntityId) -> Option<&SplatEntity> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?
            .entity
            .as_ref()
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SplatEntity> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?
            .entity
            .as_mut()
    }

    /// Iterate over the live entities.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &SplatEntity)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entity.as_ref().map(|entity| {
                (
                    EntityId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    entity,
                )
            })
        })
    }

    /// Get the number of live entities.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Check if there are no live entities.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
