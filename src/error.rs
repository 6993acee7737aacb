use thiserror::Error;

use crate::EntityId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no splat entity is bound to the edit session")]
    NoEditTarget,
    #[error("splat entity {0:?} no longer exists")]
    StaleEntity(EntityId),
    #[error("transform palette is full, capacity is {capacity}")]
    PaletteFull { capacity: usize },
    #[error("no transform gesture has been started")]
    NoTransformGesture,
}
