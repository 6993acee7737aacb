//! A reversible edit engine for 3D Gaussian splatting collections.
//!
//! Every edit is an [`EditOp`] capturing the splat indices it touches when it is built, so
//! [`EditHistory`] can undo and redo it any number of times without re-deriving them.
//! [`EditSession`] is the usual entry point: it binds a [`Scene`] entity and turns selection,
//! visibility, paint, duplication and transform intents into recorded operations.

mod error;
mod history;
mod op;
mod palette;
mod scene;
mod session;
mod splats;
mod state;
mod transform;

pub mod parallel;

pub use error::*;
pub use history::*;
pub use op::*;
pub use palette::*;
pub use scene::*;
pub use session::*;
pub use splats::*;
pub use state::*;
pub use transform::*;

pub use glam;
pub use half;
