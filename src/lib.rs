//! Cyclic "pile" carousel: a fixed pool of stacked, depth-scaled slots that
//! scroll through an endless item sequence under horizontal drags.

pub mod adapter;
pub mod animation;
pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod gesture;
pub mod index;
pub mod layout;
pub mod logging;
pub mod pool;
pub mod runtime;
pub mod script;
pub mod text;
pub mod timer;
pub mod transform;

pub use adapter::{Adapter, NullSurface, Surface};
pub use config::{PileConfig, Variant};
pub use error::PileError;
pub use gesture::{Dispatch, Mode, PointerEvent, PointerKind};
pub use index::data_index;
pub use layout::{Commit, PileLayout};
pub use pool::{Slot, SlotId, SlotPool};
