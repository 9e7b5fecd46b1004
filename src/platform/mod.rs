//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (DOM key codes -> per-game snapshots)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;

pub use input::KeySet;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, Storage};
