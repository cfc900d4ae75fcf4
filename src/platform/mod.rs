//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard and touch mapped onto a closed action set)
//! - Frame timing / FPS
//! - Storage (LocalStorage on web)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{Action, InputState, Platform, TouchButton, action_for_key};
pub use storage::{KeyValueStore, MemoryStore};
pub use time::FpsCounter;
