//! Terminal input for two players on one keyboard.
//!
//! Maps `crossterm` key events onto the core's per-player buttons and latches them into one
//! [`crate::core::InputSnapshot`] per frame. Terminals without key-release events are
//! handled with a timeout.

pub mod handler;
pub mod map;

pub use tetrade_core as core;
pub use tetrade_types as types;

pub use handler::KeyboardInput;
pub use map::{map_key, should_quit};
