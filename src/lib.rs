//! Tetrade (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so the binary, tests and benches can
//! write `tetrade::core::Session` and friends.

pub use tetrade_core as core;
pub use tetrade_input as input;
pub use tetrade_term as term;
pub use tetrade_types as types;
