//! Terminal front-end pieces.
//!
//! A small, game-oriented rendering layer: the core's render pass draws into a
//! [`TermSurface`], which writes a character [`FrameBuffer`]; [`TerminalRenderer`] then
//! pushes only the changed cells to the terminal. [`SilentAudio`] stands in for a mixer.

pub mod audio;
pub mod fb;
pub mod renderer;
pub mod surface;

pub use tetrade_core as core;
pub use tetrade_types as types;

pub use audio::SilentAudio;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use surface::{palette, TermSurface};
