//! Core game logic - pure, deterministic, frame-stepped
//!
//! Everything a falling-block game needs short of a screen, a speaker and a keyboard. The
//! core reads an [`InputSource`] once per frame, mutates its state and returns an
//! [`Effects`] list; rendering works off a [`SessionSnapshot`]. No I/O happens in here.
//!
//! # Module Structure
//!
//! - [`fixed`]: 20.12 fixed-point numbers for the drop-rate curve
//! - [`pieces`]: the seven shapes, spawn positions and wall-kick tables
//! - [`board`]: 10x20 matrix, collision, row clears, garbage rows, game-over sweep
//! - [`rotation`]: rotation with a five-candidate kick search
//! - [`rng`]: seeded LCG used for bags and garbage gaps
//! - [`queue`]: next queue (bag or uniform) and the hold slot
//! - [`gravity`]: drop interval, lock delay and auto-repeat timers
//! - [`scoring`]: line-clear points, level goal and music pitch
//! - [`round`]: one player's round as a state machine
//! - [`session`]: title menus, marathon and versus on top of two rounds
//! - [`effects`] / [`audio`]: sound requests and their dispatch to a device
//! - [`render`]: snapshot to draw calls
//!
//! # Frame
//!
//! One [`Session::update`] is one frame at 60 Hz. All timers count frames; the core never
//! sleeps and never reads a clock.
//!
//! # Example
//!
//! ```
//! use tetrade_core::{Config, InputSnapshot, Screen, Session};
//! use tetrade_core::types::{Button, PlayerId};
//!
//! let mut session = Session::new(Config { seed: Some(7), ..Config::default() });
//! session.update(&InputSnapshot::pressing(PlayerId::One, Button::Start));
//! // "Versus Mode"
//! session.update(&InputSnapshot::pressing(PlayerId::One, Button::Down));
//! session.update(&InputSnapshot::pressing(PlayerId::One, Button::Confirm));
//! assert_eq!(session.screen(), Screen::Versus);
//! assert_eq!(session.winner(), None);
//! ```

pub mod audio;
pub mod board;
pub mod config;
pub mod effects;
pub mod fixed;
pub mod gravity;
pub mod input;
pub mod pieces;
pub mod queue;
pub mod render;
pub mod rng;
pub mod rotation;
pub mod round;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tetrade_types as types;

pub use audio::{AudioDevice, AudioDispatcher, ChannelHandle};
pub use board::{Board, BoardGrid, SweepCursor};
pub use config::Config;
pub use effects::{Effect, Effects, SampleHandle};
pub use fixed::Fixed;
pub use gravity::{gravity_interval, DropScheduler};
pub use input::{ButtonLatch, InputSnapshot, InputSource};
pub use pieces::{template, transition_id, Shape, Tetromino};
pub use queue::{HoldOutcome, HoldSlot, PieceQueue, Randomizer};
pub use render::{draw_session, Font, RenderSurface, Sprite};
pub use rng::SimpleRng;
pub use rotation::try_rotate;
pub use round::{FrameOutcome, Round, RoundEvent, RoundPhase};
pub use scoring::ScoreBoard;
pub use session::{MainMenuEntry, OptionsEntry, Screen, Session};
pub use snapshot::{ActiveSnapshot, RoundSnapshot, SessionSnapshot};
