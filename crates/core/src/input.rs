//! Controller input as the core sees it
//!
//! Per frame, per player and per button the core asks three questions: was it pressed this
//! frame, was it released this frame, is it down. [`ButtonLatch`] derives the edges from
//! plain up/down levels, which is all a front-end has to provide.

use crate::types::{Button, PlayerId};

pub trait InputSource {
    /// Went down this frame
    fn pressed(&self, player: PlayerId, button: Button) -> bool;

    /// Went up this frame
    fn released(&self, player: PlayerId, button: Button) -> bool;

    /// Currently down
    fn held(&self, player: PlayerId, button: Button) -> bool;
}

type ButtonLevels = [[bool; Button::COUNT]; 2];

/// Input state of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    held: ButtonLevels,
    pressed: ButtonLevels,
    released: ButtonLevels,
}

impl InputSnapshot {
    /// No buttons down, no edges
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a button as pressed this frame (and held)
    pub fn press(&mut self, player: PlayerId, button: Button) -> &mut Self {
        self.pressed[player.index()][button.index()] = true;
        self.held[player.index()][button.index()] = true;
        self
    }

    /// Mark a button as held without an edge
    pub fn hold(&mut self, player: PlayerId, button: Button) -> &mut Self {
        self.held[player.index()][button.index()] = true;
        self
    }

    /// Mark a button as released this frame
    pub fn release(&mut self, player: PlayerId, button: Button) -> &mut Self {
        self.released[player.index()][button.index()] = true;
        self.held[player.index()][button.index()] = false;
        self
    }

    /// Snapshot with a single button pressed
    pub fn pressing(player: PlayerId, button: Button) -> Self {
        let mut snap = Self::new();
        snap.press(player, button);
        snap
    }
}

impl InputSource for InputSnapshot {
    fn pressed(&self, player: PlayerId, button: Button) -> bool {
        self.pressed[player.index()][button.index()]
    }

    fn released(&self, player: PlayerId, button: Button) -> bool {
        self.released[player.index()][button.index()]
    }

    fn held(&self, player: PlayerId, button: Button) -> bool {
        self.held[player.index()][button.index()]
    }
}

/// Turns button levels into edges by remembering the previous frame
#[derive(Debug, Clone, Default)]
pub struct ButtonLatch {
    previous: ButtonLevels,
    current: ButtonLevels,
}

impl ButtonLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level of a button for the frame being built
    pub fn set(&mut self, player: PlayerId, button: Button, down: bool) {
        self.current[player.index()][button.index()] = down;
    }

    /// Finish the frame: compare against the previous levels and return the snapshot
    pub fn latch(&mut self) -> InputSnapshot {
        let mut snap = InputSnapshot::new();
        for player in PlayerId::ALL {
            for button in Button::ALL {
                let (p, b) = (player.index(), button.index());
                let was = self.previous[p][b];
                let now = self.current[p][b];
                snap.held[p][b] = now;
                snap.pressed[p][b] = now && !was;
                snap.released[p][b] = was && !now;
            }
        }
        self.previous = self.current;
        snap
    }
}
