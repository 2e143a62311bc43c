//! Drop scheduler - gravity, soft drop, lock delay and horizontal repeat timing
//!
//! Everything is counted in frames. The per-round `game_timer` drives both gravity (a row
//! falls on frames where `game_timer % interval == 0`) and the repeat rate of a held
//! horizontal direction.

use crate::fixed::Fixed;
use crate::types::{
    BASE_DROP_RATE, HORIZONTAL_REPEAT, LEVEL_DROP_RATE_MULTI, MOVE_COOLDOWN, SET_TIME,
    SOFT_DROP_RATE,
};

/// Frames per row at `level` without soft drop
///
/// `BASE_DROP_RATE / 1.10^level` in 20.12 fixed point, truncated, never below one frame.
/// The result never increases with the level.
pub fn gravity_interval(level: u32) -> u32 {
    if level == 0 {
        return BASE_DROP_RATE;
    }

    let base = Fixed::from_int(BASE_DROP_RATE as i32);
    let multi = Fixed::from_raw(LEVEL_DROP_RATE_MULTI);
    let mut divisor = Fixed::ONE;
    for _ in 0..level {
        divisor = divisor.mul(multi);
        if divisor >= base {
            return 1;
        }
    }

    base.checked_div(divisor)
        .map(|interval| interval.to_int().max(1) as u32)
        .unwrap_or(1)
}

/// Per-round frame timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropScheduler {
    game_timer: u32,
    set_time: u32,
    move_cooldown: u32,
}

impl DropScheduler {
    pub fn new() -> Self {
        Self {
            game_timer: 0,
            set_time: SET_TIME,
            move_cooldown: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Gravity interval for this frame
    pub fn interval(&self, level: u32, soft_drop: bool) -> u32 {
        if soft_drop {
            SOFT_DROP_RATE
        } else {
            gravity_interval(level)
        }
    }

    /// Whether the active piece should try to fall this frame
    pub fn is_gravity_frame(&self, level: u32, soft_drop: bool) -> bool {
        self.game_timer % self.interval(level, soft_drop) == 0
    }

    /// The piece fell a row: restart the lock delay
    pub fn on_descend(&mut self) {
        self.set_time = SET_TIME;
    }

    /// A grounded piece locks once the lock delay has run out
    ///
    /// Only a fall restarts the delay, so a piece spawned after a lock inherits the spent
    /// delay and locks on its first blocked gravity frame.
    pub fn lock_expired(&self) -> bool {
        self.set_time == 0
    }

    /// A horizontal press moved the piece: hold off repeats for a moment
    pub fn on_move_press(&mut self) {
        self.move_cooldown = MOVE_COOLDOWN;
    }

    /// Whether a held horizontal direction may move the piece this frame
    pub fn can_repeat_move(&self) -> bool {
        self.move_cooldown == 0 && self.game_timer % HORIZONTAL_REPEAT == 0
    }

    /// Count down the lock delay and move cooldown and advance the frame timer
    pub fn end_frame(&mut self) {
        self.set_time = self.set_time.saturating_sub(1);
        self.move_cooldown = self.move_cooldown.saturating_sub(1);
        self.game_timer = self.game_timer.wrapping_add(1);
    }

    pub fn game_timer(&self) -> u32 {
        self.game_timer
    }

    pub fn set_time(&self) -> u32 {
        self.set_time
    }

    pub fn move_cooldown(&self) -> u32 {
        self.move_cooldown
    }
}

impl Default for DropScheduler {
    fn default() -> Self {
        Self::new()
    }
}
