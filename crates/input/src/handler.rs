//! Keyboard state for both players.
//!
//! Collects key events between frames and turns them into one [`InputSnapshot`] per frame.
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::core::{ButtonLatch, InputSnapshot};
use crate::map::map_key;
use crate::types::{Button, PlayerId};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

type PerButton<T> = [[T; Button::COUNT]; 2];

/// Tracks which buttons are down and hands out per-frame snapshots.
#[derive(Debug, Clone)]
pub struct KeyboardInput {
    latch: ButtonLatch,
    /// Last press or auto-repeat seen per button; `None` while up
    last_seen: PerButton<Option<Instant>>,
    /// Went down since the last frame
    fresh: PerButton<bool>,
    /// Releases of fresh presses, applied after the next frame so the tap is not lost
    deferred: ArrayVec<(PlayerId, Button), { Button::COUNT * 2 }>,
    key_release_timeout_ms: u32,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self {
            latch: ButtonLatch::new(),
            last_seen: [[None; Button::COUNT]; 2],
            fresh: [[false; Button::COUNT]; 2],
            deferred: ArrayVec::new(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feed one terminal key event. Returns whether the key is bound.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        self.handle_key_event_at(key, Instant::now())
    }

    pub fn handle_key_event_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        let Some((player, button)) = map_key(key.code) else {
            log::trace!("unbound key {:?}", key.code);
            return false;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(player, button, now),
            KeyEventKind::Release => self.release(player, button),
        }
        true
    }

    fn press(&mut self, player: PlayerId, button: Button, now: Instant) {
        let (p, b) = (player.index(), button.index());
        if self.last_seen[p][b].is_none() {
            self.fresh[p][b] = true;
        }
        self.last_seen[p][b] = Some(now);
        self.latch.set(player, button, true);
    }

    fn release(&mut self, player: PlayerId, button: Button) {
        let (p, b) = (player.index(), button.index());
        if self.fresh[p][b] {
            // one slot per player and button, so this never overflows
            if !self.deferred.contains(&(player, button)) {
                self.deferred.push((player, button));
            }
            return;
        }
        self.last_seen[p][b] = None;
        self.latch.set(player, button, false);
    }

    /// Snapshot for the frame that is about to run.
    pub fn frame(&mut self) -> InputSnapshot {
        self.frame_at(Instant::now())
    }

    pub fn frame_at(&mut self, now: Instant) -> InputSnapshot {
        // Auto-release when terminal does not emit release events.
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        for player in PlayerId::ALL {
            for button in Button::ALL {
                let (p, b) = (player.index(), button.index());
                let stale = self.last_seen[p][b]
                    .is_some_and(|seen| now.saturating_duration_since(seen) > timeout);
                if stale && !self.fresh[p][b] {
                    self.last_seen[p][b] = None;
                    self.latch.set(player, button, false);
                }
            }
        }

        let snap = self.latch.latch();

        self.fresh = [[false; Button::COUNT]; 2];
        for (player, button) in self.deferred.drain(..) {
            self.last_seen[player.index()][button.index()] = None;
            self.latch.set(player, button, false);
        }
        snap
    }

    /// Drop all held state, e.g. after the terminal lost focus.
    pub fn reset(&mut self) {
        self.latch = ButtonLatch::new();
        self.last_seen = [[None; Button::COUNT]; 2];
        self.fresh = [[false; Button::COUNT]; 2];
        self.deferred.clear();
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}
