//! Session module - title screens, game modes and the two rounds
//!
//! The session exclusively owns both rounds. Opponent links are [`PlayerId`] handles that
//! are resolved here, which is also the only place a round's output (garbage) is written
//! into the other round.
//!
//! Screens:
//!
//! - **PressStart**: player one's start opens the main menu and fixes the RNG seed
//! - **MainMenu**: marathon, versus or options
//! - **Options**: random bag toggle, sfx volume, music volume
//! - **Marathon**: player one plays at once, player two may join; rounds are unlinked
//! - **Versus**: both players join, rounds are linked, first to finish loses
//!
//! # Example
//!
//! ```
//! use tetrade_core::{Config, InputSnapshot, Screen, Session};
//! use tetrade_core::types::{Button, PlayerId};
//!
//! let mut session = Session::new(Config::default());
//! session.update(&InputSnapshot::pressing(PlayerId::One, Button::Start));
//! assert_eq!(session.screen(), Screen::MainMenu);
//!
//! // Marathon is the first entry
//! session.update(&InputSnapshot::pressing(PlayerId::One, Button::Confirm));
//! assert_eq!(session.screen(), Screen::Marathon);
//! ```

use crate::config::Config;
use crate::effects::Effects;
use crate::input::InputSource;
use crate::round::{FrameOutcome, Round};
use crate::scoring::music_sample_rate;
use crate::snapshot::SessionSnapshot;
use crate::types::{Button, PlayerId, Sample, MAX_VOLUME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    PressStart,
    MainMenu,
    Options,
    Marathon,
    Versus,
}

impl Screen {
    pub fn is_title(&self) -> bool {
        matches!(self, Screen::PressStart | Screen::MainMenu | Screen::Options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuEntry {
    Marathon,
    Versus,
    Options,
}

impl MainMenuEntry {
    pub const ALL: [MainMenuEntry; 3] = [
        MainMenuEntry::Marathon,
        MainMenuEntry::Versus,
        MainMenuEntry::Options,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MainMenuEntry::Marathon => "Marathon Mode",
            MainMenuEntry::Versus => "Versus Mode",
            MainMenuEntry::Options => "Options",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsEntry {
    RandomBag,
    SfxVolume,
    MusicVolume,
}

impl OptionsEntry {
    pub const ALL: [OptionsEntry; 3] = [
        OptionsEntry::RandomBag,
        OptionsEntry::SfxVolume,
        OptionsEntry::MusicVolume,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

pub struct Session {
    config: Config,
    screen: Screen,
    /// Highlighted entry of the current menu
    selected: usize,
    rounds: [Round; 2],
    started: [bool; 2],
    winner: Option<PlayerId>,
    music_playing: bool,
    frame: u32,
    seed: u32,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let config = config.sanitized();
        let seed = config.seed.unwrap_or(1);
        let randomizer = config.randomizer();
        Self {
            config,
            screen: Screen::PressStart,
            selected: 0,
            rounds: [
                Round::new(PlayerId::One, seed, randomizer),
                Round::new(PlayerId::Two, seed, randomizer),
            ],
            started: [false; 2],
            winner: None,
            music_playing: false,
            frame: 0,
            seed,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn round(&self, player: PlayerId) -> &Round {
        &self.rounds[player.index()]
    }

    /// Direct round access for scripted scenarios
    pub fn round_mut(&mut self, player: PlayerId) -> &mut Round {
        &mut self.rounds[player.index()]
    }

    pub fn started(&self, player: PlayerId) -> bool {
        self.started[player.index()]
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Frames since the session was created
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Advance one frame and return the effects it produced
    pub fn update<I: InputSource>(&mut self, input: &I) -> Effects {
        let mut effects = Effects::new(self.config.sfx_level(), self.config.music_level());

        match self.screen {
            Screen::PressStart => self.update_press_start(input, &mut effects),
            Screen::MainMenu => self.update_main_menu(input, &mut effects),
            Screen::Options => self.update_options(input, &mut effects),
            Screen::Marathon => self.update_marathon(input, &mut effects),
            Screen::Versus => self.update_versus(input, &mut effects),
        }

        self.frame = self.frame.wrapping_add(1);
        effects
    }

    fn update_press_start<I: InputSource>(&mut self, input: &I, effects: &mut Effects) {
        if !input.pressed(PlayerId::One, Button::Start) {
            return;
        }
        self.seed = self.config.seed.unwrap_or(self.frame);
        log::info!("seed: {}", self.seed);
        for round in &mut self.rounds {
            round.reseed(self.seed);
            round.reset(self.config.randomizer());
        }
        self.screen = Screen::MainMenu;
        self.selected = 0;
        effects.sfx(Sample::Confirm);
    }

    /// Up/down cursor movement shared by both menus
    fn move_cursor<I: InputSource>(&mut self, input: &I, entries: usize, effects: &mut Effects) {
        if input.pressed(PlayerId::One, Button::Up) {
            self.selected = (self.selected + entries - 1) % entries;
            effects.sfx(Sample::Click);
        }
        if input.pressed(PlayerId::One, Button::Down) {
            self.selected = (self.selected + 1) % entries;
            effects.sfx(Sample::Click);
        }
    }

    fn update_main_menu<I: InputSource>(&mut self, input: &I, effects: &mut Effects) {
        self.move_cursor(input, MainMenuEntry::ALL.len(), effects);

        let p1 = PlayerId::One;
        if !(input.pressed(p1, Button::Confirm) || input.pressed(p1, Button::Start)) {
            return;
        }
        effects.sfx(Sample::Confirm);
        match MainMenuEntry::from_index(self.selected) {
            Some(MainMenuEntry::Marathon) => {
                log::info!("marathon mode");
                self.enter_mode(Screen::Marathon);
            }
            Some(MainMenuEntry::Versus) => {
                log::info!("versus mode");
                self.enter_mode(Screen::Versus);
            }
            Some(MainMenuEntry::Options) => {
                self.screen = Screen::Options;
                self.selected = 0;
            }
            None => log::warn!("selection error: main menu entry {}", self.selected),
        }
    }

    fn enter_mode(&mut self, screen: Screen) {
        self.screen = screen;
        self.started = [false; 2];
        self.winner = None;
    }

    fn update_options<I: InputSource>(&mut self, input: &I, effects: &mut Effects) {
        self.move_cursor(input, OptionsEntry::ALL.len(), effects);

        let p1 = PlayerId::One;
        let left = input.pressed(p1, Button::Left);
        let right = input.pressed(p1, Button::Right);

        match OptionsEntry::from_index(self.selected) {
            Some(OptionsEntry::RandomBag) => {
                if input.pressed(p1, Button::Confirm) || input.pressed(p1, Button::Start) {
                    self.config.random_bag = !self.config.random_bag;
                    effects.sfx(Sample::Confirm);
                }
            }
            Some(OptionsEntry::SfxVolume) => {
                if step_volume(&mut self.config.sfx_volume, left, right) {
                    effects.set_volumes(self.config.sfx_level(), self.config.music_level());
                    effects.sfx(Sample::Confirm);
                }
            }
            Some(OptionsEntry::MusicVolume) => {
                if step_volume(&mut self.config.music_volume, left, right) {
                    effects.set_volumes(self.config.sfx_level(), self.config.music_level());
                    effects.sfx_at_music_volume(Sample::Confirm);
                }
            }
            None => log::warn!("selection error: options entry {}", self.selected),
        }

        if input.pressed(p1, Button::Cancel) {
            self.screen = Screen::MainMenu;
            self.selected = 0;
            effects.sfx(Sample::Confirm);
        }
    }

    fn update_marathon<I: InputSource>(&mut self, input: &I, effects: &mut Effects) {
        let randomizer = self.config.randomizer();

        if !self.started[0] {
            self.started[0] = true;
            let round = &mut self.rounds[0];
            round.set_opponent(None);
            round.reset(randomizer);
            self.start_music(effects);
        }

        let mut joined_now = false;
        if !self.started[1] && input.pressed(PlayerId::Two, Button::Start) {
            self.started[1] = true;
            joined_now = true;
            let round = &mut self.rounds[1];
            round.set_opponent(None);
            round.reset(randomizer);
            effects.sfx(Sample::Confirm);
            log::info!("player two joined marathon");
        }

        self.update_round(PlayerId::One, input, effects);
        // the join press must not also pause the new round
        if self.started[1] && !joined_now {
            self.update_round(PlayerId::Two, input, effects);
        }

        let p2_done = !self.started[1] || self.rounds[1].is_terminal();
        if self.rounds[0].is_terminal() && p2_done {
            self.return_to_menu(effects);
        }
    }

    fn update_versus<I: InputSource>(&mut self, input: &I, effects: &mut Effects) {
        let randomizer = self.config.randomizer();

        for player in PlayerId::ALL {
            let i = player.index();
            if !self.started[i] && input.pressed(player, Button::Start) {
                self.started[i] = true;
                let round = &mut self.rounds[i];
                round.set_opponent(Some(player.other()));
                round.reset(randomizer);
                effects.sfx(Sample::Confirm);
                log::info!("player {:?} joined versus", player);
            }
        }

        if !(self.started[0] && self.started[1]) {
            if input.pressed(PlayerId::One, Button::Cancel) {
                self.screen = Screen::MainMenu;
                self.started = [false; 2];
                effects.sfx(Sample::Confirm);
            }
            return;
        }

        let decided = self.winner.is_some();
        if !decided {
            self.update_round(PlayerId::One, input, effects);
            self.update_round(PlayerId::Two, input, effects);

            if !self.music_playing {
                self.start_music(effects);
            }

            if self.rounds[1].is_terminal() {
                self.winner = Some(PlayerId::One);
            } else if self.rounds[0].is_terminal() {
                self.winner = Some(PlayerId::Two);
            }
            if let Some(winner) = self.winner {
                log::info!("player {:?} wins", winner);
            }
        } else if input.pressed(PlayerId::One, Button::Start) {
            self.return_to_menu(effects);
        }
    }

    /// Update one round and apply what it produced to the session
    fn update_round<I: InputSource>(&mut self, player: PlayerId, input: &I, effects: &mut Effects) {
        let outcome = self.rounds[player.index()].update(input, effects);
        self.apply_outcome(player, outcome, effects);
    }

    fn apply_outcome(&mut self, player: PlayerId, outcome: FrameOutcome, effects: &mut Effects) {
        if outcome.garbage > 0 {
            if let Some(opponent) = self.rounds[player.index()].opponent() {
                let target = &mut self.rounds[opponent.index()];
                for _ in 0..outcome.garbage {
                    if target.receive_garbage().is_none() {
                        break;
                    }
                }
                log::debug!("player {:?} sent {} garbage rows", player, outcome.garbage);
            }
        }

        if outcome.leveled_up || outcome.continued {
            self.retune_music(player, effects);
        }
    }

    /// Pitch the music to the highest level among `player` and its opponent
    fn retune_music(&self, player: PlayerId, effects: &mut Effects) {
        let round = &self.rounds[player.index()];
        let level = match round.opponent() {
            Some(opponent) => round.level().max(self.rounds[opponent.index()].level()),
            None => round.level(),
        };
        effects.set_music_rate(music_sample_rate(level));
    }

    fn start_music(&mut self, effects: &mut Effects) {
        effects.start_music(Sample::Theme);
        self.music_playing = true;
    }

    fn return_to_menu(&mut self, effects: &mut Effects) {
        log::info!(
            "back to menu (scores: {} / {})",
            self.rounds[0].score(),
            self.rounds[1].score()
        );
        self.screen = Screen::MainMenu;
        self.started = [false; 2];
        self.winner = None;
        let randomizer = self.config.randomizer();
        for round in &mut self.rounds {
            round.set_opponent(None);
            round.reset(randomizer);
        }
        effects.stop_music();
        self.music_playing = false;
    }

    /// Fill `out` with the current state, for the render pass
    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.screen = self.screen;
        out.selected = self.selected;
        out.config = self.config;
        for (snap, round) in out.rounds.iter_mut().zip(&self.rounds) {
            round.snapshot_into(snap);
        }
        out.started = self.started;
        out.winner = self.winner;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut snap = SessionSnapshot::new();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Left lowers and right raises a `0..=MAX_VOLUME` setting; returns whether it changed
fn step_volume(volume: &mut u8, left: bool, right: bool) -> bool {
    let mut changed = false;
    if left && *volume > 0 {
        *volume -= 1;
        changed = true;
    }
    if right && *volume < MAX_VOLUME {
        *volume += 1;
        changed = true;
    }
    changed
}
