//! Round module - one player's game
//!
//! A round owns everything a single player needs: board, active piece, queue, hold slot,
//! score and timers. Its lifecycle is the [`RoundPhase`] tagged union; every phase change
//! goes through [`RoundPhase::next`], so illegal transitions cannot happen.
//!
//! # Frame order (active phase)
//!
//! 1. horizontal move (press moves at once, hold repeats after a cooldown)
//! 2. soft drop flag (drop button held)
//! 3. rotation (cancel turns clockwise, confirm counter-clockwise)
//! 4. hard drop, or else hold
//! 5. spawn when no piece is active; a blocked spawn tops out and ends the frame
//! 6. gravity and lock delay
//! 7. line clear and scoring
//! 8. timers
//!
//! A round with an opponent is in versus play: it cannot pause, has no continue prompt, and
//! reports every cleared line as garbage for the opponent.

use crate::board::{Board, SweepCursor};
use crate::effects::Effects;
use crate::gravity::DropScheduler;
use crate::input::InputSource;
use crate::pieces::Tetromino;
use crate::queue::{hold, HoldOutcome, HoldSlot, PieceQueue, Randomizer};
use crate::rng::SimpleRng;
use crate::rotation::try_rotate;
use crate::scoring::ScoreBoard;
use crate::snapshot::{ActiveSnapshot, RoundSnapshot};
use crate::types::{
    Button, PieceKind, PlayerId, RotateDirection, Sample, CONTINUE_FRAMES, FRAME_RATE,
    GAME_OVER_FRAMES, NEXT_PREVIEW, RESUME_FRAMES,
};

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Countdown before play starts or resumes
    Resuming { frames_left: u32 },
    Active,
    Paused,
    /// Top out: the board is grayed out two cells per frame
    GameOver { cursor: SweepCursor, frames: u32 },
    /// Solo only: waiting for the player to continue
    ContinuePrompt { frames_left: u32 },
    /// Finished for good
    Terminal,
}

/// Things that move a round between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    CountdownElapsed,
    PausePressed,
    ResumePressed,
    ToppedOut,
    SweepDone { versus: bool },
    ContinueAccepted,
    ContinueDeclined,
    ContinueExpired,
}

impl RoundPhase {
    /// The phase a round starts (and restarts) in
    pub fn starting() -> Self {
        RoundPhase::Resuming {
            frames_left: RESUME_FRAMES,
        }
    }

    /// Transition table
    ///
    /// | from | event | to |
    /// |------|-------|----|
    /// | Resuming | countdown elapsed | Active |
    /// | Resuming, Active | pause | Paused |
    /// | Paused | resume | Resuming (3 s) |
    /// | Active | topped out | GameOver |
    /// | GameOver | sweep done, solo | ContinuePrompt (10 s) |
    /// | GameOver | sweep done, versus | Terminal |
    /// | ContinuePrompt | accepted | Resuming (3 s) |
    /// | ContinuePrompt | declined, expired | Terminal |
    ///
    /// Returns `None` for any other combination.
    pub fn next(&self, event: RoundEvent) -> Option<RoundPhase> {
        use RoundEvent as E;
        use RoundPhase as P;

        match (self, event) {
            (P::Resuming { .. }, E::CountdownElapsed) => Some(P::Active),
            (P::Resuming { .. } | P::Active, E::PausePressed) => Some(P::Paused),
            (P::Paused, E::ResumePressed) => Some(P::starting()),
            (P::Active, E::ToppedOut) => Some(P::GameOver {
                cursor: SweepCursor::new(),
                frames: 0,
            }),
            (P::GameOver { .. }, E::SweepDone { versus: false }) => Some(P::ContinuePrompt {
                frames_left: CONTINUE_FRAMES,
            }),
            (P::GameOver { .. }, E::SweepDone { versus: true }) => Some(P::Terminal),
            (P::ContinuePrompt { .. }, E::ContinueAccepted) => Some(P::starting()),
            (P::ContinuePrompt { .. }, E::ContinueDeclined | E::ContinueExpired) => {
                Some(P::Terminal)
            }
            _ => None,
        }
    }

    /// Topped out and not yet restarted
    pub fn is_game_over(&self) -> bool {
        matches!(
            self,
            RoundPhase::GameOver { .. } | RoundPhase::ContinuePrompt { .. } | RoundPhase::Terminal
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundPhase::Terminal)
    }

    /// Whole seconds left on the resume or continue countdown
    pub fn countdown_seconds(&self) -> Option<u32> {
        match *self {
            RoundPhase::Resuming { frames_left } | RoundPhase::ContinuePrompt { frames_left } => {
                Some(frames_left.div_ceil(FRAME_RATE))
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RoundPhase::Resuming { .. } => "resuming",
            RoundPhase::Active => "active",
            RoundPhase::Paused => "paused",
            RoundPhase::GameOver { .. } => "game_over",
            RoundPhase::ContinuePrompt { .. } => "continue_prompt",
            RoundPhase::Terminal => "terminal",
        }
    }
}

/// What happened during one [`Round::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Rows removed this frame
    pub lines_cleared: u8,
    /// Garbage rows owed to the opponent
    pub garbage: u8,
    pub leveled_up: bool,
    pub topped_out: bool,
    /// The player accepted the continue prompt and the round restarted
    pub continued: bool,
    /// The round became terminal this frame
    pub finished: bool,
}

/// One player's game
#[derive(Debug, Clone)]
pub struct Round {
    player: PlayerId,
    board: Board,
    active: Option<Tetromino>,
    queue: PieceQueue,
    hold: HoldSlot,
    score: ScoreBoard,
    scheduler: DropScheduler,
    phase: RoundPhase,
    rng: SimpleRng,
    randomizer: Randomizer,
    opponent: Option<PlayerId>,
}

impl Round {
    pub fn new(player: PlayerId, seed: u32, randomizer: Randomizer) -> Self {
        let mut rng = SimpleRng::new(player_seed(player, seed));
        let queue = PieceQueue::new(randomizer, &mut rng);
        Self {
            player,
            board: Board::new(),
            active: None,
            queue,
            hold: HoldSlot::default(),
            score: ScoreBoard::new(),
            scheduler: DropScheduler::new(),
            phase: RoundPhase::starting(),
            rng,
            randomizer,
            opponent: None,
        }
    }

    /// Start over with an empty board and the resume countdown
    ///
    /// The opponent link and the RNG stream are kept.
    pub fn reset(&mut self, randomizer: Randomizer) {
        self.randomizer = randomizer;
        self.board.clear();
        self.active = None;
        self.hold.clear();
        self.score.reset();
        self.scheduler.reset();
        self.queue.reset(randomizer, &mut self.rng);
        self.phase = RoundPhase::starting();
    }

    /// Restart the RNG stream from `seed`
    pub fn reseed(&mut self, seed: u32) {
        self.rng = SimpleRng::new(player_seed(self.player, seed));
    }

    pub fn set_opponent(&mut self, opponent: Option<PlayerId>) {
        self.opponent = opponent;
    }

    pub fn opponent(&self) -> Option<PlayerId> {
        self.opponent
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted scenarios
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    /// Replace the active piece, for scripted scenarios
    pub fn set_active(&mut self, piece: Option<Tetromino>) {
        self.active = piece;
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.hold.kind()
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn scheduler(&self) -> &DropScheduler {
        &self.scheduler
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Garbage only lands on rounds that are still alive
    pub fn accepts_garbage(&self) -> bool {
        !self.phase.is_game_over()
    }

    fn is_versus(&self) -> bool {
        self.opponent.is_some()
    }

    /// Where the active piece would land
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.as_ref().map(|p| self.board.landing_y(p))
    }

    fn transition(&mut self, event: RoundEvent) -> bool {
        match self.phase.next(event) {
            Some(next) => {
                log::debug!(
                    "player {:?}: {} -> {} on {:?}",
                    self.player,
                    self.phase.name(),
                    next.name(),
                    event
                );
                self.phase = next;
                true
            }
            None => {
                log::debug!(
                    "player {:?}: {:?} ignored while {}",
                    self.player,
                    event,
                    self.phase.name()
                );
                false
            }
        }
    }

    /// Push one garbage row into this round; returns the gap column, or `None` when the
    /// round is already over
    pub fn receive_garbage(&mut self) -> Option<u8> {
        if !self.accepts_garbage() {
            return None;
        }
        Some(self.board.add_garbage_row(&mut self.rng))
    }

    /// Advance one frame
    pub fn update<I: InputSource>(&mut self, input: &I, effects: &mut Effects) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        let start = input.pressed(self.player, Button::Start);

        match self.phase {
            RoundPhase::Terminal => {}
            RoundPhase::GameOver { .. } | RoundPhase::ContinuePrompt { .. } => {
                self.update_game_over(input, &mut outcome);
            }
            RoundPhase::Paused => {
                if start {
                    self.transition(RoundEvent::ResumePressed);
                }
            }
            RoundPhase::Resuming { frames_left } => {
                if start && !self.is_versus() {
                    self.transition(RoundEvent::PausePressed);
                } else if frames_left > 1 {
                    self.phase = RoundPhase::Resuming {
                        frames_left: frames_left - 1,
                    };
                } else {
                    self.transition(RoundEvent::CountdownElapsed);
                    self.update_active(input, effects, &mut outcome);
                }
            }
            RoundPhase::Active => {
                if start && !self.is_versus() {
                    self.transition(RoundEvent::PausePressed);
                } else {
                    self.update_active(input, effects, &mut outcome);
                }
            }
        }

        outcome
    }

    fn update_active<I: InputSource>(
        &mut self,
        input: &I,
        effects: &mut Effects,
        outcome: &mut FrameOutcome,
    ) {
        let p = self.player;
        let level = self.score.level();

        for (button, dx) in [(Button::Left, -1), (Button::Right, 1)] {
            if input.pressed(p, button) {
                if self.shift(dx) {
                    self.scheduler.on_move_press();
                    effects.sfx(Sample::Click);
                }
                break;
            }
            if input.held(p, button) {
                if self.scheduler.can_repeat_move() && self.shift(dx) {
                    effects.sfx(Sample::Click);
                }
                break;
            }
        }

        let soft_drop = input.held(p, Button::Down);

        let direction = if input.pressed(p, Button::Cancel) {
            Some(RotateDirection::Clockwise)
        } else if input.pressed(p, Button::Confirm) {
            Some(RotateDirection::CounterClockwise)
        } else {
            None
        };
        if let (Some(direction), Some(piece)) = (direction, self.active.as_ref()) {
            if let Some(rotated) = try_rotate(piece, direction, &self.board) {
                self.active = Some(rotated);
            }
        }

        if input.pressed(p, Button::Up) {
            if let Some(piece) = self.active.take() {
                let rows = self.board.drop_distance(&piece);
                self.score.add_drop(rows, true);
                self.board.place(&piece.at(piece.x, piece.y + rows as i8));
                effects.sfx(Sample::Place);
            }
        } else if [Button::Hold, Button::ShoulderL, Button::ShoulderR]
            .iter()
            .any(|&b| input.pressed(p, b))
        {
            match hold(&mut self.active, &mut self.hold, &mut self.queue, &mut self.rng) {
                HoldOutcome::Held => {
                    effects.sfx(Sample::Hold);
                    if let Some(piece) = self.active.filter(|pc| !self.fits(pc)) {
                        self.top_out(piece, outcome);
                        return;
                    }
                }
                HoldOutcome::Refused => effects.sfx(Sample::Negative),
                HoldOutcome::NoPiece => {}
            }
        }

        if self.active.is_none() {
            let piece = self.queue.dequeue(&mut self.rng);
            if !self.fits(&piece) {
                self.top_out(piece, outcome);
                return;
            }
            self.active = Some(piece);
        }

        if let Some(piece) = self.active {
            if self.scheduler.is_gravity_frame(level, soft_drop) {
                if self.board.is_valid_placement(piece.x, piece.y + 1, &piece) {
                    self.active = Some(piece.at(piece.x, piece.y + 1));
                    self.scheduler.on_descend();
                    if soft_drop {
                        self.score.add_drop(1, false);
                        effects.sfx(Sample::Click);
                    }
                } else if self.scheduler.lock_expired() {
                    self.board.place(&piece);
                    self.active = None;
                    effects.sfx(Sample::Place);
                }
            }
        }

        let lines = self.board.clear_full_rows();
        if lines > 0 {
            let result = self.score.apply_clear(lines);
            outcome.lines_cleared = lines as u8;
            outcome.leveled_up = result.leveled_up;
            if self.is_versus() {
                outcome.garbage = lines as u8;
            }
            effects.sfx(Sample::LineClear);
            if result.leveled_up {
                log::info!("player {:?} reached level {}", p, self.score.level());
            }
        }

        self.scheduler.end_frame();
    }

    fn fits(&self, piece: &Tetromino) -> bool {
        self.board.is_valid_placement(piece.x, piece.y, piece)
    }

    fn shift(&mut self, dx: i8) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if self.board.is_valid_placement(piece.x + dx, piece.y, piece) {
            piece.x += dx;
            true
        } else {
            false
        }
    }

    fn top_out(&mut self, piece: Tetromino, outcome: &mut FrameOutcome) {
        self.board.place(&piece);
        self.active = None;
        self.transition(RoundEvent::ToppedOut);
        outcome.topped_out = true;
        log::info!(
            "player {:?} topped out: score {}, level {}, lines {}",
            self.player,
            self.score.score(),
            self.score.level(),
            self.score.lines()
        );
    }

    fn update_game_over<I: InputSource>(&mut self, input: &I, outcome: &mut FrameOutcome) {
        let p = self.player;
        let versus = self.is_versus();

        let event = match &mut self.phase {
            RoundPhase::GameOver { cursor, frames } => {
                self.board.sweep_step(cursor);
                if *frames > GAME_OVER_FRAMES {
                    Some(RoundEvent::SweepDone { versus })
                } else {
                    *frames += 1;
                    None
                }
            }
            RoundPhase::ContinuePrompt { frames_left } => {
                if input.pressed(p, Button::Start) {
                    Some(RoundEvent::ContinueAccepted)
                } else if input.pressed(p, Button::Cancel) {
                    Some(RoundEvent::ContinueDeclined)
                } else if *frames_left < 1 {
                    Some(RoundEvent::ContinueExpired)
                } else {
                    *frames_left -= 1;
                    None
                }
            }
            _ => None,
        };

        let Some(event) = event else {
            return;
        };
        if !self.transition(event) {
            return;
        }
        if event == RoundEvent::ContinueAccepted {
            self.reset(self.randomizer);
            outcome.continued = true;
        }
        outcome.finished = self.phase.is_terminal();
    }

    /// Fill `out` with the current state, for the render pass
    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.player = self.player;
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold.kind();
        out.next = [None; NEXT_PREVIEW];
        for (slot, &kind) in out.next.iter_mut().zip(self.queue.peek(NEXT_PREVIEW)) {
            *slot = Some(kind);
        }
        out.score = self.score.score();
        out.level = self.score.level();
        out.lines = self.score.lines();
        out.phase = self.phase;
        out.versus = self.is_versus();
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut snap = RoundSnapshot::new(self.player);
        self.snapshot_into(&mut snap);
        snap
    }
}

fn player_seed(player: PlayerId, seed: u32) -> u32 {
    match player {
        PlayerId::One => seed,
        PlayerId::Two => seed ^ 0x9E37_79B9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;

    fn active_round() -> Round {
        let mut round = Round::new(PlayerId::One, 42, Randomizer::Bag);
        round.phase = RoundPhase::Active;
        round
    }

    #[test]
    fn transition_table_rejects_unknown_pairs() {
        assert_eq!(RoundPhase::Active.next(RoundEvent::ResumePressed), None);
        assert_eq!(RoundPhase::Terminal.next(RoundEvent::ContinueAccepted), None);
        assert_eq!(RoundPhase::Paused.next(RoundEvent::ToppedOut), None);
    }

    #[test]
    fn countdown_shows_whole_seconds() {
        assert_eq!(RoundPhase::starting().countdown_seconds(), Some(3));
        assert_eq!(
            RoundPhase::Resuming { frames_left: 61 }.countdown_seconds(),
            Some(2)
        );
        assert_eq!(
            RoundPhase::ContinuePrompt { frames_left: 600 }.countdown_seconds(),
            Some(10)
        );
        assert_eq!(RoundPhase::Active.countdown_seconds(), None);
    }

    #[test]
    fn resume_countdown_skips_179_frames() {
        let mut round = Round::new(PlayerId::One, 1, Randomizer::Bag);
        let mut fx = Effects::default();
        let idle = InputSnapshot::new();
        for _ in 0..RESUME_FRAMES - 1 {
            round.update(&idle, &mut fx);
            assert!(round.active().is_none());
        }
        round.update(&idle, &mut fx);
        assert_eq!(round.phase(), RoundPhase::Active);
        assert!(round.active().is_some());
    }

    #[test]
    fn first_active_frame_spawns_and_drops() {
        let mut round = active_round();
        let mut fx = Effects::default();
        round.update(&InputSnapshot::new(), &mut fx);
        let piece = round.active().copied().unwrap();
        // game_timer 0 is a gravity frame
        let spawn_y = Tetromino::pick(piece.kind).y;
        assert_eq!(piece.y, spawn_y + 1);
    }

    #[test]
    fn hard_drop_scores_two_per_row() {
        let mut round = active_round();
        round.set_active(Some(Tetromino::pick(PieceKind::O)));
        let mut fx = Effects::default();
        round.update(&InputSnapshot::pressing(PlayerId::One, Button::Up), &mut fx);
        // O occupies rows 1..2 of its box; lands with y = 17
        assert_eq!(round.score(), 17 * 2);
        assert_eq!(round.board().get(4, 19), Some(PieceKind::O.id()));
        assert!(fx.contains_sfx(Sample::Place));
    }
}
