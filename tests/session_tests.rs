//! Session tests - menus, options, marathon and versus flow

use tetrade::core::board::Board;
use tetrade::core::config::volume_level;
use tetrade::core::rotation::rotate_shape;
use tetrade::core::{
    Config, Effect, Effects, InputSnapshot, RoundPhase, SampleHandle, Screen, Session, Tetromino,
};
use tetrade::types::{Button, PieceKind, PlayerId, RotateDirection, Rotation, Sample, GARBAGE_CELL};

const P1: PlayerId = PlayerId::One;
const P2: PlayerId = PlayerId::Two;

fn seeded(seed: u32) -> Session {
    Session::new(Config {
        seed: Some(seed),
        ..Config::default()
    })
}

fn press(session: &mut Session, player: PlayerId, button: Button) -> Effects {
    session.update(&InputSnapshot::pressing(player, button))
}

fn idle(session: &mut Session, frames: u32) {
    for _ in 0..frames {
        session.update(&InputSnapshot::new());
    }
}

/// Idle until `done` holds, failing after `limit` frames
fn run_until(session: &mut Session, limit: u32, done: impl Fn(&Session) -> bool) {
    for _ in 0..limit {
        if done(session) {
            return;
        }
        session.update(&InputSnapshot::new());
    }
    assert!(done(session), "condition not reached in {limit} frames");
}

fn has_effect(fx: &Effects, effect: Effect) -> bool {
    fx.as_slice().contains(&effect)
}

fn block_spawn(session: &mut Session, player: PlayerId) {
    let board = session.round_mut(player).board_mut();
    for y in 0..2 {
        for x in 0..9 {
            board.set(x, y, GARBAGE_CELL);
        }
    }
}

fn enter_marathon(seed: u32) -> Session {
    let mut session = seeded(seed);
    press(&mut session, P1, Button::Start);
    press(&mut session, P1, Button::Confirm);
    assert_eq!(session.screen(), Screen::Marathon);
    session
}

/// Versus with both players joined on the same frame
fn enter_versus(seed: u32) -> Session {
    let mut session = seeded(seed);
    press(&mut session, P1, Button::Start);
    press(&mut session, P1, Button::Down);
    press(&mut session, P1, Button::Confirm);
    assert_eq!(session.screen(), Screen::Versus);

    let mut both = InputSnapshot::new();
    both.press(P1, Button::Start).press(P2, Button::Start);
    session.update(&both);
    assert!(session.started(P1) && session.started(P2));
    session
}

fn upright_i(x: i8) -> Tetromino {
    let mut piece = Tetromino::pick(PieceKind::I);
    piece.shape = rotate_shape(&piece.shape, 4, RotateDirection::Clockwise);
    piece.rotation = Rotation::East;
    piece.at(x, 0)
}

#[test]
fn test_press_start_only_answers_player_one_start() {
    let mut session = seeded(1);
    press(&mut session, P2, Button::Start);
    press(&mut session, P1, Button::Confirm);
    assert_eq!(session.screen(), Screen::PressStart);

    let fx = press(&mut session, P1, Button::Start);
    assert_eq!(session.screen(), Screen::MainMenu);
    assert!(fx.contains_sfx(Sample::Confirm));
    assert!(session.screen().is_title());
}

#[test]
fn test_menu_cursor_and_selection() {
    let mut session = seeded(1);
    press(&mut session, P1, Button::Start);

    let fx = press(&mut session, P1, Button::Down);
    assert_eq!(session.selected(), 1);
    assert!(fx.contains_sfx(Sample::Click));
    press(&mut session, P1, Button::Down);
    press(&mut session, P1, Button::Down);
    assert_eq!(session.selected(), 0);

    press(&mut session, P1, Button::Up);
    assert_eq!(session.selected(), 2);
    press(&mut session, P1, Button::Start);
    assert_eq!(session.screen(), Screen::Options);
    assert_eq!(session.selected(), 0);
}

#[test]
fn test_options_edit_config() {
    let mut session = seeded(1);
    press(&mut session, P1, Button::Start);
    press(&mut session, P1, Button::Up);
    press(&mut session, P1, Button::Confirm);
    assert_eq!(session.screen(), Screen::Options);

    press(&mut session, P1, Button::Confirm);
    assert!(!session.config().random_bag);

    press(&mut session, P1, Button::Down);
    let fx = press(&mut session, P1, Button::Left);
    assert_eq!(session.config().sfx_volume, 10);
    assert!(has_effect(
        &fx,
        Effect::Play(SampleHandle {
            sample: Sample::Confirm,
            volume: volume_level(10),
        })
    ));

    press(&mut session, P1, Button::Down);
    let fx = press(&mut session, P1, Button::Right);
    assert_eq!(session.config().music_volume, 6);
    // the music volume is previewed at its own level
    assert!(has_effect(
        &fx,
        Effect::Play(SampleHandle {
            sample: Sample::Confirm,
            volume: volume_level(6),
        })
    ));

    // already at the top
    for _ in 0..10 {
        press(&mut session, P1, Button::Right);
    }
    assert_eq!(session.config().music_volume, 11);
    assert!(press(&mut session, P1, Button::Right).is_empty());

    press(&mut session, P1, Button::Cancel);
    assert_eq!(session.screen(), Screen::MainMenu);
    assert_eq!(session.selected(), 0);
}

#[test]
fn test_marathon_starts_music_and_player_one() {
    let mut session = enter_marathon(3);
    let fx = session.update(&InputSnapshot::new());

    assert!(session.started(P1));
    assert!(!session.started(P2));
    assert!(session.music_playing());
    assert!(has_effect(
        &fx,
        Effect::PlayMusic(SampleHandle {
            sample: Sample::Theme,
            volume: volume_level(5),
        })
    ));
    assert_eq!(
        session.round(P1).phase(),
        RoundPhase::Resuming { frames_left: 179 }
    );
    assert_eq!(session.round(P1).opponent(), None);
}

#[test]
fn test_player_two_joins_marathon() {
    let mut session = enter_marathon(3);
    idle(&mut session, 30);

    let fx = press(&mut session, P2, Button::Start);
    assert!(session.started(P2));
    assert!(fx.contains_sfx(Sample::Confirm));
    // the join frame does not count down (or pause) the new round
    assert_eq!(session.round(P2).phase(), RoundPhase::starting());
    assert_eq!(session.round(P2).opponent(), None);

    idle(&mut session, 1);
    assert_eq!(
        session.round(P2).phase(),
        RoundPhase::Resuming { frames_left: 179 }
    );
}

#[test]
fn test_marathon_returns_to_menu_when_player_one_gives_up() {
    let mut session = enter_marathon(3);
    idle(&mut session, 1);
    block_spawn(&mut session, P1);

    run_until(&mut session, 400, |s| {
        matches!(s.round(P1).phase(), RoundPhase::ContinuePrompt { .. })
    });

    let fx = press(&mut session, P1, Button::Cancel);
    assert_eq!(session.screen(), Screen::MainMenu);
    assert!(has_effect(&fx, Effect::StopMusic));
    assert!(!session.music_playing());
    assert!(!session.started(P1));
}

#[test]
fn test_level_up_retunes_music() {
    let mut session = enter_marathon(11);
    run_until(&mut session, 400, |s| s.round(P1).phase() == RoundPhase::Active);

    let mut rates = Vec::new();
    for _ in 0..2 {
        let round = session.round_mut(P1);
        *round.board_mut() = Board::from_rows(&[
            "#########.",
            "#########.",
            "#########.",
            "#########.",
        ]);
        round.set_active(Some(upright_i(7)));

        let fx = press(&mut session, P1, Button::Up);
        rates.extend(fx.iter().filter_map(|e| match e {
            Effect::SetMusicRate(rate) => Some(*rate),
            _ => None,
        }));
    }

    assert_eq!(session.round(P1).level(), 1);
    assert_eq!(session.round(P1).scoreboard().tally().tetrises, 2);
    assert_eq!(rates, vec![23152]);
}

#[test]
fn test_versus_cancel_before_both_join() {
    let mut session = seeded(2);
    press(&mut session, P1, Button::Start);
    press(&mut session, P1, Button::Down);
    press(&mut session, P1, Button::Confirm);

    press(&mut session, P1, Button::Start);
    assert!(session.started(P1));
    assert!(!session.music_playing());

    press(&mut session, P1, Button::Cancel);
    assert_eq!(session.screen(), Screen::MainMenu);
    assert!(!session.started(P1));
}

#[test]
fn test_versus_links_rounds_and_starts_music() {
    let session = enter_versus(4);
    assert!(session.music_playing());
    assert_eq!(session.round(P1).opponent(), Some(P2));
    assert_eq!(session.round(P2).opponent(), Some(P1));
    assert_eq!(session.winner(), None);
}

#[test]
fn test_garbage_arrives_on_the_same_frame() {
    let mut session = enter_versus(4);
    run_until(&mut session, 400, |s| {
        s.round(P1).phase() == RoundPhase::Active && s.round(P2).phase() == RoundPhase::Active
    });

    let round = session.round_mut(P1);
    *round.board_mut() = Board::from_rows(&["####..####", "####..####"]);
    round.set_active(Some(Tetromino::pick(PieceKind::O)));

    press(&mut session, P1, Button::Up);

    let p2 = session.round(P2).board();
    for y in [18, 19] {
        let garbage = (0..10).filter(|&x| p2.get(x, y) == Some(GARBAGE_CELL)).count();
        assert_eq!(garbage, 9, "row {y}");
    }
    assert!(session.round(P1).board().cells().iter().all(|&c| c == 0));
}

#[test]
fn test_versus_winner_when_opponent_tops_out() {
    let mut session = enter_versus(5);
    block_spawn(&mut session, P2);

    run_until(&mut session, 400, |s| s.winner().is_some());
    assert_eq!(session.winner(), Some(P1));
    assert!(session.round(P2).is_terminal());
    assert!(!session.round(P1).is_game_over());
}

#[test]
fn test_simultaneous_top_out_goes_to_player_one() {
    let mut session = enter_versus(5);
    block_spawn(&mut session, P1);
    block_spawn(&mut session, P2);

    run_until(&mut session, 400, |s| s.winner().is_some());
    assert_eq!(session.winner(), Some(P1));
    assert!(session.round(P1).is_terminal());
}

#[test]
fn test_decided_versus_freezes_and_returns_on_start() {
    let mut session = enter_versus(6);
    block_spawn(&mut session, P2);
    run_until(&mut session, 400, |s| s.winner().is_some());

    let frozen = session.snapshot();
    idle(&mut session, 90);
    press(&mut session, P2, Button::Start);
    assert_eq!(session.snapshot(), frozen);

    let fx = press(&mut session, P1, Button::Start);
    assert_eq!(session.screen(), Screen::MainMenu);
    assert!(has_effect(&fx, Effect::StopMusic));
    assert_eq!(session.winner(), None);
    assert_eq!(session.round(P1).opponent(), None);
    assert_eq!(session.round(P2).opponent(), None);
}

#[test]
fn test_same_seed_same_session() {
    let script = |session: &mut Session| {
        let mut snaps = Vec::new();
        for frame in 0..900u32 {
            let input = match frame {
                0 => InputSnapshot::pressing(P1, Button::Start),
                1 => InputSnapshot::pressing(P1, Button::Confirm),
                400 => InputSnapshot::pressing(P2, Button::Start),
                f if f % 25 == 0 => InputSnapshot::pressing(P1, Button::Up),
                f if f % 25 == 7 => InputSnapshot::pressing(P2, Button::Left),
                f if f % 25 == 13 => InputSnapshot::pressing(P1, Button::Cancel),
                _ => InputSnapshot::new(),
            };
            session.update(&input);
            snaps.push(session.snapshot());
        }
        snaps
    };

    let mut a = seeded(99);
    let mut b = seeded(99);
    assert_eq!(script(&mut a), script(&mut b));
}
