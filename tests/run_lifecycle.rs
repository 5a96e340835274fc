//! Full session lifecycle through the public API

use gap_glider::audio::SilentAudio;
use gap_glider::best_score::MemoryStore;
use gap_glider::platform::{BestScoreStore, Viewport};
use gap_glider::renderer::NullSurface;
use gap_glider::schedule::Ticket;
use gap_glider::{CountdownStep, FrameStep, Game, Phase, Settings, Tuning};

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_FRAMES: u32 = 20_000;

type TestGame = Game<SilentAudio, MemoryStore>;

/// Gaps wide enough that hovering around the middle always clears them
fn wide_gap_tuning() -> Tuning {
    Tuning {
        base_gap: 600.0,
        ..Tuning::default()
    }
}

fn new_game(store: MemoryStore) -> TestGame {
    Game::new(
        Viewport::default(),
        wide_gap_tuning(),
        &Settings::default(),
        SilentAudio,
        store,
        99,
    )
}

fn run_countdown(game: &mut TestGame, ticket: Ticket) -> Ticket {
    loop {
        match game.countdown_step(ticket) {
            CountdownStep::Tick { .. } => {}
            CountdownStep::Go(frame) => return frame,
            CountdownStep::Stale => panic!("countdown went stale"),
        }
    }
}

/// Hover until `target` points, then stop flapping and fall
fn play_until_over(game: &mut TestGame, mut ticket: Ticket, target: u64) -> (u64, bool) {
    let mut surface = NullSurface::default();
    let mut last_score = 0;
    for frame in 0..MAX_FRAMES {
        let actor = game.state().actor;
        if game.score() < target && actor.pos.y > 320.0 && actor.velocity_y >= 0.0 {
            assert!(game.jump());
        }
        match game.frame(ticket, &mut surface, f64::from(frame) * FRAME_MS) {
            FrameStep::Continue(next) => ticket = next,
            FrameStep::Ended { score, new_best } => return (score, new_best),
            FrameStep::Stale => panic!("live frame ticket rejected"),
        }
        assert!(game.score() >= last_score, "score went backwards");
        last_score = game.score();
    }
    panic!("run never ended");
}

#[test]
fn test_idle_to_game_over_and_restart() {
    let mut game = new_game(MemoryStore::new());
    assert_eq!(game.phase(), Phase::Idle);
    assert!(game.hud().start_screen_visible);

    let countdown = game.start().expect("start from idle");
    assert!(matches!(game.phase(), Phase::CountingDown { remaining: 3 }));
    assert_eq!(game.hud().countdown_text.as_deref(), Some("3"));

    let frame = run_countdown(&mut game, countdown);
    assert_eq!(game.phase(), Phase::Running);
    assert!(!game.is_live(countdown));

    let (score, new_best) = play_until_over(&mut game, frame, 3);
    assert!(score >= 3);
    assert!(new_best);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.best_score(), score);
    assert_eq!(game.store().load(), Some(score));
    assert!(!game.is_live(frame));

    let hud = game.hud();
    assert!(hud.game_over_visible);
    assert_eq!(hud.final_score_text, format!("Score: {score}"));
    assert_eq!(hud.best_text, format!("Best Score: {score}"));

    // Stale continuations from the finished run do nothing
    let mut surface = NullSurface::default();
    assert_eq!(game.frame(frame, &mut surface, 0.0), FrameStep::Stale);
    assert_eq!(surface.frames, 0);

    let again = game.restart().expect("restart from game over");
    assert!(matches!(game.phase(), Phase::CountingDown { .. }));
    assert_eq!(game.score(), 0);
    assert_eq!(game.state().obstacles.len(), 1);
    assert_eq!(game.state().obstacles[0].x, 480.0);
    assert_eq!(game.state().actor.velocity_y, 0.0);
    assert_eq!(game.state().difficulty.gap, 600.0);
    assert_eq!(game.best_score(), score);
    assert!(game.is_live(again));
}

#[test]
fn test_lower_score_keeps_stored_best() {
    let mut game = new_game(MemoryStore::with_best(1_000));
    assert_eq!(game.best_score(), 1_000);

    let countdown = game.start().expect("start");
    let frame = run_countdown(&mut game, countdown);
    let (score, new_best) = play_until_over(&mut game, frame, 1);

    assert!(score < 1_000);
    assert!(!new_best);
    assert_eq!(game.best_score(), 1_000);
    assert!(game.store().writes.is_empty());
}

#[test]
fn test_reset_during_countdown_cancels_it() {
    let mut game = new_game(MemoryStore::new());
    let countdown = game.start().expect("start");
    assert!(matches!(
        game.countdown_step(countdown),
        CountdownStep::Tick { remaining: 2 }
    ));

    game.reset();
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.countdown_step(countdown), CountdownStep::Stale);
    assert_eq!(game.phase(), Phase::Idle);
}

#[test]
fn test_resize_mid_run_resets_to_idle() {
    let mut game = new_game(MemoryStore::new());
    let countdown = game.start().expect("start");
    let frame = run_countdown(&mut game, countdown);

    let mut surface = NullSurface::default();
    assert!(matches!(
        game.frame(frame, &mut surface, FRAME_MS),
        FrameStep::Continue(_)
    ));

    game.resize(Viewport::new(300.0, 500.0));
    assert_eq!(game.phase(), Phase::Idle);
    assert!(!game.state().running);
    assert_eq!(game.state().obstacles[0].x, 300.0);
    assert_eq!(game.state().actor.pos.y, 250.0);
    assert_eq!(game.frame(frame, &mut surface, 2.0 * FRAME_MS), FrameStep::Stale);
    assert!(!game.jump());
}
