//! Property tests for the session state machine.
//!
//! Random command sequences, interleaved with random amounts of simulated
//! time, are played against generated worlds. Score and distance must never
//! go down within a run and a run ends at most once.

use lane_crosser::GameConfig;
use lane_crosser::consts::SIM_DT;
use lane_crosser::platform::Command;
use lane_crosser::sim::{Facing, GameEvent, GamePhase, GameSession, TickInput, tick};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Press(Command),
    Wait(u32),
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => Just(Command::MoveUp),
        1 => Just(Command::MoveDown),
        1 => Just(Command::MoveLeft),
        1 => Just(Command::MoveRight),
        1 => Just(Command::TogglePause),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => command_strategy().prop_map(Op::Press),
        2 => (1u32..30).prop_map(Op::Wait),
    ]
}

fn run_tick(session: &mut GameSession, input: &TickInput) {
    tick(session, input, SIM_DT);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn score_and_distance_never_decrease(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..120),
    ) {
        let mut session = GameSession::new(GameConfig::default(), seed, 0);
        let mut last = *session.stats();

        for op in ops {
            match op {
                Op::Press(command) => {
                    let mut input = TickInput::default();
                    command.apply(&mut input);
                    run_tick(&mut session, &input);
                }
                Op::Wait(ticks) => {
                    for _ in 0..ticks {
                        run_tick(&mut session, &TickInput::default());
                    }
                }
            }

            let now = *session.stats();
            prop_assert!(now.score >= last.score);
            prop_assert!(now.distance >= last.distance);
            prop_assert!(now.coins >= last.coins);
            // Score is the distance term plus every collected value
            prop_assert!(now.score >= now.distance as u64 * session.config.score_multiplier);
            prop_assert!(now.score <= now.distance as u64 * session.config.score_multiplier + now.coins);
            last = now;
        }
    }

    #[test]
    fn run_ends_at_most_once(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..120),
    ) {
        let mut session = GameSession::new(GameConfig::default(), seed, 0);
        let mut events = Vec::new();

        for op in ops {
            let ticks = match op {
                Op::Press(command) => {
                    let mut input = TickInput::default();
                    command.apply(&mut input);
                    run_tick(&mut session, &input);
                    0
                }
                Op::Wait(ticks) => ticks,
            };
            for _ in 0..ticks {
                run_tick(&mut session, &TickInput::default());
            }
            events.extend(session.drain_events());
        }

        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        prop_assert!(game_overs <= 1);
        prop_assert_eq!(game_overs == 1, session.phase == GamePhase::GameOver);
        prop_assert_eq!(session.death.is_some(), session.phase == GamePhase::GameOver);
    }

    #[test]
    fn frozen_outside_playing(seed in any::<u64>(), ticks in 1u32..200) {
        let mut session = GameSession::new(GameConfig::default(), seed, 0);
        session.toggle_pause();
        let lanes = session.lanes.clone();
        let player = session.player.clone();

        for _ in 0..ticks {
            let input = TickInput {
                movement: Some(Facing::Up),
                ..Default::default()
            };
            run_tick(&mut session, &input);
        }

        prop_assert_eq!(session.phase, GamePhase::Paused);
        prop_assert_eq!(&session.lanes, &lanes);
        prop_assert_eq!(&session.player, &player);
        prop_assert_eq!(session.time_ticks, 0);
        prop_assert!(session.drain_events().is_empty());
    }
}
