//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use super::events::{DeathCause, GameEvent, SoundEffect};
use super::player::Facing;
use super::simulator::{SimEvents, advance_lanes};
use super::state::{GamePhase, GameSession};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Hop request
    pub movement: Option<Facing>,
    /// Pause toggle
    pub pause: bool,
    /// Start a new run (from game over or the pause menu)
    pub restart: bool,
}

/// Advance the session by one timestep, applying input first
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.restart && session.restart() {
        return;
    }

    if input.pause {
        session.toggle_pause();
    }

    // Don't tick if paused or game over
    if session.phase != GamePhase::Playing {
        return;
    }

    if let Some(direction) = input.movement {
        session.move_player(direction);
    }

    step(session, dt);
}

/// Advance lanes, then apply what happened on the player's lane.
/// A no-op outside Playing.
pub fn step(session: &mut GameSession, dt: f32) -> SimEvents {
    if !session.is_playing() {
        return SimEvents::default();
    }

    session.time_ticks += 1;
    session.clock += dt as f64;
    session
        .player
        .release_lock(session.clock, session.config.landing_grace_ticks);

    let events = advance_lanes(&mut session.lanes, &session.player, &session.config, dt);

    let mut collected_any = false;
    for collection in &events.collections {
        if session.score.collect(&mut session.lanes, collection) {
            log::debug!("Collected {} worth {}", collection.id, collection.value);
            collected_any = true;
            session.push_event(GameEvent::PlaySound(SoundEffect::for_collectible(
                collection.kind,
            )));
            session.push_event(GameEvent::CoinCollected {
                id: collection.id.clone(),
                kind: collection.kind,
                value: collection.value,
            });
        }
    }
    if collected_any {
        session.note_score_change();
    }

    if events.collision {
        session.end_run(DeathCause::Vehicle);
    } else if let Some(dx) = events.drift {
        session.player.position.x += dx;
    } else if events.fell_in_water {
        session.end_run(DeathCause::Drowned);
    }

    session.player.consume_grace();
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::SIM_DT;
    use crate::sim::lane::{CollectibleKind, Lane, LaneTable, Mover, TrafficDirection, WaterVariant};

    fn session_with(lanes: Vec<Lane>) -> GameSession {
        GameSession::with_lanes(GameConfig::default(), LaneTable::new(lanes), 0)
    }

    fn hop(direction: Facing) -> TickInput {
        TickInput {
            movement: Some(direction),
            ..Default::default()
        }
    }

    /// Tick until the move lock and landing grace are over
    fn settle(session: &mut GameSession) {
        for _ in 0..20 {
            tick(session, &TickInput::default(), SIM_DT);
        }
    }

    #[test]
    fn test_tick_pause() {
        let mut session = session_with(vec![Lane::grass(0)]);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut session, &pause, SIM_DT);
        assert_eq!(session.phase, GamePhase::Paused);
        let ticks = session.time_ticks;

        // Frozen while paused
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        assert_eq!(session.time_ticks, ticks);
        assert_eq!(session.player.cell(), (0, 0));

        tick(&mut session, &pause, SIM_DT);
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.time_ticks, ticks + 1);
    }

    #[test]
    fn test_lock_spans_ticks() {
        let mut session = session_with((0..5).map(Lane::grass).collect());
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        assert_eq!(session.player.cell(), (0, -1));
        settle(&mut session);
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        assert_eq!(session.player.cell(), (0, -2));
    }

    #[test]
    fn test_collect_on_landing() {
        let mut session = session_with(vec![
            Lane::grass(0),
            Lane::grass(1).with_collectible(0, CollectibleKind::Gem, 50),
        ]);
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        assert_eq!(session.stats().coins, 50);
        assert_eq!(session.stats().score, 60);
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::PlaySound(SoundEffect::Gem)));
        assert!(events.contains(&GameEvent::CoinCollected {
            id: "-1-0".to_string(),
            kind: CollectibleKind::Gem,
            value: 50,
        }));

        // Standing still does not collect again
        settle(&mut session);
        assert_eq!(session.stats().coins, 50);
    }

    #[test]
    fn test_drift_carries_player() {
        let mut session = session_with(vec![
            Lane::grass(0),
            Lane::water(
                1,
                Mover::new(3.0, TrafficDirection::Right, 4.0),
                WaterVariant::Log,
            ),
        ]);
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        let x_after_first = session.player.position.x;
        assert!((x_after_first - 3.0 * SIM_DT).abs() < 1e-5);
        for _ in 0..10 {
            tick(&mut session, &TickInput::default(), SIM_DT);
        }
        assert!(session.is_playing());
        assert!((session.player.position.x - 11.0 * 3.0 * SIM_DT).abs() < 1e-4);
    }

    #[test]
    fn test_drowning_after_landing_grace() {
        let mut session = session_with(vec![
            Lane::grass(0),
            Lane::water(
                1,
                Mover::new(2.0, TrafficDirection::Left, 2.0),
                WaterVariant::Log,
            ),
        ]);
        session.player.position.x = 8.0;
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        assert!(session.is_playing());

        // Lock lasts 0.2s = 12 ticks at 60 Hz; the release tick is graced
        let mut ticks = 1;
        while session.is_playing() && ticks < 30 {
            tick(&mut session, &TickInput::default(), SIM_DT);
            ticks += 1;
        }
        assert_eq!(session.phase, GamePhase::GameOver);
        assert!(ticks >= 13);
        assert!(
            session
                .drain_events()
                .contains(&GameEvent::PlaySound(SoundEffect::Splash))
        );
    }

    #[test]
    fn test_vehicle_collision_ends_run() {
        let mut session = session_with(vec![
            Lane::grass(0),
            Lane::road(1, Mover::new(2.0, TrafficDirection::Right, 2.0)),
        ]);
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        assert_eq!(session.phase, GamePhase::GameOver);
        let events = session.drain_events();
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert!(events.contains(&GameEvent::PlaySound(SoundEffect::Crash)));

        // Further ticks change nothing
        let score = session.stats().score;
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        assert_eq!(session.stats().score, score);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_restart_input() {
        let mut session = session_with(vec![
            Lane::grass(0),
            Lane::road(1, Mover::new(2.0, TrafficDirection::Right, 2.0)),
        ]);
        tick(&mut session, &hop(Facing::Up), SIM_DT);
        assert_eq!(session.phase, GamePhase::GameOver);
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut session, &restart, SIM_DT);
        assert!(session.is_playing());
        assert_eq!(session.player.cell(), (0, 0));
        assert_eq!(session.stats().score, 0);
        assert!(!session.player.is_moving());
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig::default();
        let mut a = GameSession::new(config.clone(), 99999, 0);
        let mut b = GameSession::new(config, 99999, 0);
        let inputs = [
            hop(Facing::Up),
            TickInput::default(),
            hop(Facing::Left),
            TickInput::default(),
        ];
        for _ in 0..30 {
            for input in &inputs {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.player, b.player);
        assert_eq!(a.lanes, b.lanes);
        assert_eq!(a.stats(), b.stats());
    }
}
