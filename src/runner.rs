//! Frame driver
//!
//! Turns variable display frames into fixed simulation ticks and routes the
//! session's events to the audio and storage collaborators. Storage failures
//! are logged and never interrupt play.

use crate::camera::CameraRig;
use crate::config::GameConfig;
use crate::consts::*;
use crate::highscores::GameProgress;
use crate::persistence::{KeyValueStore, load_high_score, save_high_score};
use crate::platform::{self, Command, command_for_key};
use crate::settings::AudioSettings;
use crate::sim::{EffectSink, GameEvent, GamePhase, GameSession, ScoreKeeper, TickInput, tick};

/// Owns one session plus its collaborators
pub struct GameRunner<S: KeyValueStore, A: EffectSink> {
    session: GameSession,
    store: S,
    audio: A,
    settings: AudioSettings,
    progress: GameProgress,
    camera: CameraRig,
    input: TickInput,
    accumulator: f32,
}

impl<S: KeyValueStore, A: EffectSink> GameRunner<S, A> {
    /// Read persisted state once and start a session on a world from `seed`
    pub fn new(config: GameConfig, seed: u64, store: S, audio: A) -> Self {
        let session = GameSession::new(config, seed, 0);
        Self::with_session(session, store, audio)
    }

    /// Wrap an existing session; its high score is raised to the stored one
    pub fn with_session(mut session: GameSession, store: S, mut audio: A) -> Self {
        let stored_high = load_high_score(&store).unwrap_or_else(|e| {
            log::warn!("Could not read high score: {}", e);
            0
        });
        let progress = GameProgress::load(&store).unwrap_or_else(|e| {
            log::warn!("Could not read progress, starting fresh: {}", e);
            GameProgress::new()
        });
        let settings = AudioSettings::load(&store);
        audio.settings_changed(&settings);

        let high_score = stored_high.max(progress.high_score);
        if high_score > session.high_score() {
            session.score = ScoreKeeper::new(high_score);
        }
        log::info!(
            "Session ready (seed {}, high score {})",
            session.seed,
            session.high_score()
        );

        let camera = CameraRig::new(session.player.position.z);
        Self {
            session,
            store,
            audio,
            settings,
            progress,
            camera,
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Shut down and hand back the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Queue a command for the next tick
    pub fn command(&mut self, command: Command) {
        command.apply(&mut self.input);
    }

    /// Map a raw key for the current phase and queue it
    pub fn handle_key(&mut self, key: &str) -> Option<Command> {
        let command = command_for_key(key, self.session.phase)?;
        self.command(command);
        Some(command)
    }

    /// Advance by one display frame of `dt` seconds. Returns ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            tick(&mut self.session, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.dispatch_events();
        }

        if self.session.is_playing() {
            self.camera.follow(self.session.player.position.z);
        }
        substeps
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.toggle_mute();
        self.settings_changed();
        muted
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.settings.set_master_volume(volume);
        self.settings_changed();
    }

    fn settings_changed(&mut self) {
        self.audio.settings_changed(&self.settings);
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Could not save audio settings: {}", e);
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            self.audio.emit(&event);
            match event {
                GameEvent::NewHighScore(score) => {
                    log::info!("New high score: {}", score);
                    if let Err(e) = save_high_score(&mut self.store, score) {
                        log::warn!("Could not save high score: {}", e);
                    }
                }
                GameEvent::GameOver { .. } => self.record_run(),
                _ => {}
            }
        }
    }

    fn record_run(&mut self) {
        let stats = *self.session.stats();
        if let Some(rank) = self.progress.record_run(&stats, platform::timestamp_ms()) {
            log::info!("Run placed #{} on the leaderboard", rank);
        }
        if let Err(e) = self.progress.save(&mut self.store) {
            log::warn!("Could not save progress: {}", e);
        }
    }
}
