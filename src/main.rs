//! Lane Crosser entry point
//!
//! Browser builds drive the game from `requestAnimationFrame`; native builds
//! run a headless autoplay demo against a save file on disk.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use lane_crosser::GameRunner;
    use lane_crosser::audio::AudioManager;
    use lane_crosser::consts::*;
    use lane_crosser::persistence::LocalStorageStore;
    use lane_crosser::platform::Command;
    use lane_crosser::sim::GamePhase;
    use lane_crosser::{AudioSettings, GameConfig};

    /// Main game instance
    struct Game {
        runner: GameRunner<LocalStorageStore, AudioManager>,
        last_time: f64,
        // Track phase for overlay updates
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, store: LocalStorageStore) -> Self {
            let audio = AudioManager::new(AudioSettings::default());
            let runner = GameRunner::new(GameConfig::default(), seed, store, audio);
            Self {
                runner,
                last_time: 0.0,
                last_phase: GamePhase::Playing,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            self.runner.frame(dt);

            let current_phase = self.runner.phase();
            if current_phase != self.last_phase {
                log::info!("Phase: {:?} -> {:?}", self.last_phase, current_phase);
                self.last_phase = current_phase;
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = self.runner.session();
            let stats = session.stats();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&stats.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-coins .hud-value").ok().flatten() {
                el.set_text_content(Some(&stats.coins.to_string()));
            }
            if let Some(el) = document
                .query_selector("#hud-high-score .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&session.high_score().to_string()));
            }
            if let Some(el) = document.query_selector("#hud-mute .hud-value").ok().flatten() {
                let label = if self.runner.settings().muted { "off" } else { "on" };
                el.set_text_content(Some(label));
            }

            // Camera and player for the scene layer
            if let Some(el) = document.get_element_by_id("scene") {
                let (x, z) = session.player.cell();
                let _ = el.set_attribute("data-player-x", &x.to_string());
                let _ = el.set_attribute("data-player-z", &z.to_string());
                let _ = el.set_attribute("data-camera-z", &format!("{:.2}", self.runner.camera().z));
            }

            set_visible(&document, "pause-menu", session.phase == GamePhase::Paused);

            let game_over = session.phase == GamePhase::GameOver;
            set_visible(&document, "game-over", game_over);
            if game_over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&stats.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-distance") {
                    el.set_text_content(Some(&stats.distance.to_string()));
                }
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Lane Crosser starting...");

        let store = match LocalStorageStore::open() {
            Ok(store) => store,
            Err(e) => {
                log::error!("Cannot start without storage: {}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, store)));
        log::info!("Game initialized with seed: {}", seed);

        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(loading) = document.get_element_by_id("loading") {
                let _ = loading.set_attribute("class", "hidden");
            }
        }

        setup_keyboard(game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Lane Crosser running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            // Browsers only allow audio after a user gesture
            g.runner.audio().resume();
            let key = event.key();
            if key == "m" || key == "M" {
                let muted = g.runner.toggle_mute();
                log::info!("Muted: {}", muted);
                return;
            }
            if g.runner.handle_key(&key).is_some() {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Restart buttons on the game over screen and the pause menu
    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for id in ["restart-btn", "pause-restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    game.borrow_mut().runner.command(Command::Restart);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Visibility change (tab switch, minimize)
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.runner.phase() == GamePhase::Playing {
                    g.runner.command(Command::TogglePause);
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use lane_crosser::audio::AudioManager;
    use lane_crosser::consts::*;
    use lane_crosser::persistence::KeyValueStore;
    use lane_crosser::platform::Command;
    use lane_crosser::sim::{GamePhase, GameSession, LaneKind};
    use lane_crosser::{GameConfig, GameRunner};

    /// Config from `LANE_CROSSER_CONFIG`, defaults otherwise
    pub fn load_config() -> GameConfig {
        let Ok(path) = std::env::var("LANE_CROSSER_CONFIG") else {
            return GameConfig::default();
        };
        match GameConfig::load_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                GameConfig::default()
            }
        }
    }

    /// `LANE_CROSSER_SEED`, or the current time
    pub fn seed() -> u64 {
        if let Some(seed) = std::env::var("LANE_CROSSER_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            return seed;
        }
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// `LANE_CROSSER_SAVE`, or a file in the temp dir
    pub fn save_path() -> PathBuf {
        std::env::var_os("LANE_CROSSER_SAVE")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("lane-crosser-save.json"))
    }

    /// Whether standing on `(x, z)` right after a hop looks survivable
    fn cell_is_safe(session: &GameSession, x: i32, z: i32) -> bool {
        let config = &session.config;
        if !config.in_play_area(x) {
            return false;
        }
        let Some(lane) = session.lanes.lane_at(z) else {
            return true;
        };
        let Some(mover) = lane.mover() else {
            return !lane.is_blocked(x);
        };

        let lock = config.move_lock_duration() as f32;
        match lane.kind() {
            LaneKind::Road => {
                // Distance the vehicle still has to cover to reach us
                let gap = (x as f32 - mover.offset) * mover.direction.sign();
                let reach = mover.width / 2.0 + PLAYER_HITBOX + 0.5;
                gap < -reach || gap > reach + mover.speed * lock * 2.0
            }
            LaneKind::Water => {
                let landed = mover.offset + mover.displacement(lock + SIM_DT);
                (landed - x as f32).abs() < mover.width / 2.0 - 0.2
            }
            LaneKind::Grass => true,
        }
    }

    /// Three simulated minutes at most
    const MAX_FRAMES: u32 = 60 * 180;

    /// Play one run with the autoplay bot and log the outcome
    pub fn play<S: KeyValueStore>(config: GameConfig, seed: u64, store: S) {
        let mut runner = GameRunner::new(config, seed, store, AudioManager::default());
        let mut frames = 0;
        while runner.phase() == GamePhase::Playing && frames < MAX_FRAMES {
            if let Some(command) = autoplay(runner.session()) {
                runner.command(command);
            }
            runner.frame(SIM_DT);
            frames += 1;
        }

        let session = runner.session();
        let stats = session.stats();
        log::info!(
            "Run finished after {:.1}s: score {}, coins {}, distance {}, death {:?}",
            session.clock,
            stats.score,
            stats.coins,
            stats.distance,
            session.death
        );
        log::info!(
            "Lifetime: {} games, best {}",
            runner.progress().total_games,
            runner.progress().high_score
        );
    }

    /// Pick the next hop for the demo player
    pub fn autoplay(session: &GameSession) -> Option<Command> {
        if session.player.is_moving() {
            return None;
        }
        let (x, z) = session.player.cell();
        if cell_is_safe(session, x, z - 1) {
            return Some(Command::MoveUp);
        }

        // Sidestep on grass toward a safer column
        let on_grass = session
            .lanes
            .lane_at(z)
            .map(|l| l.kind() == LaneKind::Grass)
            .unwrap_or(true);
        if on_grass {
            for (dx, command) in [(-1, Command::MoveLeft), (1, Command::MoveRight)] {
                if cell_is_safe(session, x + dx, z) && cell_is_safe(session, x + dx, z - 1) {
                    return Some(command);
                }
            }
        }
        None
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_crosser::persistence::{FileStore, MemoryStore};

    env_logger::init();
    log::info!("Lane Crosser (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - run with `trunk serve` for the web version");

    let config = native::load_config();
    let seed = native::seed();
    let path = native::save_path();

    match FileStore::open(&path) {
        Ok(store) => native::play(config, seed, store),
        Err(e) => {
            log::warn!("Save file {} unusable ({}), playing without saving", path.display(), e);
            native::play(config, seed, MemoryStore::new());
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
