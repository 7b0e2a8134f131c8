//! Audio playback for game events
//!
//! Effects are synthesized with Web Audio oscillators in the browser, so no
//! sample files ship with the game. Native builds log what would have played.

use crate::settings::AudioSettings;
use crate::sim::{EffectSink, GameEvent, SoundEffect};

/// Plays sound effects at the volumes dictated by [`AudioSettings`]
pub struct AudioManager {
    settings: AudioSettings,
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(AudioSettings::default())
    }
}

impl AudioManager {
    pub fn new(settings: AudioSettings) -> Self {
        Self {
            settings,
            #[cfg(target_arch = "wasm32")]
            ctx: web::create_context(),
        }
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Volume an effect would play at, `None` when it would be silent
    pub fn volume_for(&self, effect: SoundEffect) -> Option<f32> {
        let vol = self.settings.effective_volume(effect);
        (vol > 0.0).then_some(vol)
    }

    /// Resume audio context (required after user gesture)
    #[cfg(target_arch = "wasm32")]
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume(&self) {}

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if let Some(vol) = self.volume_for(effect) {
            self.output(effect, vol);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn output(&self, effect: SoundEffect, vol: f32) {
        if let Some(ctx) = &self.ctx {
            web::play(ctx, effect, vol);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn output(&self, effect: SoundEffect, vol: f32) {
        log::debug!("sound: {} at {:.2}", effect.name(), vol);
    }
}

impl EffectSink for AudioManager {
    fn emit(&mut self, event: &GameEvent) {
        if let GameEvent::PlaySound(effect) = event {
            self.play(*effect);
        }
    }

    fn settings_changed(&mut self, settings: &AudioSettings) {
        self.settings = *settings;
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use crate::sim::SoundEffect;

    pub(super) fn create_context() -> Option<AudioContext> {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        ctx
    }

    pub(super) fn play(ctx: &AudioContext, effect: SoundEffect, vol: f32) {
        // Browsers keep the context suspended until a user gesture
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => play_jump(ctx, vol),
            SoundEffect::Coin => play_coin(ctx, vol),
            SoundEffect::Gem => play_gem(ctx, vol),
            SoundEffect::Crash => play_crash(ctx, vol),
            SoundEffect::Splash => play_splash(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Hop - short upward chirp
    fn play_jump(ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = create_osc(ctx, 300.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(700.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }

    /// Coin - two-note ding
    fn play_coin(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [988.0, 1319.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Gem - bright rising arpeggio
    fn play_gem(ctx: &AudioContext, vol: f32) {
        for (i, freq) in [600.0, 800.0, 1000.0, 1200.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// Crash - noisy sawtooth smash over a bass thump
    fn play_crash(ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(120.0, t).ok();
            osc.frequency().set_value_at_time(900.0, t + 0.02).ok();
            osc.frequency().set_value_at_time(90.0, t + 0.04).ok();
            osc.frequency().set_value_at_time(600.0, t + 0.06).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        if let Some((osc, gain)) = create_osc(ctx, 60.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    /// Splash - falling bubbly warble
    fn play_splash(ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = create_osc(ctx, 500.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(500.0, t).ok();
            osc.frequency().set_value_at_time(350.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(450.0, t + 0.1).ok();
            osc.frequency().set_value_at_time(250.0, t + 0.15).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
        }

        if let Some((osc, gain)) = create_osc(ctx, 2000.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.08, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(400.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }
}
