//! Sound effects
//!
//! Procedurally generated square-wave blips - no external files needed.
//! The Web Audio backend only exists on wasm32; everything else plays silently.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Laser fired
    Shoot,
    /// Laser destroyed an asteroid
    Hit,
    /// Asteroid struck the player
    Destroy,
    /// Last life lost
    GameOver,
}

impl SoundEffect {
    /// Square-wave tone as (frequency Hz, duration seconds)
    pub fn tone(&self) -> (f32, f64) {
        match self {
            SoundEffect::Shoot => (800.0, 0.1),
            SoundEffect::Hit => (300.0, 0.2),
            SoundEffect::Destroy => (150.0, 0.3),
            SoundEffect::GameOver => (100.0, 1.0),
        }
    }
}

/// Anything that can play the game's sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    fn set_master_volume(&mut self, vol: f32);
    fn set_muted(&mut self, muted: bool);
}

/// Discards every sound (native builds, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
    fn set_master_volume(&mut self, _vol: f32) {}
    fn set_muted(&mut self, _muted: bool) {}
}

/// Remembers what was played
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundEffect>,
    pub master_volume: f32,
    pub muted: bool,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            self.played.push(effect);
        }
    }

    fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    /// Web Audio API backend
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
        muted: bool,
    }

    impl WebAudio {
        pub fn new(master_volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: master_volume.clamp(0.0, 1.0),
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Square);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let (freq, duration) = effect.tone();
            let Some((osc, gain)) = self.create_osc(ctx, freq) else {
                log::warn!("Could not build oscillator for {:?}", effect);
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration).ok();
        }

        fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
    }
}
