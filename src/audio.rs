//! Sound effects
//!
//! The simulation emits `GameEvent`s; hosts map them to named effects here.
//! On wasm32 the `AudioManager` synthesizes each effect with Web Audio
//! oscillators, so no sound files need to be fetched.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SoundEffect {
    /// Ball hits top or bottom wall
    WallHit,
    /// Ball hits a paddle
    PaddleHit,
    /// A paddle starts a smash
    Smash,
    /// A smash is returned
    SmashReturn,
    /// Ball left the court
    PointScore,
    /// Countdown step
    CountdownTick,
    /// Countdown reached zero
    CountdownFinal,
    /// Start pressed on the title screen
    Start,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 8] = [
        SoundEffect::WallHit,
        SoundEffect::PaddleHit,
        SoundEffect::Smash,
        SoundEffect::SmashReturn,
        SoundEffect::PointScore,
        SoundEffect::CountdownTick,
        SoundEffect::CountdownFinal,
        SoundEffect::Start,
    ];

    /// Event name used in logs
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::WallHit => "wall_hit",
            SoundEffect::PaddleHit => "paddle_hit",
            SoundEffect::Smash => "smash",
            SoundEffect::SmashReturn => "smash_return",
            SoundEffect::PointScore => "point_score",
            SoundEffect::CountdownTick => "countdown_tick",
            SoundEffect::CountdownFinal => "countdown_final",
            SoundEffect::Start => "start",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallHit => Some(SoundEffect::WallHit),
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::Smash { .. } => Some(SoundEffect::Smash),
            GameEvent::SmashReturn { .. } => Some(SoundEffect::SmashReturn),
            GameEvent::PointScored { .. } => Some(SoundEffect::PointScore),
            GameEvent::CountdownTick => Some(SoundEffect::CountdownTick),
            GameEvent::CountdownFinal => Some(SoundEffect::CountdownFinal),
            GameEvent::Start => Some(SoundEffect::Start),
            GameEvent::CornerHit { .. } | GameEvent::AiToggled { .. } => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;

    /// Audio manager for the browser host
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        /// Play a sound effect; overlapping instances are fine
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::WallHit => self.blip(ctx, OscillatorType::Sine, 400.0, 400.0, 0.08, vol * 0.3),
                SoundEffect::PaddleHit => self.blip(ctx, OscillatorType::Sine, 150.0, 60.0, 0.1, vol * 0.6),
                SoundEffect::Smash => self.blip(ctx, OscillatorType::Sawtooth, 200.0, 1200.0, 0.2, vol * 0.35),
                SoundEffect::SmashReturn => self.blip(ctx, OscillatorType::Square, 900.0, 300.0, 0.15, vol * 0.3),
                SoundEffect::PointScore => self.play_point(ctx, vol),
                SoundEffect::CountdownTick => self.blip(ctx, OscillatorType::Square, 440.0, 440.0, 0.08, vol * 0.25),
                SoundEffect::CountdownFinal => self.blip(ctx, OscillatorType::Square, 880.0, 880.0, 0.25, vol * 0.3),
                SoundEffect::Start => self.play_start(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// Single oscillator sweeping `from` -> `to` with a decaying envelope
        fn blip(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            duration: f64,
            vol: f32,
        ) {
            self.blip_at(ctx, osc_type, from, to, 0.0, duration, vol);
        }

        #[allow(clippy::too_many_arguments)]
        fn blip_at(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            delay: f64,
            duration: f64,
            vol: f32,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time() + delay;

            gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            if (to - from).abs() > f32::EPSILON {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(to, t + duration)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + duration + 0.05).ok();
        }

        /// Point scored - rising two-tone
        fn play_point(&self, ctx: &AudioContext, vol: f32) {
            self.blip_at(ctx, OscillatorType::Triangle, 523.0, 523.0, 0.0, 0.12, vol * 0.4);
            self.blip_at(ctx, OscillatorType::Triangle, 784.0, 784.0, 0.12, 0.2, vol * 0.4);
        }

        /// Start - short arpeggio
        fn play_start(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [262.0, 330.0, 392.0, 523.0].into_iter().enumerate() {
                self.blip_at(ctx, OscillatorType::Triangle, freq, freq, i as f64 * 0.07, 0.1, vol * 0.35);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Side;

    #[test]
    fn test_every_effect_has_unique_name() {
        let mut names: Vec<_> = SoundEffect::ALL.iter().map(|e| e.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SoundEffect::ALL.len());
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PointScored { scorer: Side::Left }),
            Some(SoundEffect::PointScore)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::SmashReturn { side: Side::Right }),
            Some(SoundEffect::SmashReturn)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::AiToggled { enabled: true }), None);
    }
}
