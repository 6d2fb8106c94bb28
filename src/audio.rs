//! Sound cues
//!
//! Game events map to [`SoundEffect`]s; in the browser build the
//! [`AudioManager`] synthesizes them with the Web Audio API (no sample files).

use crate::scene::CodenameCue;
use crate::sim::{GameEvent, PowerUpKind};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Good item collected
    Collect,
    /// Bad item cost a life
    Hit,
    /// Bad item touched while invincible
    Shrug,
    /// Touched the trash can
    Trash,
    /// Power-up picked up
    PowerUp(PowerUpKind),
    /// Power-up ran out
    PowerDown,
    /// Extra life granted
    LifeUp,
    /// Periodic voice line
    Saying(usize),
    /// Lives ran out
    GameOver,
    /// Game-over screen announcement
    LatestRelease,
    /// Follow-up line for a few codenames
    Codename(CodenameCue),
}

impl SoundEffect {
    /// Cue for a game event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::ItemCollected { .. } => Some(SoundEffect::Collect),
            GameEvent::ItemHit { .. } => Some(SoundEffect::Hit),
            GameEvent::ItemShrugged { .. } => Some(SoundEffect::Shrug),
            GameEvent::TrashTouched => Some(SoundEffect::Trash),
            GameEvent::PowerUpActivated(kind) => Some(SoundEffect::PowerUp(kind)),
            GameEvent::PowerUpExpired(_) => Some(SoundEffect::PowerDown),
            GameEvent::LifeGained { .. } => Some(SoundEffect::LifeUp),
            GameEvent::Saying { index } => Some(SoundEffect::Saying(index)),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::WindowSpawned { .. }
            | GameEvent::LifeLost { .. }
            | GameEvent::PresentGameOver { .. } => None,
        }
    }

    /// Cues played when the game-over screen appears, in order
    pub fn game_over_screen(cue: Option<CodenameCue>) -> Vec<Self> {
        let mut cues = vec![SoundEffect::LatestRelease];
        cues.extend(cue.map(SoundEffect::Codename));
        cues
    }

    /// Voice lines, muted by the `sayings` setting
    pub fn is_voice(self) -> bool {
        matches!(
            self,
            SoundEffect::Saying(_)
                | SoundEffect::Trash
                | SoundEffect::PowerUp(_)
                | SoundEffect::LatestRelease
                | SoundEffect::Codename(_)
        )
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::scene::CodenameCue;
    use crate::settings::Settings;
    use crate::sim::PowerUpKind;

    /// Pitch contours for the voice lines, one per saying (Hz)
    const SAYING_CONTOURS: [&[f32]; 6] = [
        &[220.0, 260.0, 240.0, 300.0],
        &[180.0, 240.0, 200.0],
        &[260.0, 220.0, 280.0, 250.0, 320.0],
        &[200.0, 300.0, 260.0],
        &[240.0, 240.0, 200.0, 280.0],
        &[210.0, 270.0, 230.0, 290.0, 250.0],
    ];

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        sayings: bool,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
                sayings: settings.sayings,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn play(&self, effect: SoundEffect) {
            self.play_at(effect, 0.0);
        }

        /// Play cues back to back
        pub fn play_sequence(&self, effects: &[SoundEffect]) {
            let mut offset = 0.0;
            for effect in effects {
                self.play_at(*effect, offset);
                offset += 0.9;
            }
        }

        fn play_at(&self, effect: SoundEffect, delay: f64) {
            let vol = if self.muted { 0.0 } else { self.volume };
            if vol <= 0.0 || (effect.is_voice() && !self.sayings) {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            let t = ctx.current_time() + delay;

            match effect {
                SoundEffect::Jump => self.sweep(ctx, t, vol * 0.3, 220.0, 520.0, 0.15),
                SoundEffect::Collect => {
                    self.arpeggio(ctx, t, vol * 0.25, &[660.0, 880.0], 0.06, 0.12)
                }
                SoundEffect::Hit => {
                    self.sweep(ctx, t, vol * 0.45, 180.0, 50.0, 0.3);
                    self.blip(ctx, t, vol * 0.15, 1200.0, OscillatorType::Square, 0.08);
                }
                SoundEffect::Shrug => {
                    self.blip(ctx, t, vol * 0.2, 500.0, OscillatorType::Triangle, 0.08)
                }
                SoundEffect::Trash => self.voice(ctx, t, vol, &[160.0, 140.0, 120.0]),
                SoundEffect::PowerUp(kind) => {
                    let notes: &[f32] = match kind {
                        PowerUpKind::DoubleScore => &[500.0, 750.0, 1000.0],
                        PowerUpKind::Invincibility => &[400.0, 600.0, 800.0, 1200.0],
                        PowerUpKind::ExtraLife => &[450.0, 560.0, 670.0, 900.0],
                    };
                    self.arpeggio(ctx, t, vol * 0.3, notes, 0.08, 0.2);
                }
                SoundEffect::PowerDown => self.sweep(ctx, t, vol * 0.25, 700.0, 250.0, 0.35),
                SoundEffect::LifeUp => {
                    self.arpeggio(ctx, t, vol * 0.25, &[600.0, 900.0, 1200.0], 0.06, 0.15)
                }
                SoundEffect::Saying(index) => {
                    let contour = SAYING_CONTOURS[index % SAYING_CONTOURS.len()];
                    self.voice(ctx, t, vol, contour);
                }
                SoundEffect::GameOver => {
                    self.arpeggio(ctx, t, vol * 0.3, &[400.0, 350.0, 300.0, 200.0], 0.2, 0.3)
                }
                SoundEffect::LatestRelease => {
                    self.voice(ctx, t, vol, &[230.0, 280.0, 260.0, 330.0, 300.0])
                }
                SoundEffect::Codename(cue) => {
                    let contour: &[f32] = match cue {
                        CodenameCue::Oxnard => &[200.0, 170.0],
                        CodenameCue::RanchoCucamonga => &[260.0, 240.0, 300.0, 220.0],
                        CodenameCue::Weed => &[300.0],
                    };
                    self.voice(ctx, t, vol, contour);
                }
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

        /// Single decaying tone
        fn blip(
            &self,
            ctx: &AudioContext,
            t: f64,
            vol: f32,
            freq: f32,
            osc_type: OscillatorType,
            length: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }

        /// Tone gliding from `from` to `to` Hz
        fn sweep(&self, ctx: &AudioContext, t: f64, vol: f32, from: f32, to: f32, length: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Sine) else {
                return;
            };
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + length)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }

        fn arpeggio(
            &self,
            ctx: &AudioContext,
            t: f64,
            vol: f32,
            notes: &[f32],
            step: f64,
            length: f64,
        ) {
            for (i, freq) in notes.iter().enumerate() {
                let start = t + i as f64 * step;
                self.blip(ctx, start, vol, *freq, OscillatorType::Triangle, length);
            }
        }

        /// Speech-like syllables following a pitch contour
        fn voice(&self, ctx: &AudioContext, t: f64, vol: f32, contour: &[f32]) {
            let Some((osc, gain)) = self.create_osc(ctx, contour[0], OscillatorType::Sawtooth)
            else {
                return;
            };
            let syllable = 0.14;
            for (i, freq) in contour.iter().enumerate() {
                let start = t + i as f64 * syllable;
                osc.frequency().set_value_at_time(*freq, start).ok();
                gain.gain().set_value_at_time(vol * 0.18, start).ok();
                gain.gain()
                    .linear_ramp_to_value_at_time(vol * 0.05, start + syllable * 0.9)
                    .ok();
            }
            let end = t + contour.len() as f64 * syllable;
            gain.gain().exponential_ramp_to_value_at_time(0.01, end + 0.05).ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.1).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BadItemKind, GoodItemKind};

    #[test]
    fn test_event_cues() {
        assert_eq!(
            SoundEffect::from_event(&GameEvent::ItemCollected {
                kind: GoodItemKind::Save,
                points: 2
            }),
            Some(SoundEffect::Collect)
        );
        assert_eq!(
            SoundEffect::from_event(&GameEvent::ItemHit {
                kind: BadItemKind::Bomb
            }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(
            SoundEffect::from_event(&GameEvent::PowerUpActivated(PowerUpKind::ExtraLife)),
            Some(SoundEffect::PowerUp(PowerUpKind::ExtraLife))
        );
        assert_eq!(
            SoundEffect::from_event(&GameEvent::PresentGameOver { score: 4 }),
            None
        );
    }

    #[test]
    fn test_game_over_screen_cues() {
        assert_eq!(
            SoundEffect::game_over_screen(None),
            vec![SoundEffect::LatestRelease]
        );
        assert_eq!(
            SoundEffect::game_over_screen(Some(CodenameCue::Weed)),
            vec![
                SoundEffect::LatestRelease,
                SoundEffect::Codename(CodenameCue::Weed)
            ]
        );
    }

    #[test]
    fn test_voice_lines() {
        assert!(SoundEffect::Saying(2).is_voice());
        assert!(SoundEffect::Trash.is_voice());
        assert!(!SoundEffect::Jump.is_voice());
    }
}
