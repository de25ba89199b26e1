//! Sound playback
//!
//! Recorded sound files played through `<audio>` elements. The game core
//! talks to an `AudioGateway`, so it runs the same against the browser, the
//! headless demo and tests.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Arrow fired
    Fire,
    /// Enemy shot down
    Hit,
    /// Round won
    Win,
    /// Cutscene narration, one per panel
    Walking,
    Huh,
    Gasp,
    Minishcap,
}

impl SoundCue {
    pub const ALL: [SoundCue; 7] = [
        SoundCue::Fire,
        SoundCue::Hit,
        SoundCue::Win,
        SoundCue::Walking,
        SoundCue::Huh,
        SoundCue::Gasp,
        SoundCue::Minishcap,
    ];

    /// Narration cues in cutscene order
    pub const CUTSCENE: [SoundCue; 4] = [
        SoundCue::Walking,
        SoundCue::Huh,
        SoundCue::Gasp,
        SoundCue::Minishcap,
    ];

    pub fn file(&self) -> &'static str {
        match self {
            SoundCue::Fire => "arrow.mp3",
            SoundCue::Hit => "hit.mp3",
            SoundCue::Win => "kiss.mp3",
            SoundCue::Walking => "walking.mp3",
            SoundCue::Huh => "huh.mp3",
            SoundCue::Gasp => "gasp.mp3",
            SoundCue::Minishcap => "minishcap.mp3",
        }
    }

    /// Narration plays on the voice channel, everything else is an effect
    pub fn is_voice(&self) -> bool {
        SoundCue::CUTSCENE.contains(self)
    }

    /// Volume for this cue under the given settings
    pub fn volume(&self, settings: &Settings) -> f32 {
        if self.is_voice() {
            settings.effective_voice_volume()
        } else {
            settings.effective_sfx_volume()
        }
    }
}

/// Sound playback consumed by the session
pub trait AudioGateway {
    /// Rewind the cue and play it
    fn play_from_start(&mut self, cue: SoundCue);
    /// Stop the cue and rewind it
    fn stop(&mut self, cue: SoundCue);
}

/// Gateway that only records what was asked of it.
///
/// Used by the headless demo and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueLog {
    pub played: Vec<SoundCue>,
    pub stopped: Vec<SoundCue>,
}

impl CueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, cue: SoundCue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

impl AudioGateway for CueLog {
    fn play_from_start(&mut self, cue: SoundCue) {
        log::debug!("play {:?}", cue);
        self.played.push(cue);
    }

    fn stop(&mut self, cue: SoundCue) {
        log::debug!("stop {:?}", cue);
        self.stopped.push(cue);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use web_sys::HtmlAudioElement;

    use super::{AudioGateway, SoundCue};
    use crate::assets::asset_url;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        clips: HashMap<SoundCue, HtmlAudioElement>,
        settings: Settings,
    }

    impl AudioManager {
        /// Create one element per cue; failures leave that cue silent
        pub fn new(settings: Settings) -> Self {
            let mut clips = HashMap::new();
            for cue in SoundCue::ALL {
                match HtmlAudioElement::new_with_src(&asset_url(&settings.asset_root, cue.file())) {
                    Ok(el) => {
                        el.set_preload("auto");
                        clips.insert(cue, el);
                    }
                    Err(_) => log::warn!("Failed to create audio element for {:?}", cue),
                }
            }
            Self { clips, settings }
        }
    }

    impl AudioGateway for AudioManager {
        fn play_from_start(&mut self, cue: SoundCue) {
            let vol = cue.volume(&self.settings);
            if vol <= 0.0 {
                return;
            }
            let Some(el) = self.clips.get(&cue) else { return };
            el.set_volume(vol as f64);
            el.set_current_time(0.0);
            // Rejected promises (autoplay policy, missing file) are ignored
            if el.play().is_err() {
                log::warn!("Could not play {:?}", cue);
            }
        }

        fn stop(&mut self, cue: SoundCue) {
            if let Some(el) = self.clips.get(&cue) {
                let _ = el.pause();
                el.set_current_time(0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_channel() {
        assert!(SoundCue::Gasp.is_voice());
        assert!(!SoundCue::Hit.is_voice());
    }

    #[test]
    fn test_cue_volume() {
        let mut settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            voice_volume: 1.0,
            ..Settings::default()
        };
        assert!((SoundCue::Fire.volume(&settings) - 0.25).abs() < 1e-6);
        assert!((SoundCue::Walking.volume(&settings) - 0.5).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(SoundCue::Walking.volume(&settings), 0.0);
    }

    #[test]
    fn test_cue_log_counts() {
        let mut log = CueLog::new();
        log.play_from_start(SoundCue::Hit);
        log.play_from_start(SoundCue::Hit);
        log.stop(SoundCue::Huh);
        assert_eq!(log.count(SoundCue::Hit), 2);
        assert_eq!(log.stopped, vec![SoundCue::Huh]);
    }
}
