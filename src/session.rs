//! Game session
//!
//! Owns the round state, the spawn deadline and the RNG, and decides what a
//! click means in each phase:
//!
//! ```text
//! Menu --play--> Cutscene --last panel--> Playing --caught--> GameOver --retry--+
//!                                            ^  \                               |
//!                                            |   +--platform cleared--> Won     |
//!                                            +-----------click on Won-----------+
//! ```

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::assets::Panel;
use crate::audio::{AudioGateway, SoundCue};
use crate::consts::{SCENE_COUNT, TICK_DT};
use crate::sim::{GameEvent, GameState, RoundOutcome, SpawnTimer, spawn_enemy, tick};

/// Which part of the game is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen with the Play button
    Menu,
    /// Clicking through the intro panels
    Cutscene,
    /// Active gameplay
    Playing,
    /// Platform cleared; any click starts a new round
    Won,
    /// Player caught; Retry starts a new round
    GameOver,
}

/// What the page should show on top of (or instead of) the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Menu,
    Cutscene(Panel),
    /// Goal banner over the live canvas
    Playing,
    Won(Panel),
    GameOver(&'static str),
}

pub struct Session {
    phase: GamePhase,
    /// Cutscene cursor, 0..SCENE_COUNT
    scene: usize,
    state: GameState,
    spawner: SpawnTimer,
    rng: Pcg32,
    /// Narration currently playing, stopped when the panel changes
    narration: Option<SoundCue>,
}

impl Session {
    pub fn new(viewport: Vec2, seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            scene: 0,
            state: GameState::new(viewport),
            spawner: SpawnTimer::new(),
            rng: Pcg32::seed_from_u64(seed),
            narration: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn scene(&self) -> usize {
        self.scene
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_spawning(&self) -> bool {
        self.spawner.is_armed()
    }

    /// Play button on the menu: reset and start the cutscene
    pub fn play(&mut self, audio: &mut impl AudioGateway) -> bool {
        if self.phase != GamePhase::Menu {
            log::debug!("Play ignored in {:?}", self.phase);
            return false;
        }
        self.state.reset();
        self.scene = 0;
        self.phase = GamePhase::Cutscene;
        log::info!("Cutscene started");
        self.narrate(0, audio);
        true
    }

    /// Retry button on the game-over panel
    pub fn retry(&mut self, now_ms: f64) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("Retry ignored in {:?}", self.phase);
            return false;
        }
        self.start_round(now_ms);
        true
    }

    /// Pointer click at `point` in surface coordinates
    pub fn click(&mut self, point: Vec2, now_ms: f64, audio: &mut impl AudioGateway) {
        match self.phase {
            GamePhase::Playing => {
                let id = self.state.fire_at(point);
                log::debug!("Arrow {} fired at ({:.0}, {:.0})", id, point.x, point.y);
                audio.play_from_start(SoundCue::Fire);
            }
            GamePhase::Cutscene => self.advance_cutscene(now_ms, audio),
            GamePhase::Won => self.start_round(now_ms),
            GamePhase::Menu | GamePhase::GameOver => {
                log::debug!("Click ignored in {:?}", self.phase);
            }
        }
    }

    /// Per-frame work: due spawn, one tick, then react to what happened
    pub fn frame(&mut self, now_ms: f64, audio: &mut impl AudioGateway) {
        if self.phase != GamePhase::Playing || !self.state.running {
            return;
        }

        if self.spawner.poll(now_ms, self.state.running) {
            spawn_enemy(&mut self.state, &mut self.rng);
        }

        for event in tick(&mut self.state, TICK_DT) {
            match event {
                GameEvent::EnemyKilled { id, .. } => {
                    log::debug!("Enemy {} down, platform at {:.0}", id, self.state.platform_y);
                    audio.play_from_start(SoundCue::Hit);
                }
                GameEvent::PlayerCaught { enemy_id } => {
                    log::debug!("Caught by enemy {}", enemy_id);
                }
                GameEvent::PlatformCleared => {
                    log::debug!("Platform cleared after {} kills", self.state.kills);
                }
            }
        }

        if let Some(outcome) = self.state.outcome {
            self.end_round(outcome, audio);
        }
    }

    /// What the presentation layer should display
    pub fn overlay(&self) -> Overlay {
        match self.phase {
            GamePhase::Menu => Overlay::Menu,
            GamePhase::Cutscene => Overlay::Cutscene(Panel::CUTSCENE[self.scene]),
            GamePhase::Playing => Overlay::Playing,
            GamePhase::Won => Overlay::Won(Panel::Win),
            GamePhase::GameOver => Overlay::GameOver(
                self.state
                    .outcome
                    .unwrap_or(RoundOutcome::Lost)
                    .message(),
            ),
        }
    }

    fn advance_cutscene(&mut self, now_ms: f64, audio: &mut impl AudioGateway) {
        let next = self.scene + 1;
        if next >= SCENE_COUNT {
            if let Some(cue) = self.narration.take() {
                audio.stop(cue);
            }
            self.start_round(now_ms);
            return;
        }
        self.scene = next;
        self.narrate(next, audio);
    }

    fn narrate(&mut self, scene: usize, audio: &mut impl AudioGateway) {
        if let Some(cue) = self.narration.take() {
            audio.stop(cue);
        }
        let cue = SoundCue::CUTSCENE[scene];
        audio.play_from_start(cue);
        self.narration = Some(cue);
    }

    /// Fresh round: reset, run, first enemy now, next one after the interval
    fn start_round(&mut self, now_ms: f64) {
        self.state.reset();
        self.state.running = true;
        self.phase = GamePhase::Playing;
        self.spawner.start(now_ms);
        spawn_enemy(&mut self.state, &mut self.rng);
        log::info!("Round started");
    }

    fn end_round(&mut self, outcome: RoundOutcome, audio: &mut impl AudioGateway) {
        self.spawner.cancel();
        self.state.running = false;
        self.phase = match outcome {
            RoundOutcome::Won => {
                audio.play_from_start(SoundCue::Win);
                GamePhase::Won
            }
            RoundOutcome::Lost => GamePhase::GameOver,
        };
        log::info!("{} ({} kills)", outcome.message(), self.state.kills);
    }
}
