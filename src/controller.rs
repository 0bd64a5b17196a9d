//! Game lifecycle controller
//!
//! Sequences Idle -> Running -> (WaveTransition -> Running)* -> Over and
//! drives the simulation once per host frame while Running. Owns the score
//! bookkeeping that outlives a single game (high score, settings) and the
//! collaborator ports for storage and audio/haptic feedback.
//!
//! The host calls `frame(dt_ms)` at its own cadence; nothing here assumes a
//! fixed timestep or blocks.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::HighScore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, InputEvent, InputState, StepOutcome, generate_wave, step};
use crate::storage::Storage;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Idle,
    /// Simulation advancing every frame
    Running,
    /// Between waves, simulation paused while the timer runs
    WaveTransition,
    /// Game ended
    Over { victory: bool },
}

impl GamePhase {
    /// Whether a start/restart request is honoured
    pub fn accepts_restart(&self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Over { .. })
    }
}

/// Audio cue requested from the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Laser,
    Explosion,
    GameOver,
}

impl Cue {
    /// Loudness relative to the configured effective volume
    pub fn gain(&self) -> f32 {
        match self {
            Cue::Laser | Cue::Explosion => 1.0,
            Cue::GameOver => 4.0 / 3.0,
        }
    }
}

/// Sound/haptic collaborator
///
/// The controller only calls `play` while sound is enabled and `vibrate`
/// while haptics are enabled.
pub trait Notifier {
    fn play(&mut self, cue: Cue, volume: f32);

    fn vibrate(&mut self, _duration_ms: u32) {}
}

/// Notifier that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn play(&mut self, _cue: Cue, _volume: f32) {}
}

/// Haptic pulse when the player is hit
const HIT_VIBRATION_MS: u32 = 200;

/// Final result of a game, for the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub victory: bool,
    pub score: u64,
    /// Wave the game ended on
    pub wave: u32,
    pub new_high_score: bool,
}

/// The game controller
pub struct Game<S: Storage, N: Notifier = NullNotifier> {
    state: GameState,
    phase: GamePhase,
    /// Held input, read at the top of each tick
    input: InputState,
    rng: Pcg32,
    high_score: HighScore,
    settings: Settings,
    storage: S,
    notifier: N,
    /// Incremented on every start
    session: u64,
    /// Milliseconds left before the next wave. Cleared by start, game over
    /// and teardown, which is what cancels it.
    transition: Option<f32>,
    summary: Option<GameSummary>,
    /// Events raised by input handling, delivered with the next frame
    pending: Vec<GameEvent>,
    /// Events delivered by the most recent frame
    events: Vec<GameEvent>,
}

impl<S: Storage, N: Notifier> Game<S, N> {
    /// Create an idle controller, reading high score and settings once
    pub fn new(seed: u64, storage: S, notifier: N) -> Self {
        let high_score = HighScore::load(&storage);
        let settings = Settings::load(&storage);
        log::info!("Game created with seed {}", seed);
        Self {
            state: GameState::new(),
            phase: GamePhase::Idle,
            input: InputState::default(),
            rng: Pcg32::seed_from_u64(seed),
            high_score,
            settings,
            storage,
            notifier,
            session: 0,
            transition: None,
            summary: None,
            pending: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Feed one input edge. Held state is buffered for the next tick.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveLeft(_) | InputEvent::MoveRight(_) | InputEvent::Fire(_) => {
                self.input.apply(event);
            }
            InputEvent::ToggleSound => {
                let enabled = self.settings.toggle_sound();
                self.settings.save(&mut self.storage);
                log::info!("Sound {}", if enabled { "on" } else { "off" });
                self.pending.push(GameEvent::SoundToggled { enabled });
            }
            InputEvent::Restart => {
                if self.phase.accepts_restart() {
                    self.start();
                } else {
                    log::debug!("Ignoring restart while {:?}", self.phase);
                }
            }
        }
    }

    /// Begin a new game at wave 1. Only reachable through `Restart`.
    fn start(&mut self) {
        self.session += 1;
        self.transition = None;
        self.summary = None;
        self.state.reset();
        self.phase = GamePhase::Running;
        log::info!("Session {} started", self.session);
        self.pending.push(GameEvent::WaveStarted { wave: 1 });
    }

    /// Advance by one host frame of `dt_ms` milliseconds.
    ///
    /// Returns the events produced since the previous frame.
    pub fn frame(&mut self, dt_ms: f32) -> &[GameEvent] {
        self.events.clear();
        self.events.append(&mut self.pending);
        match self.phase {
            GamePhase::Running => self.run_tick(dt_ms),
            GamePhase::WaveTransition => self.advance_transition(dt_ms),
            _ => {}
        }
        &self.events
    }

    /// Stop ticking and drop any pending timer (host going away)
    pub fn teardown(&mut self) {
        self.transition = None;
        self.input.clear();
        if !matches!(self.phase, GamePhase::Over { .. }) {
            self.phase = GamePhase::Idle;
        }
        log::info!("Session {} torn down", self.session);
    }

    fn run_tick(&mut self, dt_ms: f32) {
        let report = step(&mut self.state, &self.input, dt_ms, &mut self.rng);
        self.events.extend_from_slice(&report.events);
        for event in &report.events {
            self.dispatch(event);
        }

        match report.outcome {
            StepOutcome::Continue => {}
            StepOutcome::Defeat(cause) => {
                log::info!("Defeat on wave {}: {:?}", self.state.wave, cause);
                self.end_game(false);
            }
            StepOutcome::Victory => {
                log::info!("All {} waves cleared", MAX_WAVE);
                self.end_game(true);
            }
            StepOutcome::WaveCleared => {
                log::info!("Wave {} cleared", self.state.wave);
                self.phase = GamePhase::WaveTransition;
                self.transition = Some(WAVE_TRANSITION_MS);
            }
        }
    }

    fn advance_transition(&mut self, dt_ms: f32) {
        let Some(remaining_ms) = self.transition.as_mut() else {
            return;
        };
        *remaining_ms -= dt_ms;
        if *remaining_ms > 0.0 {
            return;
        }

        self.transition = None;
        let wave = self.state.wave + 1;
        generate_wave(&mut self.state, wave);
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::WaveStarted { wave });
    }

    fn end_game(&mut self, victory: bool) {
        self.phase = GamePhase::Over { victory };
        self.transition = None;

        let score = self.state.score;
        let new_high_score = self.high_score.record(score, &mut self.storage);
        let summary = GameSummary {
            victory,
            score,
            wave: self.state.wave,
            new_high_score,
        };
        self.summary = Some(summary);

        let event = GameEvent::GameOver {
            victory,
            score,
            new_high_score,
        };
        self.dispatch(&event);
        self.events.push(event);
    }

    /// Route events to the notifier, honouring preferences
    fn dispatch(&mut self, event: &GameEvent) {
        let cue = match event {
            GameEvent::ShotFired { .. } => Some(Cue::Laser),
            GameEvent::AlienDestroyed { .. } => Some(Cue::Explosion),
            GameEvent::GameOver { victory: false, .. } => Some(Cue::GameOver),
            GameEvent::PlayerHit => {
                if self.settings.haptics_enabled {
                    self.notifier.vibrate(HIT_VIBRATION_MS);
                }
                None
            }
            _ => None,
        };
        if let Some(cue) = cue {
            if self.settings.sound_enabled {
                let volume = (self.settings.effective_volume() * cue.gain()).min(1.0);
                self.notifier.play(cue, volume);
            }
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted scenarios and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.value()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Time left before the next wave starts, if a transition is pending
    pub fn transition_remaining_ms(&self) -> Option<f32> {
        self.transition.map(|ms| ms.max(0.0))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }
}
