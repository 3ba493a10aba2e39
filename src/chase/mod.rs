//! Chase gameplay core.
//!
//! The player square runs from Grumble, a pursuer that homes straight at it and
//! slowly gets faster. `LoopController` owns all game state and drives the
//! Running / Paused / GameOver state machine; the platform only supplies the
//! two schedules (per-frame and once-per-second) through [`Host`] and a drawing
//! target through [`Surface`].

pub mod clock;
pub mod entity;
pub mod input;
pub mod render;
pub mod sim;

pub use clock::GameClock;
pub use entity::{Entity, Field, Rect};
pub use input::{InputTracker, Key};
pub use render::{Surface, render};
pub use sim::{World, collides, step};

use rand::SeedableRng;
use rand_pcg::Pcg32;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::{ChaseConfig, Rules};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Platform services the controller schedules work through.
pub trait Host {
    /// Ask for one more `LoopController::frame` call on the next display frame.
    fn request_frame(&mut self);
    /// Start the repeating one-second callback (`LoopController::clock_tick`).
    fn arm_clock(&mut self);
    fn disarm_clock(&mut self);
    fn seconds_changed(&mut self, secs: u32);
    /// Phase transitions; `secs` is the elapsed time at the transition (the
    /// final score for `GameOver`).
    fn phase_changed(&mut self, phase: Phase, secs: u32);
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub world: World,
    pub clock: GameClock,
    pub phase: Phase,
}

/// Read-only view for a presentation layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Snapshot {
    pub player: Entity,
    pub pursuer: Entity,
    pub field: Field,
    pub elapsed_secs: u32,
    pub phase: Phase,
    pub running: bool,
    pub paused: bool,
}

pub struct LoopController {
    config: ChaseConfig,
    rules: Rules,
    field: Field,
    rng: Pcg32,
    input: InputTracker,
    state: GameState,
    frame_pending: bool,
}

impl LoopController {
    /// Builds a ready-to-start game. Nothing is scheduled until `start`.
    pub fn new(config: ChaseConfig, field: Field, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::spawn(&config, field, &mut rng);
        Self {
            rules: config.rules(),
            config,
            field,
            rng,
            input: InputTracker::new(),
            state: GameState {
                world,
                clock: GameClock::new(),
                phase: Phase::Running,
            },
            frame_pending: false,
        }
    }

    pub fn start(&mut self, host: &mut dyn Host) {
        let color = self.state.world.player.color.clone();
        let mut world = World::spawn(&self.config, self.field, &mut self.rng);
        // Color is a live presentation choice and survives restarts.
        world.player.color = color;
        self.state.world = world;
        self.state.phase = Phase::Running;
        self.state.clock.start();
        self.input.release_all();
        log::info!(
            "chase started: field {}x{}, pursuer at ({}, {})",
            self.field.width,
            self.field.height,
            self.state.world.pursuer.x,
            self.state.world.pursuer.y
        );

        host.disarm_clock();
        host.arm_clock();
        host.seconds_changed(0);
        host.phase_changed(Phase::Running, 0);
        self.schedule_frame(host);
    }

    pub fn restart(&mut self, host: &mut dyn Host) {
        self.start(host);
    }

    /// Swap in new tuning and begin a fresh round with it. The outstanding
    /// frame request (if any) is reused.
    pub fn reconfigure(&mut self, config: ChaseConfig, host: &mut dyn Host) {
        self.rules = config.rules();
        self.config = config;
        self.start(host);
    }

    pub fn toggle_pause(&mut self, host: &mut dyn Host) {
        let secs = self.state.clock.elapsed_secs();
        match self.state.phase {
            Phase::Running => {
                self.state.phase = Phase::Paused;
                self.state.clock.pause();
                host.disarm_clock();
                host.phase_changed(Phase::Paused, secs);
                log::info!("paused at {secs}s");
                // The frame already in flight performs the single paused redraw.
            }
            Phase::Paused => {
                self.state.phase = Phase::Running;
                self.state.clock.resume();
                host.arm_clock();
                host.phase_changed(Phase::Running, secs);
                log::info!("resumed at {secs}s");
                self.schedule_frame(host);
            }
            Phase::GameOver => {}
        }
    }

    /// One display frame.
    pub fn frame(&mut self, host: &mut dyn Host, surface: &mut dyn Surface) {
        self.frame_pending = false;
        match self.state.phase {
            Phase::GameOver => {}
            Phase::Paused => render(&self.state.world, surface),
            Phase::Running => {
                surface.clear(self.field.width, self.field.height);
                step(
                    &mut self.state.world,
                    &self.input,
                    &self.rules,
                    self.field,
                    self.state.clock.elapsed_secs(),
                );
                if collides(&self.state.world.player, &self.state.world.pursuer) {
                    self.game_over(host);
                }
                render(&self.state.world, surface);
                if self.state.phase == Phase::Running {
                    self.schedule_frame(host);
                }
            }
        }
    }

    pub fn clock_tick(&mut self, host: &mut dyn Host) {
        if let Some(secs) = self.state.clock.tick() {
            host.seconds_changed(secs);
        }
    }

    /// Returns whether `key` was a movement key.
    pub fn key_event(&mut self, key: &str, pressed: bool) -> bool {
        self.input.set_key(key, pressed)
    }

    pub fn set_player_color(&mut self, color: &str) {
        self.state.world.player.color = color.to_string();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn snapshot(&self) -> Snapshot {
        let clock = &self.state.clock;
        Snapshot {
            player: self.state.world.player.clone(),
            pursuer: self.state.world.pursuer.clone(),
            field: self.field,
            elapsed_secs: clock.elapsed_secs(),
            phase: self.state.phase,
            running: clock.is_running(),
            paused: clock.is_paused(),
        }
    }

    fn game_over(&mut self, host: &mut dyn Host) {
        if self.state.phase == Phase::GameOver {
            return;
        }
        self.state.phase = Phase::GameOver;
        self.state.clock.stop();
        host.disarm_clock();
        let secs = self.state.clock.elapsed_secs();
        log::info!("game over after {secs}s");
        host.phase_changed(Phase::GameOver, secs);
    }

    fn schedule_frame(&mut self, host: &mut dyn Host) {
        if !self.frame_pending {
            self.frame_pending = true;
            host.request_frame();
        }
    }
}
