//! Fixed-timestep simulation of one play session.
//!
//! `Simulation` owns every entity and all session counters. The host feeds it
//! one tick at a time with the elapsed session time and the keys currently
//! held, then hands a read-only `Snapshot` to the presenter.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::*;
use crate::entities::{Enemy, Explosion, Player};
use crate::types::{Rect, Scale};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    GameOver,
}

/// Keys held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub quit: bool,
}

/// What happened during one tick, for the host's side effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: bool,
    pub escaped: u32,
    pub hits: u32,
    pub game_over: bool,
}

/// Read-only view handed to the presenter after a tick.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub player: &'a Rect,
    pub elapsed: Duration,
    pub enemies: &'a [Enemy],
    pub explosions: &'a VecDeque<Explosion>,
    pub score: u32,
    pub lives: u32,
}

#[derive(Clone, Debug)]
pub struct Simulation {
    pub scale: Scale,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub explosions: VecDeque<Explosion>,
    pub score: u32,
    pub lives: u32,
    pub elapsed: Duration,
    pub spawn_timer: u32,
    pub spawn_delay: u32,
    pub tick_count: u64,
    pub status: SessionStatus,
    rng: StdRng,
}

impl Simulation {
    pub fn new(scale: Scale, seed: u64) -> Self {
        info!(
            "New session: screen {}x{} px, scale {:.3}, seed {}",
            scale.screen_width, scale.screen_height, scale.factor, seed
        );
        Simulation {
            scale,
            player: Player::new(&scale),
            enemies: Vec::new(),
            explosions: VecDeque::new(),
            score: 0,
            lives: INITIAL_LIVES,
            elapsed: Duration::ZERO,
            spawn_timer: 0,
            spawn_delay: INITIAL_SPAWN_DELAY,
            tick_count: 0,
            status: SessionStatus::Running,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::GameOver
    }

    /// Advance the session by one tick. Does nothing once the session is over.
    pub fn tick(&mut self, elapsed: Duration, keys: HeldKeys) -> TickReport {
        let mut report = TickReport::default();
        if self.is_over() {
            report.game_over = true;
            return report;
        }

        self.tick_count += 1;
        self.elapsed = elapsed;

        report.spawned = self.advance_spawn_timer();
        self.apply_input(keys);
        let (escaped, hits) = self.update_enemies();
        report.escaped = escaped;
        report.hits = hits;
        self.update_explosions();

        if keys.quit && !self.is_over() {
            info!("Quit requested at tick {}", self.tick_count);
            self.status = SessionStatus::GameOver;
        }
        report.game_over = self.is_over();
        report
    }

    /// Returns true when an enemy was spawned this tick.
    pub fn advance_spawn_timer(&mut self) -> bool {
        self.spawn_timer += 1;
        if self.spawn_timer < self.spawn_delay {
            return false;
        }
        let enemy = Enemy::spawn(&mut self.rng, &self.scale);
        self.enemies.push(enemy);
        self.spawn_timer = 0;
        self.spawn_delay = spawn_delay_for(self.elapsed);
        true
    }

    pub fn apply_input(&mut self, keys: HeldKeys) {
        if keys.left {
            self.player.move_left();
        }
        if keys.right {
            self.player.move_right(self.scale.screen_width);
        }
    }

    /// Moves every enemy, then retires the ones that fell off the screen or
    /// hit the player. Returns `(escaped, hits)`.
    pub fn update_enemies(&mut self) -> (u32, u32) {
        for enemy in &mut self.enemies {
            enemy.update();
        }

        let screen_height = self.scale.screen_height;
        let player = self.player.rect;
        let tick = self.tick_count;
        let mut escaped = 0;
        let mut hits = 0;
        let Simulation { enemies, explosions, score, lives, status, .. } = self;

        enemies.retain(|enemy| {
            if enemy.is_below(screen_height) {
                *score += 1;
                escaped += 1;
                false
            } else if *status == SessionStatus::GameOver {
                // No further hits once the last life is gone.
                true
            } else if enemy.rect.intersects(&player) {
                explosions.push_back(Explosion::new(enemy.rect.x, enemy.rect.y));
                *lives = lives.saturating_sub(1);
                hits += 1;
                debug!("Hit at ({}, {}) on tick {}, {} lives left", enemy.rect.x, enemy.rect.y, tick, lives);
                if *lives == 0 {
                    info!("Out of lives at tick {}", tick);
                    *status = SessionStatus::GameOver;
                }
                false
            } else {
                true
            }
        });

        (escaped, hits)
    }

    /// Shared decay: the oldest explosion goes every `EXPLOSION_DECAY_TICKS` ticks.
    pub fn update_explosions(&mut self) {
        if !self.explosions.is_empty() && self.tick_count % EXPLOSION_DECAY_TICKS == 0 {
            self.explosions.pop_front();
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            player: &self.player.rect,
            elapsed: self.elapsed,
            enemies: &self.enemies,
            explosions: &self.explosions,
            score: self.score,
            lives: self.lives,
        }
    }
}

/// Ticks between spawns after `elapsed` seconds of play.
pub fn spawn_delay_for(elapsed: Duration) -> u32 {
    let seconds = elapsed.as_secs().min(SPAWN_DELAY_BASE as u64) as u32;
    (SPAWN_DELAY_BASE - seconds).max(MIN_SPAWN_DELAY)
}
