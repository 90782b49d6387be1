use crate::constants::*;
use crate::types::{Rect, Scale};
use rand::Rng;
use log::debug;

// --- Player ship ---
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub velocity: i32,
}

impl Player {
    /// Centred horizontally, resting just above the bottom edge.
    pub fn new(scale: &Scale) -> Self {
        let width = scale.apply(PLAYER_DESIGN_WIDTH);
        let height = scale.apply(PLAYER_DESIGN_HEIGHT);
        Player {
            rect: Rect::new(
                scale.screen_width / 2 - width / 2,
                scale.screen_height - height - PLAYER_BOTTOM_MARGIN,
                width,
                height,
            ),
            velocity: PLAYER_VELOCITY,
        }
    }

    pub fn move_left(&mut self) {
        if self.rect.left() - self.velocity >= 0 {
            self.rect.x -= self.velocity;
        }
    }

    pub fn move_right(&mut self, screen_width: i32) {
        if self.rect.right() + self.velocity <= screen_width {
            self.rect.x += self.velocity;
        }
    }
}

// --- Falling enemy ship ---
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub velocity: i32,
}

impl Enemy {
    pub fn new(x: i32, y: i32, width: i32, height: i32, velocity: i32) -> Self {
        Enemy { rect: Rect::new(x, y, width, height), velocity }
    }

    /// Random size, column and fall speed; starts fully above the screen.
    pub fn spawn(rng: &mut impl Rng, scale: &Scale) -> Self {
        let width = rng.gen_range(scale.apply(ENEMY_MIN_DESIGN_WIDTH)..=scale.apply(ENEMY_MAX_DESIGN_WIDTH));
        let height = rng.gen_range(scale.apply(ENEMY_MIN_DESIGN_HEIGHT)..=scale.apply(ENEMY_MAX_DESIGN_HEIGHT));
        let x = rng.gen_range(0..=(scale.screen_width - width).max(0));
        let velocity = rng.gen_range(scale.apply(ENEMY_MIN_DESIGN_VELOCITY)..=scale.apply(ENEMY_MAX_DESIGN_VELOCITY));
        debug!("Spawned enemy at x={} ({}x{}, velocity {})", x, width, height, velocity);
        Enemy::new(x, -height, width, height, velocity)
    }

    pub fn update(&mut self) {
        self.rect.y += self.velocity;
    }

    pub fn is_below(&self, screen_height: i32) -> bool {
        self.rect.top() > screen_height
    }
}

// --- Explosion marker ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
}

impl Explosion {
    pub fn new(x: i32, y: i32) -> Self {
        Explosion { x, y }
    }
}
