use std::time::Duration;

// --- Timing ---
pub const TICKS_PER_SECOND: u32 = 60;
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);
pub const GAME_OVER_HOLD: Duration = Duration::from_secs(3);

// --- Screen ---
pub const DESIGN_WIDTH: i32 = 1000;
pub const DESIGN_HEIGHT: i32 = 800;
pub const CELL_WIDTH: i32 = 10; // World pixels per terminal column
pub const CELL_HEIGHT: i32 = 20; // World pixels per terminal row

// --- Player ---
pub const PLAYER_DESIGN_WIDTH: i32 = 120;
pub const PLAYER_DESIGN_HEIGHT: i32 = 100;
pub const PLAYER_VELOCITY: i32 = 8; // Pixels per tick, not scaled
pub const PLAYER_BOTTOM_MARGIN: i32 = 20;
pub const INITIAL_LIVES: u32 = 1;

// --- Enemies ---
pub const ENEMY_MIN_DESIGN_WIDTH: i32 = 50;
pub const ENEMY_MAX_DESIGN_WIDTH: i32 = 100;
pub const ENEMY_MIN_DESIGN_HEIGHT: i32 = 40;
pub const ENEMY_MAX_DESIGN_HEIGHT: i32 = 80;
pub const ENEMY_MIN_DESIGN_VELOCITY: i32 = 3;
pub const ENEMY_MAX_DESIGN_VELOCITY: i32 = 7;

// --- Spawning ---
pub const INITIAL_SPAWN_DELAY: u32 = 60; // Ticks before the first enemy
pub const SPAWN_DELAY_BASE: u32 = 40;
pub const MIN_SPAWN_DELAY: u32 = 10;

// --- Explosions ---
pub const EXPLOSION_DECAY_TICKS: u64 = 5;
pub const EXPLOSION_DESIGN_WIDTH: i32 = 60; // Placeholder sprite size only
pub const EXPLOSION_DESIGN_HEIGHT: i32 = 40;
