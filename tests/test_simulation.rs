use std::time::Duration;

use galaxy_rider::constants::*;
use galaxy_rider::entities::{Enemy, Explosion};
use galaxy_rider::simulation::*;
use galaxy_rider::types::Scale;

/// 1000x800 screen, so every design size maps 1:1.
fn make_sim() -> Simulation {
    Simulation::new(Scale::new(1000, 800), 42)
}

/// Same, with automatic spawning switched off.
fn quiet_sim() -> Simulation {
    let mut sim = make_sim();
    sim.spawn_delay = u32::MAX;
    sim
}

fn idle() -> HeldKeys {
    HeldKeys::default()
}

fn left() -> HeldKeys {
    HeldKeys { left: true, ..HeldKeys::default() }
}

fn right() -> HeldKeys {
    HeldKeys { right: true, ..HeldKeys::default() }
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

// ── initial state ─────────────────────────────────────────────────────────────

#[test]
fn new_session_defaults() {
    let sim = make_sim();
    assert_eq!(sim.score, 0);
    assert_eq!(sim.lives, 1);
    assert_eq!(sim.tick_count, 0);
    assert_eq!(sim.spawn_delay, INITIAL_SPAWN_DELAY);
    assert_eq!(sim.status, SessionStatus::Running);
    assert!(sim.enemies.is_empty());
    assert!(sim.explosions.is_empty());
}

#[test]
fn player_starts_centred_above_bottom() {
    let sim = make_sim();
    assert_eq!(sim.player.rect.width, 120);
    assert_eq!(sim.player.rect.height, 100);
    assert_eq!(sim.player.rect.x, 440);
    assert_eq!(sim.player.rect.y, 680);
    assert_eq!(sim.player.velocity, 8);
}

// ── apply_input ───────────────────────────────────────────────────────────────

#[test]
fn left_moves_by_velocity() {
    let mut sim = quiet_sim();
    sim.apply_input(left());
    assert_eq!(sim.player.rect.x, 432);
}

#[test]
fn right_moves_by_velocity() {
    let mut sim = quiet_sim();
    sim.apply_input(right());
    assert_eq!(sim.player.rect.x, 448);
}

#[test]
fn both_directions_cancel_out() {
    let mut sim = quiet_sim();
    sim.apply_input(HeldKeys { left: true, right: true, quit: false });
    assert_eq!(sim.player.rect.x, 440);
}

#[test]
fn left_stops_at_screen_edge() {
    let mut sim = quiet_sim();
    for _ in 0..200 {
        sim.apply_input(left());
    }
    assert_eq!(sim.player.rect.x, 0);
}

#[test]
fn left_refuses_partial_step() {
    let mut sim = quiet_sim();
    sim.player.rect.x = 5;
    sim.apply_input(left());
    assert_eq!(sim.player.rect.x, 5);
}

#[test]
fn right_stops_at_screen_edge() {
    let mut sim = quiet_sim();
    for _ in 0..200 {
        sim.apply_input(right());
    }
    assert_eq!(sim.player.rect.x, 880); // 1000 - 120
}

#[test]
fn player_stays_in_bounds_for_every_tick() {
    let mut sim = quiet_sim();
    let max_x = sim.scale.screen_width - sim.player.rect.width;
    for t in 0..600u64 {
        let keys = if (t / 97) % 2 == 0 { left() } else { right() };
        sim.tick(Duration::from_millis(t * 16), keys);
        assert!(sim.player.rect.x >= 0);
        assert!(sim.player.rect.x <= max_x);
    }
}

// ── spawn timer ───────────────────────────────────────────────────────────────

#[test]
fn spawn_delay_formula() {
    assert_eq!(spawn_delay_for(secs(0)), 40);
    assert_eq!(spawn_delay_for(Duration::from_millis(5_999)), 35);
    assert_eq!(spawn_delay_for(secs(29)), 11);
    assert_eq!(spawn_delay_for(secs(30)), 10);
    assert_eq!(spawn_delay_for(secs(45)), 10);
    assert_eq!(spawn_delay_for(secs(10_000)), 10);
}

#[test]
fn spawn_delay_never_increases_and_never_below_floor() {
    let mut previous = u32::MAX;
    for ms in (0..120_000u64).step_by(250) {
        let delay = spawn_delay_for(Duration::from_millis(ms));
        assert!(delay <= previous);
        assert!(delay >= MIN_SPAWN_DELAY);
        previous = delay;
    }
}

#[test]
fn first_enemy_after_initial_delay() {
    let mut sim = make_sim();
    for _ in 0..(INITIAL_SPAWN_DELAY - 1) {
        assert!(!sim.advance_spawn_timer());
    }
    assert!(sim.enemies.is_empty());
    assert!(sim.advance_spawn_timer());
    assert_eq!(sim.enemies.len(), 1);
    assert_eq!(sim.spawn_timer, 0);
}

#[test]
fn spawn_recalculates_delay_from_elapsed_time() {
    let mut sim = make_sim();
    sim.elapsed = secs(12);
    sim.spawn_timer = sim.spawn_delay - 1;
    assert!(sim.advance_spawn_timer());
    assert_eq!(sim.spawn_delay, 28);
}

#[test]
fn tick_reports_spawn() {
    let mut sim = make_sim();
    let mut spawned = 0;
    for t in 1..=60u64 {
        if sim.tick(Duration::from_millis(t * 16), idle()).spawned {
            spawned += 1;
        }
    }
    assert_eq!(spawned, 1);
    assert_eq!(sim.enemies.len(), 1);
}

#[test]
fn same_seed_same_enemies() {
    let mut a = make_sim();
    let mut b = make_sim();
    for t in 0..240u64 {
        a.tick(Duration::from_millis(t * 16), idle());
        b.tick(Duration::from_millis(t * 16), idle());
    }
    assert!(!a.enemies.is_empty());
    assert_eq!(a.enemies, b.enemies);
}

// ── update_enemies: leaving the screen ────────────────────────────────────────

#[test]
fn enemy_leaving_screen_scores_one() {
    let mut sim = quiet_sim();
    sim.enemies.push(Enemy::new(0, 800, 50, 50, 1));
    let report = sim.tick(secs(1), idle());
    assert_eq!(report.escaped, 1);
    assert_eq!(sim.score, 1);
    assert!(sim.enemies.is_empty());
    assert!(sim.explosions.is_empty());
    assert_eq!(sim.lives, 1);
}

#[test]
fn enemy_exactly_at_bottom_edge_is_kept() {
    let mut sim = quiet_sim();
    sim.enemies.push(Enemy::new(0, 795, 50, 50, 5));
    sim.tick(secs(1), idle());
    assert_eq!(sim.enemies.len(), 1);
    assert_eq!(sim.enemies[0].rect.y, 800);
    assert_eq!(sim.score, 0);
}

#[test]
fn each_escaped_enemy_scores_once() {
    let mut sim = quiet_sim();
    sim.enemies.push(Enemy::new(0, 799, 40, 40, 5));
    sim.enemies.push(Enemy::new(900, 798, 40, 40, 5));
    sim.enemies.push(Enemy::new(900, 0, 40, 40, 5));
    let report = sim.tick(secs(1), idle());
    assert_eq!(report.escaped, 2);
    assert_eq!(sim.score, 2);
    assert_eq!(sim.enemies.len(), 1);
    assert_eq!(sim.enemies[0].rect.y, 5);
}

#[test]
fn enemies_fall_by_their_velocity() {
    let mut sim = quiet_sim();
    sim.enemies.push(Enemy::new(0, -40, 40, 40, 3));
    sim.enemies.push(Enemy::new(100, -40, 40, 40, 7));
    sim.tick(secs(0), idle());
    assert_eq!(sim.enemies[0].rect.y, -37);
    assert_eq!(sim.enemies[1].rect.y, -33);
}

// ── update_enemies: collisions ────────────────────────────────────────────────

#[test]
fn collision_ends_single_life_session() {
    let mut sim = quiet_sim();
    // Directly above the player, close enough to overlap after one move.
    sim.enemies.push(Enemy::new(440, 625, 50, 50, 10));
    let report = sim.tick(secs(1), idle());

    assert_eq!(report.hits, 1);
    assert!(report.game_over);
    assert_eq!(sim.lives, 0);
    assert_eq!(sim.status, SessionStatus::GameOver);
    assert!(sim.enemies.is_empty());
    assert_eq!(sim.explosions.len(), 1);
    assert_eq!(sim.explosions[0], Explosion::new(440, 635));
    assert_eq!(sim.score, 0);
}

#[test]
fn collision_with_spare_lives_keeps_running() {
    let mut sim = quiet_sim();
    sim.lives = 3;
    sim.enemies.push(Enemy::new(500, 650, 40, 40, 5));
    sim.tick(secs(1), idle());
    assert_eq!(sim.lives, 2);
    assert_eq!(sim.status, SessionStatus::Running);
    assert_eq!(sim.explosions.len(), 1);
    assert!(sim.enemies.is_empty());
}

#[test]
fn touching_edges_do_not_collide() {
    let mut sim = quiet_sim();
    // Bottom edge lands exactly on the player's top edge (680).
    sim.enemies.push(Enemy::new(440, 630, 50, 40, 10));
    sim.tick(secs(1), idle());
    assert_eq!(sim.lives, 1);
    assert_eq!(sim.enemies.len(), 1);
    assert!(sim.explosions.is_empty());
}

#[test]
fn side_by_side_does_not_collide() {
    let mut sim = quiet_sim();
    sim.enemies.push(Enemy::new(390, 690, 50, 40, 1)); // right edge == player left edge
    sim.tick(secs(1), idle());
    assert_eq!(sim.lives, 1);
    assert_eq!(sim.enemies.len(), 1);
}

#[test]
fn lives_never_go_below_zero() {
    let mut sim = quiet_sim();
    sim.enemies.push(Enemy::new(450, 650, 40, 40, 5));
    sim.enemies.push(Enemy::new(500, 650, 40, 40, 5));
    let report = sim.tick(secs(1), idle());
    assert_eq!(sim.lives, 0);
    assert_eq!(report.hits, 1);
    assert_eq!(sim.explosions.len(), 1);
    assert_eq!(sim.enemies.len(), 1);
    assert!(sim.is_over());
}

#[test]
fn enemy_escaping_after_last_life_still_scores() {
    let mut sim = quiet_sim();
    sim.enemies.push(Enemy::new(450, 650, 40, 40, 5));
    sim.enemies.push(Enemy::new(0, 799, 40, 40, 5));
    let report = sim.tick(secs(1), idle());
    assert_eq!(sim.lives, 0);
    assert_eq!(report.hits, 1);
    assert_eq!(report.escaped, 1);
    assert_eq!(sim.score, 1);
    assert!(sim.enemies.is_empty());
    assert_eq!(sim.explosions.len(), 1);
    assert!(sim.is_over());
}

#[test]
fn game_over_iff_lives_exhausted() {
    let mut sim = quiet_sim();
    sim.lives = 2;
    sim.enemies.push(Enemy::new(450, 650, 40, 40, 5));
    sim.tick(secs(1), idle());
    assert!(!sim.is_over());
    assert_eq!(sim.lives, 1);

    sim.enemies.push(Enemy::new(450, 650, 40, 40, 5));
    sim.tick(secs(1), idle());
    assert!(sim.is_over());
    assert_eq!(sim.lives, 0);
}

// ── update_explosions ─────────────────────────────────────────────────────────

#[test]
fn oldest_explosion_removed_every_fifth_tick() {
    let mut sim = quiet_sim();
    sim.explosions.push_back(Explosion::new(1, 1));
    sim.explosions.push_back(Explosion::new(2, 2));
    sim.explosions.push_back(Explosion::new(3, 3));

    for _ in 0..4 {
        sim.tick(secs(0), idle());
    }
    assert_eq!(sim.explosions.len(), 3);

    sim.tick(secs(0), idle()); // tick 5
    assert_eq!(sim.explosions.len(), 2);
    assert_eq!(sim.explosions[0], Explosion::new(2, 2));

    for _ in 0..5 {
        sim.tick(secs(0), idle()); // through tick 10
    }
    assert_eq!(sim.explosions.len(), 1);
    assert_eq!(sim.explosions[0], Explosion::new(3, 3));
}

#[test]
fn decay_on_empty_list_is_harmless() {
    let mut sim = quiet_sim();
    for _ in 0..10 {
        sim.tick(secs(0), idle());
    }
    assert!(sim.explosions.is_empty());
}

// ── quit & terminal state ─────────────────────────────────────────────────────

#[test]
fn quit_request_ends_session_at_tick_boundary() {
    let mut sim = quiet_sim();
    let report = sim.tick(secs(1), HeldKeys { quit: true, left: true, right: false });
    assert!(report.game_over);
    assert_eq!(sim.status, SessionStatus::GameOver);
    assert_eq!(sim.lives, 1);
    // The tick in which quit arrived still completes.
    assert_eq!(sim.player.rect.x, 432);
    assert_eq!(sim.tick_count, 1);
}

#[test]
fn ticks_after_game_over_change_nothing() {
    let mut sim = quiet_sim();
    sim.enemies.push(Enemy::new(100, 0, 40, 40, 5));
    sim.tick(secs(1), HeldKeys { quit: true, ..HeldKeys::default() });
    let enemies = sim.enemies.clone();
    let player = sim.player.clone();

    let report = sim.tick(secs(2), left());
    assert!(report.game_over);
    assert_eq!(sim.tick_count, 1);
    assert_eq!(sim.enemies, enemies);
    assert_eq!(sim.player, player);
    assert_eq!(sim.elapsed, secs(1));
}

#[test]
fn snapshot_mirrors_state() {
    let mut sim = quiet_sim();
    sim.score = 9;
    sim.enemies.push(Enemy::new(10, 10, 40, 40, 2));
    sim.explosions.push_back(Explosion::new(5, 6));
    sim.elapsed = secs(3);

    let snap = sim.snapshot();
    assert_eq!(*snap.player, sim.player.rect);
    assert_eq!(snap.score, 9);
    assert_eq!(snap.lives, 1);
    assert_eq!(snap.enemies.len(), 1);
    assert_eq!(snap.explosions.len(), 1);
    assert_eq!(snap.elapsed, secs(3));
}
