mod common;

use common::*;

use proptest::prelude::*;

use space_blaster::compute::*;
use space_blaster::config::GameConfig;
use space_blaster::entities::{Enemy, EnemyColour, Laser};
use space_blaster::input::InputState;

const IDLE: InputState = InputState {
    quit: false,
    left: false,
    right: false,
    up: false,
    down: false,
    fire: false,
};

fn enemy_at(x: i32, y: i32) -> Enemy {
    Enemy::new(x, y, EnemyColour::Green, &sprites(), gun())
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_uses_config() {
    let s = make_state();
    assert_eq!((s.player.ship.x, s.player.ship.y), (350, 650));
    assert_eq!(s.player.ship.health, 100);
    assert_eq!(s.player.max_health, 100);
    assert_eq!(s.lives, 5);
    assert_eq!(s.level, 0);
    assert_eq!(s.wave_length, 5);
    assert_eq!(s.status, GameStatus::Playing);
    assert!(s.enemies.is_empty());
}

// ── Waves ─────────────────────────────────────────────────────────────────────

#[test]
fn first_wave_is_level_one_with_nine_enemies() {
    let mut rng = seeded_rng();

    let s = spawn_wave(&make_state(), &mut rng);

    assert_eq!(s.level, 1);
    assert_eq!(s.wave_length, 9);
    assert_eq!(s.enemies.len(), 9);
    for enemy in &s.enemies {
        assert!((90..660).contains(&enemy.ship.x), "x = {}", enemy.ship.x);
        assert!((-1500..-100).contains(&enemy.ship.y), "y = {}", enemy.ship.y);
    }
}

#[test]
fn first_tick_spawns_the_first_wave() {
    let mut rng = seeded_rng();
    let s = tick(&make_state(), &IDLE, &mut rng);
    assert_eq!(s.frame, 1);
    assert_eq!(s.level, 1);
    assert_eq!(s.enemies.len(), 9);
}

#[test]
fn cleared_wave_grows_by_four() {
    let mut rng = seeded_rng();
    let mut s = spawn_wave(&make_state(), &mut rng);
    s.enemies.clear();

    let s = spawn_wave(&s, &mut rng);
    assert_eq!(s.enemies.len(), 13);
    assert_eq!(s.wave_length, 13);
    assert_eq!(s.level, 2);
}

#[test]
fn no_spawn_while_wave_is_alive() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.enemies.push(enemy_at(100, -200));

    let s = spawn_wave(&s, &mut rng);
    assert_eq!(s.level, 0);
    assert_eq!(s.enemies.len(), 1);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_passing_bottom_costs_a_life() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.enemies.push(enemy_at(90, 750 - ENEMY_H));

    s = tick(&s, &IDLE, &mut rng);

    assert_eq!(s.lives, 4);
    assert!(s.enemies.is_empty());
}

#[test]
fn enemy_touching_bottom_edge_survives() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.enemies.push(enemy_at(90, 750 - ENEMY_H - 1));

    let s = update_enemies(&s, &mut rng);

    assert_eq!(s.lives, 5);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].ship.y + ENEMY_H, 750);
}

#[test]
fn ramming_enemy_is_destroyed_and_damages_player() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.enemies.push(enemy_at(360, 630));
    s.enemies.push(enemy_at(100, 100));

    let s = update_enemies(&s, &mut rng);

    assert_eq!(s.player.ship.health, 95);
    assert_eq!(s.lives, 5);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].ship.x, 100);
}

#[test]
fn enemies_descend_by_enemy_velocity() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.enemies.push(enemy_at(100, -400));
    s.enemies.push(enemy_at(300, -200));

    let s = update_enemies(&s, &mut rng);

    let ys: Vec<i32> = s.enemies.iter().map(|e| e.ship.y).collect();
    assert_eq!(ys, vec![-399, -199]);
}

#[test]
fn enemies_fire_at_random() {
    let mut config = GameConfig::default();
    config.enemy.fire_chance_seconds = 1;
    config.screen.fps = 1; // every enemy fires whenever its gun is ready
    let mut s = init_state(&config, &sprites());
    let mut rng = seeded_rng();
    s.enemies.push(enemy_at(100, 100));

    let s = update_enemies(&s, &mut rng);

    assert_eq!(s.enemies[0].ship.lasers.len(), 1);
}

#[test]
fn player_laser_clears_enemy_from_wave() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.enemies.push(enemy_at(333, 500));
    s.enemies.push(enemy_at(100, 100));

    s = tick(&s, &InputState { fire: true, ..IDLE }, &mut rng);
    assert_eq!(s.player.ship.lasers.len(), 1);

    for _ in 0..40 {
        s = tick(&s, &IDLE, &mut rng);
    }
    assert!(s.enemies.iter().all(|e| e.ship.x != 333));
    assert!(s.enemies.iter().any(|e| e.ship.x == 100));
    assert!(s.player.ship.lasers.is_empty());
}

// ── Player input ──────────────────────────────────────────────────────────────

#[test]
fn holding_fire_shoots_every_cooldown_period() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    let fire = InputState { fire: true, ..IDLE };

    for _ in 0..30 {
        s = tick(&s, &fire, &mut rng);
    }
    assert_eq!(s.player.ship.lasers.len(), 1);

    s = tick(&s, &fire, &mut rng);
    assert_eq!(s.player.ship.lasers.len(), 2);
}

#[test]
fn movement_is_clamped_to_screen() {
    let mut s = make_state();
    s.player.ship.x = 2;
    s.player.ship.y = 3;
    s = move_player_left(&s);
    s = move_player_up(&s);
    assert_eq!((s.player.ship.x, s.player.ship.y), (0, 0));

    s.player.ship.x = 750 - PLAYER_W - 1;
    s.player.ship.y = 750 - PLAYER_H - 2;
    s = move_player_right(&s);
    s = move_player_down(&s);
    assert_eq!((s.player.ship.x, s.player.ship.y), (750 - PLAYER_W, 750 - PLAYER_H));
}

#[test]
fn opposite_keys_cancel_out() {
    let mut s = make_state();
    s = apply_input(&s, &InputState { left: true, right: true, ..IDLE });
    assert_eq!(s.player.ship.x, 350);
}

fn arb_input() -> impl Strategy<Value = InputState> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, up, down)| {
        InputState { left, right, up, down, ..IDLE }
    })
}

proptest! {
    #[test]
    fn player_stays_on_screen(inputs in prop::collection::vec(arb_input(), 1..300)) {
        let mut s = make_state();
        for input in &inputs {
            s = apply_input(&s, input);
            let ship = &s.player.ship;
            prop_assert!((0..=750 - PLAYER_W).contains(&ship.x), "x = {}", ship.x);
            prop_assert!((0..=750 - PLAYER_H).contains(&ship.y), "y = {}", ship.y);
        }
    }
}

// ── Loss and lingering ────────────────────────────────────────────────────────

#[test]
fn no_lives_lingers_then_ends() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.lives = 0;

    for frame in 1..180 {
        s = tick(&s, &IDLE, &mut rng);
        assert_eq!(s.status, GameStatus::Lost, "frame {frame}");
    }
    s = tick(&s, &IDLE, &mut rng);
    assert_eq!(s.status, GameStatus::Ended);
    assert_eq!(s.lost_count, 180);
}

#[test]
fn zero_health_is_a_loss() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.player.ship.health = 0;
    s = tick(&s, &IDLE, &mut rng);
    assert_eq!(s.status, GameStatus::Lost);
}

#[test]
fn lingering_skips_gameplay() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.lives = 0;
    s.enemies.push(enemy_at(100, 100));

    let busy = InputState { quit: true, left: true, fire: true, ..IDLE };
    s = tick(&s, &busy, &mut rng);

    assert_eq!(s.status, GameStatus::Lost);
    assert_eq!(s.player.ship.x, 350);
    assert!(s.player.ship.lasers.is_empty());
    assert_eq!(s.enemies[0].ship.y, 100);
    assert_eq!(s.level, 0);
}

#[test]
fn quit_ends_the_session_immediately() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s = tick(&s, &InputState { quit: true, left: true, ..IDLE }, &mut rng);

    assert_eq!(s.status, GameStatus::Ended);
    assert_eq!(s.player.ship.x, 350);
}

#[test]
fn ended_session_does_not_advance() {
    let mut s = make_state();
    let mut rng = seeded_rng();
    s.status = GameStatus::Ended;
    s = tick(&s, &IDLE, &mut rng);
    assert!(s.enemies.is_empty());
    assert_eq!(s.level, 0);
}

// ── Pure transitions ──────────────────────────────────────────────────────────

#[test]
fn tick_leaves_the_previous_state_untouched() {
    let mut rng = seeded_rng();
    let before = make_state();

    let after = tick(&before, &InputState { fire: true, left: true, ..IDLE }, &mut rng);

    assert_eq!(before.frame, 0);
    assert_eq!(before.level, 0);
    assert!(before.enemies.is_empty());
    assert!(before.player.ship.lasers.is_empty());
    assert_eq!(before.player.ship.x, 350);

    assert_eq!(after.frame, 1);
    assert_eq!(after.player.ship.x, 345);
    assert_eq!(after.player.ship.lasers.len(), 1);
}

#[test]
fn player_shoot_respects_the_gun() {
    let s = make_state();
    let s = player_shoot(&s);
    assert_eq!(s.player.ship.lasers.len(), 1);
    assert_eq!(s.player.ship.lasers[0].x, 350 - gun().offset_x);

    let s = player_shoot(&s);
    assert_eq!(s.player.ship.lasers.len(), 1);
}

#[test]
fn update_player_lasers_copies_the_wave() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 100));
    s.player.ship.lasers.push(Laser::new(110, 104, laser_sprite()));

    let next = update_player_lasers(&s);

    assert!(next.enemies.is_empty());
    assert!(next.player.ship.lasers.is_empty());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.player.ship.lasers.len(), 1);
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_replays_the_same_session() {
    let run = || {
        let mut s = make_state();
        let mut rng = seeded_rng();
        for _ in 0..200 {
            s = tick(&s, &InputState { fire: true, ..IDLE }, &mut rng);
        }
        s.enemies
            .iter()
            .map(|e| (e.ship.x, e.ship.y, e.colour, e.ship.lasers.len()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}
