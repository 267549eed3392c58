/// Pure game-logic functions.
///
/// Every transition takes an immutable reference to the current `GameState`
/// (and, where needed, an RNG handle) and returns the next `GameState`.
/// `tick` chains them for one frame: loss check and lingering, wave
/// spawning, player input, enemy descent and fire, then the player's lasers.
/// Side effects are limited to the injected RNG, so a seeded generator
/// replays a session exactly.  Rendering happens elsewhere, before each tick.

use rand::Rng;

use crate::assets::Sprites;
use crate::collision::collide;
use crate::config::GameConfig;
use crate::entities::{Enemy, Player};
use crate::input::InputState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Out of lives or health; the loss overlay is showing.
    Lost,
    /// The loop should stop.
    Ended,
}

/// The whole session.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// The current wave, in spawn order.
    pub enemies: Vec<Enemy>,
    pub level: u32,
    pub lives: i32,
    /// Size of the most recently spawned wave.
    pub wave_length: u32,
    pub status: GameStatus,
    /// Frames spent with the loss condition holding.
    pub lost_count: u32,
    pub frame: u64,
    pub config: GameConfig,
    pub sprites: Sprites,
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn init_state(config: &GameConfig, sprites: &Sprites) -> GameState {
    let player = Player::new(
        config.player.start_x,
        config.player.start_y,
        config.player.health,
        sprites.player.clone(),
        config.laser.gun(),
    );

    GameState {
        player,
        enemies: Vec::new(),
        level: 0,
        lives: config.session.lives,
        wave_length: config.wave.initial_length,
        status: GameStatus::Playing,
        lost_count: 0,
        frame: 0,
        config: config.clone(),
        sprites: sprites.clone(),
    }
}

// ── Session state machine ────────────────────────────────────────────────────

pub fn is_lost(state: &GameState) -> bool {
    state.lives <= 0 || state.player.ship.health <= 0
}

/// Evaluate the loss condition and run down the linger timer.  Gameplay is
/// skipped for any frame whose resulting status is not `Playing`.
pub fn update_loss(state: &GameState) -> GameState {
    if state.status == GameStatus::Ended || !is_lost(state) {
        return state.clone();
    }
    if state.status == GameStatus::Playing {
        log::info!(
            "player lost at level {} (lives {}, health {})",
            state.level,
            state.lives,
            state.player.ship.health
        );
    }

    let lost_count = state.lost_count + 1;
    let status = if lost_count >= state.config.linger_frames() {
        GameStatus::Ended
    } else {
        GameStatus::Lost
    };
    GameState { status, lost_count, ..state.clone() }
}

// ── Waves ────────────────────────────────────────────────────────────────────

/// When the wave is cleared, advance the level, grow the wave and spawn it
/// above the screen.  A live wave is left untouched.
pub fn spawn_wave(state: &GameState, rng: &mut impl Rng) -> GameState {
    if !state.enemies.is_empty() {
        return state.clone();
    }
    let level = state.level + 1;
    let wave_length = state.wave_length.saturating_add(state.config.wave.growth);

    let xs = state.config.spawn_x_range();
    let ys = state.config.spawn_y_range();
    let gun = state.config.laser.gun();
    let enemies: Vec<Enemy> = (0..wave_length)
        .map(|_| {
            let x = rng.gen_range(xs.clone());
            let y = rng.gen_range(ys.clone());
            Enemy::new(x, y, rng.gen(), &state.sprites, gun)
        })
        .collect();

    log::info!("level {level}: spawned {wave_length} enemies");
    GameState { enemies, level, wave_length, ..state.clone() }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    player.ship.x = (player.ship.x - state.config.player.velocity).max(0);
    GameState { player, ..state.clone() }
}

pub fn move_player_right(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    let max_x = (state.config.screen.width - player.ship.width()).max(0);
    player.ship.x = (player.ship.x + state.config.player.velocity).min(max_x);
    GameState { player, ..state.clone() }
}

pub fn move_player_up(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    player.ship.y = (player.ship.y - state.config.player.velocity).max(0);
    GameState { player, ..state.clone() }
}

pub fn move_player_down(state: &GameState) -> GameState {
    let mut player = state.player.clone();
    let max_y = (state.config.screen.height - player.ship.height()).max(0);
    player.ship.y = (player.ship.y + state.config.player.velocity).min(max_y);
    GameState { player, ..state.clone() }
}

/// Fire a laser from the player if its gun is ready.
pub fn player_shoot(state: &GameState) -> GameState {
    if !state.player.ship.can_shoot() {
        return state.clone();
    }
    let mut player = state.player.clone();
    player.ship.shoot();
    GameState { player, ..state.clone() }
}

/// Apply held direction keys and the fire key.
pub fn apply_input(state: &GameState, input: &InputState) -> GameState {
    let mut next = state.clone();
    if input.left {
        next = move_player_left(&next);
    }
    if input.right {
        next = move_player_right(&next);
    }
    if input.up {
        next = move_player_up(&next);
    }
    if input.down {
        next = move_player_down(&next);
    }
    if input.fire {
        next = player_shoot(&next);
    }
    next
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Move each enemy down, resolve its lasers against the player and let it
/// fire at random.  An enemy ramming the player is destroyed and deals
/// damage; one slipping past the bottom edge costs a life.  The next wave is
/// built from the survivors of a copy of the current one.
pub fn update_enemies(state: &GameState, rng: &mut impl Rng) -> GameState {
    let height = state.config.screen.height;
    let damage = state.config.laser.damage;
    let laser_velocity = state.config.laser.velocity;
    let enemy_velocity = state.config.enemy.velocity;
    let fire_odds = state.config.enemy_fire_odds();

    let mut player = state.player.clone();
    let mut lives = state.lives;
    let mut enemies = Vec::with_capacity(state.enemies.len());

    for enemy in &state.enemies {
        let mut enemy = enemy.clone();
        enemy.move_by(enemy_velocity);

        let hits = enemy.ship.move_lasers(laser_velocity, height, &mut player.ship, damage);
        if hits > 0 {
            log::debug!("player hit by {hits} laser(s), health {}", player.ship.health);
        }

        if rng.gen_ratio(1, fire_odds) {
            enemy.ship.shoot();
        }

        if collide(&enemy, &player) {
            player.ship.health -= damage;
            log::debug!("player rammed, health {}", player.ship.health);
        } else if enemy.ship.y + enemy.ship.height() > height {
            lives -= 1;
            log::debug!("enemy slipped past, lives {lives}");
        } else {
            enemies.push(enemy);
        }
    }

    GameState { player, enemies, lives, ..state.clone() }
}

/// Move the player's lasers and drop the enemies they hit from the wave.
pub fn update_player_lasers(state: &GameState) -> GameState {
    let height = state.config.screen.height;
    let velocity = -state.config.laser.velocity;

    let mut player = state.player.clone();
    let mut enemies = state.enemies.clone();
    let kills = player.move_lasers(velocity, height, &mut enemies);
    if kills > 0 {
        log::debug!("{kills} enemy(s) destroyed, {} left", enemies.len());
    }
    GameState { player, enemies, ..state.clone() }
}

// ── Per-frame tick (nearly pure: RNG is injected) ───────────────────────────

/// Advance the session by one frame.
pub fn tick(state: &GameState, input: &InputState, rng: &mut impl Rng) -> GameState {
    let state = update_loss(&GameState { frame: state.frame + 1, ..state.clone() });
    if state.status != GameStatus::Playing {
        return state;
    }

    let state = spawn_wave(&state, rng);

    if input.quit {
        log::info!("quit at level {}", state.level);
        return GameState { status: GameStatus::Ended, ..state };
    }

    let state = apply_input(&state, input);
    let state = update_enemies(&state, rng);
    update_player_lasers(&state)
}
