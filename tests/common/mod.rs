#![allow(dead_code)]

use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use space_blaster::assets::{ShipArt, Sprite, Sprites};
use space_blaster::compute::{init_state, GameState};
use space_blaster::config::GameConfig;
use space_blaster::entities::Gun;

pub const PLAYER_W: i32 = 50;
pub const PLAYER_H: i32 = 40;
pub const ENEMY_W: i32 = 40;
pub const ENEMY_H: i32 = 30;
pub const LASER_W: i32 = 10;
pub const LASER_H: i32 = 20;

pub const YELLOW: [u8; 3] = [255, 255, 0];

fn art(w: i32, h: i32, colour: [u8; 3]) -> ShipArt {
    ShipArt {
        ship: Rc::new(Sprite::filled(w as u32, h as u32, colour)),
        laser: Rc::new(Sprite::filled(LASER_W as u32, LASER_H as u32, colour)),
    }
}

/// Solid rectangles: collisions are plain box overlaps.
pub fn sprites() -> Sprites {
    Sprites {
        player: art(PLAYER_W, PLAYER_H, YELLOW),
        red: art(ENEMY_W, ENEMY_H, [255, 0, 0]),
        green: art(ENEMY_W, ENEMY_H, [0, 255, 0]),
        blue: art(ENEMY_W, ENEMY_H, [0, 0, 255]),
    }
}

pub fn laser_sprite() -> Rc<Sprite> {
    Rc::new(Sprite::filled(LASER_W as u32, LASER_H as u32, YELLOW))
}

/// The default gun: 30-frame cooldown, lasers 17 px left of the hull.
pub fn gun() -> Gun {
    GameConfig::default().laser.gun()
}

/// Damage dealt per hit under the default config.
pub fn hit_damage() -> i32 {
    GameConfig::default().laser.damage
}

pub fn make_state() -> GameState {
    init_state(&GameConfig::default(), &sprites())
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}
