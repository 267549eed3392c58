/// Game entities: ships and the lasers they own.
///
/// `Ship` carries everything player and enemy craft share (position, health,
/// art, owned lasers, fire gate).  `Player` and `Enemy` wrap a `Ship` and add
/// what is specific to them: the health bar and enemy-directed lasers on one
/// side, colour and descent on the other.

use std::rc::Rc;

use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::assets::{ShipArt, Sprite, Sprites};
use crate::collision::{collide, Collidable, Mask};
use crate::display::{Canvas, Rgb};

/// Enemies die to a single laser; their health is never read.
pub const ENEMY_HEALTH: i32 = 100;

const HEALTH_BAR_GAP: i32 = 10;
const HEALTH_BAR_HEIGHT: i32 = 10;
const HEALTH_BAR_EMPTY: Rgb = [255, 0, 0];
const HEALTH_BAR_FULL: Rgb = [0, 255, 0];

// ── Enemy colours ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyColour {
    Red,
    Green,
    Blue,
}

impl EnemyColour {
    pub const ALL: [EnemyColour; 3] = [EnemyColour::Red, EnemyColour::Green, EnemyColour::Blue];

    /// Logical asset names of the hull and laser for this colour.
    pub fn asset_names(self) -> (&'static str, &'static str) {
        match self {
            EnemyColour::Red => ("red_ship_small", "laser_red"),
            EnemyColour::Green => ("green_ship_small", "laser_green"),
            EnemyColour::Blue => ("blue_ship_small", "laser_blue"),
        }
    }
}

/// Uniform over the three colours.
impl Distribution<EnemyColour> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> EnemyColour {
        EnemyColour::ALL[rng.gen_range(0..EnemyColour::ALL.len())]
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Laser {
    pub x: i32,
    pub y: i32,
    sprite: Rc<Sprite>,
}

impl Laser {
    pub fn new(x: i32, y: i32, sprite: Rc<Sprite>) -> Self {
        Self { x, y, sprite }
    }

    pub fn move_by(&mut self, velocity: i32) {
        self.y += velocity;
    }

    /// Outside the vertical band `[0, height]`.
    pub fn off_screen(&self, height: i32) -> bool {
        !(0..=height).contains(&self.y)
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.blit(self.sprite.image(), self.x, self.y);
    }
}

impl Collidable for Laser {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        self.sprite.mask()
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Fire gate and muzzle placement of a ship's gun.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gun {
    /// Frames a ship waits after firing before it may fire again.
    pub cooldown: u32,
    /// Lasers spawn this far left of the firing ship so the beam is centred.
    pub offset_x: i32,
}

#[derive(Clone, Debug)]
pub struct Ship {
    pub x: i32,
    pub y: i32,
    /// May dip below zero for a frame before the loss check sees it.
    pub health: i32,
    pub lasers: Vec<Laser>,
    art: ShipArt,
    /// 0 = ready to fire; otherwise frames since the last shot, starting at 1.
    cool_down_counter: u32,
    gun: Gun,
}

impl Ship {
    pub fn new(x: i32, y: i32, health: i32, art: ShipArt, gun: Gun) -> Self {
        Self { x, y, health, lasers: Vec::new(), art, cool_down_counter: 0, gun }
    }

    pub fn width(&self) -> i32 {
        self.art.ship.width()
    }

    pub fn height(&self) -> i32 {
        self.art.ship.height()
    }

    pub fn cool_down_counter(&self) -> u32 {
        self.cool_down_counter
    }

    pub fn can_shoot(&self) -> bool {
        self.cool_down_counter == 0
    }

    /// Fire one laser if the gate is open.  Returns whether a laser spawned.
    pub fn shoot(&mut self) -> bool {
        if !self.can_shoot() {
            return false;
        }
        let laser = Laser::new(self.x - self.gun.offset_x, self.y, Rc::clone(&self.art.laser));
        self.lasers.push(laser);
        self.cool_down_counter = 1;
        true
    }

    /// Advance the fire gate by one frame.  Re-arms once the counter reaches
    /// the cooldown length.
    pub fn cooldown(&mut self) {
        if self.cool_down_counter >= self.gun.cooldown {
            self.cool_down_counter = 0;
        } else if self.cool_down_counter > 0 {
            self.cool_down_counter += 1;
        }
    }

    /// Tick the fire gate, move every laser, and resolve them against a
    /// single target ship.  Each hit removes the laser and deals `damage`.
    /// Returns the number of hits.
    pub fn move_lasers(&mut self, velocity: i32, height: i32, target: &mut Ship, damage: i32) -> u32 {
        self.cooldown();
        let mut hits = 0;
        self.lasers.retain_mut(|laser| {
            laser.move_by(velocity);
            if laser.off_screen(height) {
                return false;
            }
            if collide(&*laser, &*target) {
                target.health -= damage;
                hits += 1;
                return false;
            }
            true
        });
        hits
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.blit(self.art.ship.image(), self.x, self.y);
        for laser in &self.lasers {
            laser.draw(canvas);
        }
    }
}

impl Collidable for Ship {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn mask(&self) -> &Mask {
        self.art.ship.mask()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Geometry of the bar drawn under the player.  `filled` is the green part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub filled: f32,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub ship: Ship,
    pub max_health: i32,
}

impl Player {
    pub fn new(x: i32, y: i32, health: i32, art: ShipArt, gun: Gun) -> Self {
        Self { ship: Ship::new(x, y, health, art, gun), max_health: health }
    }

    /// Tick the fire gate, move the player's lasers and resolve them against
    /// the wave.  A laser destroys the first enemy it overlaps and is spent.
    /// Returns the number of enemies destroyed.
    pub fn move_lasers(&mut self, velocity: i32, height: i32, enemies: &mut Vec<Enemy>) -> u32 {
        self.ship.cooldown();
        let mut kills = 0;
        self.ship.lasers.retain_mut(|laser| {
            laser.move_by(velocity);
            if laser.off_screen(height) {
                return false;
            }
            match enemies.iter().position(|enemy| collide(&*laser, enemy)) {
                Some(hit) => {
                    enemies.remove(hit);
                    kills += 1;
                    false
                }
                None => true,
            }
        });
        kills
    }

    pub fn health_bar(&self) -> HealthBar {
        let ratio = self.ship.health.max(0) as f32 / self.max_health as f32;
        let width = self.ship.width();
        HealthBar {
            x: self.ship.x,
            y: self.ship.y + self.ship.height() + HEALTH_BAR_GAP,
            width,
            height: HEALTH_BAR_HEIGHT,
            filled: width as f32 * ratio,
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        self.ship.draw(canvas);
        let bar = self.health_bar();
        canvas.fill_rect(bar.x, bar.y, bar.width, bar.height, HEALTH_BAR_EMPTY);
        canvas.fill_rect(bar.x, bar.y, bar.filled as i32, bar.height, HEALTH_BAR_FULL);
    }
}

impl Collidable for Player {
    fn position(&self) -> (i32, i32) {
        self.ship.position()
    }

    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub ship: Ship,
    pub colour: EnemyColour,
}

impl Enemy {
    pub fn new(x: i32, y: i32, colour: EnemyColour, sprites: &Sprites, gun: Gun) -> Self {
        let art = sprites.enemy(colour).clone();
        Self { ship: Ship::new(x, y, ENEMY_HEALTH, art, gun), colour }
    }

    /// Descend by `velocity` pixels.
    pub fn move_by(&mut self, velocity: i32) {
        self.ship.y += velocity;
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        self.ship.draw(canvas);
    }
}

impl Collidable for Enemy {
    fn position(&self) -> (i32, i32) {
        self.ship.position()
    }

    fn mask(&self) -> &Mask {
        self.ship.mask()
    }
}
