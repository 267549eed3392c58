/// Asset store.  Decodes the PNG sprites once at startup and hands out shared
/// handles.  Missing or corrupt files are fatal; there is no fallback art.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::collision::Mask;
use crate::display::Font;
use crate::entities::EnemyColour;
use crate::error::{GameError, Result};

// ── Logical asset names ───────────────────────────────────────────────────────

pub const BACKGROUND: &str = "background-black";
pub const PLAYER_SHIP: &str = "yellow_ship";
pub const PLAYER_LASER: &str = "laser_yellow";

// ── Sprite ────────────────────────────────────────────────────────────────────

/// A decoded bitmap plus its lazily derived opacity mask.  Sprites never
/// change after construction, so the mask never needs recomputing.
#[derive(Debug)]
pub struct Sprite {
    image: RgbaImage,
    mask: OnceCell<Mask>,
}

impl Sprite {
    pub fn new(image: RgbaImage) -> Self {
        Self { image, mask: OnceCell::new() }
    }

    /// A solid rectangle of one colour.
    pub fn filled(width: u32, height: u32, colour: [u8; 3]) -> Self {
        let [r, g, b] = colour;
        Self::new(RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> i32 {
        self.image.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.image.height() as i32
    }

    pub fn mask(&self) -> &Mask {
        self.mask.get_or_init(|| Mask::from_image(&self.image))
    }
}

// ── Ship art ──────────────────────────────────────────────────────────────────

/// The hull and projectile sprites a ship is built from.
#[derive(Clone, Debug)]
pub struct ShipArt {
    pub ship: Rc<Sprite>,
    pub laser: Rc<Sprite>,
}

/// Every sprite the simulation needs, resolved up front.
#[derive(Clone, Debug)]
pub struct Sprites {
    pub player: ShipArt,
    pub red: ShipArt,
    pub green: ShipArt,
    pub blue: ShipArt,
}

impl Sprites {
    pub fn enemy(&self, colour: EnemyColour) -> &ShipArt {
        match colour {
            EnemyColour::Red => &self.red,
            EnemyColour::Green => &self.green,
            EnemyColour::Blue => &self.blue,
        }
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

pub struct AssetStore {
    root: PathBuf,
    cache: HashMap<String, Rc<Sprite>>,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), cache: HashMap::new() }
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.png"))
    }

    /// Load `<root>/<name>.png`, caching by logical name.
    pub fn sprite(&mut self, name: &str) -> Result<Rc<Sprite>> {
        if let Some(sprite) = self.cache.get(name) {
            return Ok(Rc::clone(sprite));
        }
        let image = self.decode(name)?;
        let sprite = Rc::new(Sprite::new(image));
        self.cache.insert(name.to_string(), Rc::clone(&sprite));
        Ok(sprite)
    }

    /// Load `name` stretched to `width`×`height`.  Cached separately from the
    /// unscaled sprite.
    pub fn scaled(&mut self, name: &str, width: u32, height: u32) -> Result<Rc<Sprite>> {
        let key = format!("{name}@{width}x{height}");
        if let Some(sprite) = self.cache.get(&key) {
            return Ok(Rc::clone(sprite));
        }
        let image = self.decode(name)?;
        let resized = imageops::resize(&image, width, height, FilterType::Nearest);
        let sprite = Rc::new(Sprite::new(resized));
        self.cache.insert(key, Rc::clone(&sprite));
        Ok(sprite)
    }

    pub fn font(&self, family: &str, size: u16) -> Font {
        Font::new(family, size)
    }

    pub fn ship_art(&mut self, ship: &str, laser: &str) -> Result<ShipArt> {
        Ok(ShipArt { ship: self.sprite(ship)?, laser: self.sprite(laser)? })
    }

    /// Resolve the fixed sprite set used by the game.
    pub fn load_sprites(&mut self) -> Result<Sprites> {
        let mut enemy = |colour: EnemyColour| {
            let (ship, laser) = colour.asset_names();
            self.ship_art(ship, laser)
        };
        let red = enemy(EnemyColour::Red)?;
        let green = enemy(EnemyColour::Green)?;
        let blue = enemy(EnemyColour::Blue)?;
        let player = self.ship_art(PLAYER_SHIP, PLAYER_LASER)?;
        Ok(Sprites { player, red, green, blue })
    }

    fn decode(&self, name: &str) -> Result<RgbaImage> {
        let path = self.path_of(name);
        log::debug!("loading asset `{name}` from {}", path.display());
        let image = image::open(&path).map_err(|source| GameError::Asset {
            name: name.to_string(),
            path: path.clone(),
            source,
        })?;
        Ok(image.to_rgba8())
    }
}
