/// Rendering layer.
///
/// `render` composites one frame of the game state into a `Canvas`; the
/// `terminal` presenter then puts the canvas on screen.  No game logic is
/// performed here.

pub mod canvas;
pub mod terminal;

use std::rc::Rc;

pub use canvas::{Canvas, Font, Label, PlacedLabel, Rgb, BLACK, WHITE};
pub use terminal::{rasterize, CellFrame, TerminalPresenter};

use crate::assets::{AssetStore, Sprite, BACKGROUND};
use crate::compute::{GameState, GameStatus};
use crate::error::Result;

const FONT_FAMILY: &str = "None";
const HUD_FONT_SIZE: u16 = 35;
const LOST_FONT_SIZE: u16 = 60;
const HUD_MARGIN: i32 = 10;
const C_HUD: Rgb = WHITE;
const C_LOST: Rgb = WHITE;

/// Everything drawn that is not an entity: background and fonts.
pub struct Scene {
    background: Rc<Sprite>,
    main_font: Font,
    lost_font: Font,
}

impl Scene {
    pub fn new(background: Rc<Sprite>, main_font: Font, lost_font: Font) -> Self {
        Self { background, main_font, lost_font }
    }

    /// Background stretched to the playfield plus the standard fonts.
    pub fn load(store: &mut AssetStore, width: i32, height: i32) -> Result<Self> {
        let background = store.scaled(BACKGROUND, width.max(1) as u32, height.max(1) as u32)?;
        Ok(Self::new(
            background,
            store.font(FONT_FAMILY, HUD_FONT_SIZE),
            store.font(FONT_FAMILY, LOST_FONT_SIZE),
        ))
    }
}

/// Draw one complete frame: background, lives/level labels, the wave, the
/// player with its health bar, and the loss overlay when lost.
pub fn render(canvas: &mut Canvas, state: &GameState, scene: &Scene) {
    canvas.clear(BLACK);
    canvas.blit(scene.background.image(), 0, 0);

    let lives = scene.main_font.render(&format!("Lives: {}", state.lives), C_HUD);
    let level = scene.main_font.render(&format!("Level: {}", state.level), C_HUD);
    canvas.draw_label(&lives, HUD_MARGIN, HUD_MARGIN);
    canvas.draw_label(&level, canvas.width() - level.width - HUD_MARGIN, HUD_MARGIN);

    for enemy in &state.enemies {
        enemy.draw(canvas);
    }
    state.player.draw(canvas);

    if state.status != GameStatus::Playing {
        let lost = scene.lost_font.render("You Lost!!", C_LOST);
        canvas.draw_label(
            &lost,
            canvas.width() / 2 - lost.width / 2,
            canvas.height() / 2 - 10,
        );
    }
}
