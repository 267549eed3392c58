/// In-memory framebuffer the scene is composited into before presentation.
///
/// Pixels are opaque RGB.  Text is not rasterised; labels are kept as
/// overlays with a pixel extent and printed by the presenter as terminal
/// glyphs.

use image::RgbaImage;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const WHITE: Rgb = [255, 255, 255];

// ── Text ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Font {
    family: String,
    size: u16,
}

impl Font {
    pub fn new(family: &str, size: u16) -> Self {
        Self { family: family.to_string(), size }
    }

    /// Horizontal advance of one glyph in pixels.
    pub fn advance(&self) -> i32 {
        i32::from(self.size / 2).max(1)
    }

    pub fn render(&self, text: &str, colour: Rgb) -> Label {
        Label {
            text: text.to_string(),
            colour,
            width: self.advance() * text.chars().count() as i32,
            height: i32::from(self.size),
        }
    }
}

/// Rendered text ready to be placed on a canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub colour: Rgb,
    pub width: i32,
    pub height: i32,
}

/// A label pinned to a canvas position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedLabel {
    pub label: Label,
    pub x: i32,
    pub y: i32,
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Rgb>,
    labels: Vec<PlacedLabel>,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![BLACK; (width * height) as usize],
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    pub fn labels(&self) -> &[PlacedLabel] {
        &self.labels
    }

    /// Fill with `colour` and drop every label.
    pub fn clear(&mut self, colour: Rgb) {
        self.pixels.fill(colour);
        self.labels.clear();
    }

    /// Alpha-composite `image` with its top-left corner at (`x`, `y`).
    /// Parts outside the canvas are clipped.
    pub fn blit(&mut self, image: &RgbaImage, x: i32, y: i32) {
        let (w, h) = (image.width() as i32, image.height() as i32);
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                let [r, g, b, a] = image.get_pixel((px - x) as u32, (py - y) as u32).0;
                if a == 0 {
                    continue;
                }
                let dst = &mut self.pixels[(py * self.width + px) as usize];
                *dst = if a == 255 { [r, g, b] } else { blend(*dst, [r, g, b], a) };
            }
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, colour: Rgb) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width).min(self.width);
        let y1 = (y + height).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for py in y0..y1 {
            let row = (py * self.width) as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(colour);
        }
    }

    pub fn draw_label(&mut self, label: &Label, x: i32, y: i32) {
        self.labels.push(PlacedLabel { label: label.clone(), x, y });
    }
}

fn blend(dst: Rgb, src: Rgb, alpha: u8) -> Rgb {
    let a = u16::from(alpha);
    let mix = |d: u8, s: u8| ((u16::from(s) * a + u16::from(d) * (255 - a)) / 255) as u8;
    [mix(dst[0], src[0]), mix(dst[1], src[1]), mix(dst[2], src[2])]
}
