/// Pixel-perfect collision between positioned sprites.
///
/// A `Mask` marks which pixels of a bitmap are opaque.  Two entities collide
/// when at least one opaque pixel of each lands on the same playfield pixel.

use image::RgbaImage;

/// Pixels with alpha above this are solid.
pub const ALPHA_THRESHOLD: u8 = 127;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let bits = image.pixels().map(|p| p.0[3] > ALPHA_THRESHOLD).collect();
        Self { width: width as i32, height: height as i32, bits }
    }

    /// A fully opaque rectangle.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            bits: vec![true; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// First point (in this mask's coordinates) where `other`, placed at
    /// `offset` relative to this mask's origin, shares a solid pixel.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (dx, dy) = offset;

        // Intersection of the two rectangles in this mask's space.
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (dx + other.width).min(self.width);
        let y1 = (dy + other.height).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return Some((x, y));
                }
            }
        }
        None
    }
}

/// Anything with a playfield position and an opacity mask.
pub trait Collidable {
    fn position(&self) -> (i32, i32);
    fn mask(&self) -> &Mask;
}

/// True iff the masks of `a` and `b` overlap at their current positions.
pub fn collide(a: &impl Collidable, b: &impl Collidable) -> bool {
    let (ax, ay) = a.position();
    let (bx, by) = b.position();
    a.mask().overlap(b.mask(), (bx - ax, by - ay)).is_some()
}
