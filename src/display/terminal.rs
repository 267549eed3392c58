/// Terminal presentation of a `Canvas`.
///
/// Each terminal cell shows two stacked pixel blocks with the upper-half
/// block glyph: foreground = upper block, background = lower block.  A block
/// is represented by its brightest pixel so one-pixel-wide lasers survive the
/// downsampling.  Labels are printed on top as plain text.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use super::canvas::{Canvas, Rgb, BLACK};

const HALF_BLOCK: char = '▀';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    const BLANK: Cell = Cell { glyph: ' ', fg: BLACK, bg: BLACK };
}

/// A grid of terminal cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellFrame {
    pub cols: u16,
    pub rows: u16,
    cells: Vec<Cell>,
}

impl CellFrame {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows, cells: vec![Cell::BLANK; cols as usize * rows as usize] }
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    fn set(&mut self, col: u16, row: u16, cell: Cell) {
        if col < self.cols && row < self.rows {
            self.cells[row as usize * self.cols as usize + col as usize] = cell;
        }
    }
}

// ── Downsampling ──────────────────────────────────────────────────────────────

fn luminance(c: Rgb) -> u32 {
    // Integer Rec. 601 weights.
    299 * u32::from(c[0]) + 587 * u32::from(c[1]) + 114 * u32::from(c[2])
}

/// Pixel span `[start, end)` covered by slot `index` of `slots` along `len`.
fn span(index: u32, slots: u32, len: i32) -> (i32, i32) {
    let len = len.max(0) as u32;
    let start = index * len / slots;
    let end = ((index + 1) * len / slots).max(start + 1);
    (start as i32, end as i32)
}

fn brightest(canvas: &Canvas, xs: (i32, i32), ys: (i32, i32)) -> Rgb {
    let mut best = BLACK;
    let mut best_lum = 0;
    for y in ys.0..ys.1 {
        for x in xs.0..xs.1 {
            if let Some(c) = canvas.pixel(x, y) {
                let lum = luminance(c);
                if lum > best_lum {
                    best = c;
                    best_lum = lum;
                }
            }
        }
    }
    best
}

/// Downsample `canvas` into a `cols`×`rows` grid and overlay its labels.
pub fn rasterize(canvas: &Canvas, cols: u16, rows: u16) -> CellFrame {
    let mut frame = CellFrame::new(cols, rows);
    if cols == 0 || rows == 0 {
        return frame;
    }
    let half_rows = u32::from(rows) * 2;

    for row in 0..rows {
        let top = span(u32::from(row) * 2, half_rows, canvas.height());
        let bottom = span(u32::from(row) * 2 + 1, half_rows, canvas.height());
        for col in 0..cols {
            let xs = span(u32::from(col), u32::from(cols), canvas.width());
            frame.set(
                col,
                row,
                Cell {
                    glyph: HALF_BLOCK,
                    fg: brightest(canvas, xs, top),
                    bg: brightest(canvas, xs, bottom),
                },
            );
        }
    }

    for placed in canvas.labels() {
        let to_col = |x: i32| (x.max(0) as i64 * i64::from(cols) / i64::from(canvas.width().max(1))) as i32;
        let to_row = |y: i32| (y.max(0) as i64 * i64::from(rows) / i64::from(canvas.height().max(1))) as i32;

        // Centre the text in the cell span the label's pixel extent covers.
        let first = to_col(placed.x);
        let last = to_col(placed.x + placed.label.width);
        let len = placed.label.text.chars().count() as i32;
        let start = (first + (last - first - len) / 2).clamp(0, (i32::from(cols) - len).max(0));
        let row = to_row(placed.y + placed.label.height / 2).min(i32::from(rows) - 1);

        for (i, ch) in placed.label.text.chars().enumerate() {
            let col = start + i as i32;
            if col >= i32::from(cols) {
                break;
            }
            let bg = frame.get(col as u16, row as u16).map_or(BLACK, |c| c.bg);
            frame.set(col as u16, row as u16, Cell { glyph: ch, fg: placed.label.colour, bg });
        }
    }

    frame
}

// ── Presenter ─────────────────────────────────────────────────────────────────

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c[0], g: c[1], b: c[2] }
}

/// Writes frames to the terminal, only touching cells that changed since the
/// previous frame.
#[derive(Default)]
pub struct TerminalPresenter {
    last: Option<CellFrame>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame so the next present redraws everything.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn present<W: Write>(&mut self, out: &mut W, canvas: &Canvas, cols: u16, rows: u16) -> std::io::Result<()> {
        let frame = rasterize(canvas, cols, rows);

        let previous = match self.last.take() {
            Some(last) if last.cols == cols && last.rows == rows => Some(last),
            _ => {
                out.queue(terminal::Clear(terminal::ClearType::All))?;
                None
            }
        };

        let mut last_colours: Option<(Rgb, Rgb)> = None;
        for row in 0..rows {
            let mut cursor_at: Option<u16> = None;
            for col in 0..cols {
                let Some(&cell) = frame.get(col, row) else { continue };
                if previous.as_ref().and_then(|p| p.get(col, row)) == Some(&cell) {
                    continue;
                }
                if cursor_at != Some(col) {
                    out.queue(cursor::MoveTo(col, row))?;
                }
                if last_colours != Some((cell.fg, cell.bg)) {
                    out.queue(style::SetForegroundColor(rgb(cell.fg)))?;
                    out.queue(style::SetBackgroundColor(rgb(cell.bg)))?;
                    last_colours = Some((cell.fg, cell.bg));
                }
                out.queue(Print(cell.glyph))?;
                cursor_at = Some(col + 1);
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()?;
        self.last = Some(frame);
        Ok(())
    }
}
