//! Incremental redraw commands.
//!
//! Every editing operation reduces to "paint this horizontal run of
//! cells with this attribute". The queue never records a cell whose
//! displayed (set, focused) pair is unchanged, so draining it after an
//! operation gives the smallest update the drawing surface has to make.

use softfont_engine::{Position, Size};

/// Inclusive cell rectangle, normalized so `top <= bottom` and
/// `left <= right`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl CellRect {
    /// Builds a rectangle from a corner and a signed extent, swapping
    /// edges when the extent points up or left.
    pub fn from_anchor(origin: Position, extent: Size) -> Self {
        let (top, bottom) = minmax(origin.y, origin.y + extent.height);
        let (left, right) = minmax(origin.x, origin.x + extent.width);
        Self { top, left, bottom, right }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.top && pos.y <= self.bottom
    }

    pub fn origin(&self) -> Position {
        Position::new(self.left, self.top)
    }

    /// The (always non-negative) extent of the rectangle.
    pub fn extent(&self) -> Size {
        Size::new(self.right - self.left, self.bottom - self.top)
    }
}

fn minmax(a: i32, b: i32) -> (i32, i32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// The visual state of a cell. Empty unfocused cells carry the
/// checkerboard parity of the background grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelAttr {
    SetFocused,
    Set,
    EmptyFocused,
    Empty { alt_parity: bool },
}

/// One region update: `len` cells starting at `pos` on a single row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRun {
    pub pos: Position,
    pub len: i32,
    pub set: bool,
    pub focused: bool,
}

impl PixelRun {
    pub fn attr(&self) -> PixelAttr {
        match (self.set, self.focused) {
            (true, true) => PixelAttr::SetFocused,
            (true, false) => PixelAttr::Set,
            (false, true) => PixelAttr::EmptyFocused,
            (false, false) => PixelAttr::Empty {
                alt_parity: (self.pos.x + self.pos.y) % 2 != 0,
            },
        }
    }
}

/// Accumulates region updates; the owner drains it after each operation.
#[derive(Debug, Default)]
pub struct RenderQueue {
    runs: Vec<PixelRun>,
}

impl RenderQueue {
    pub fn push_pixel(&mut self, pos: Position, set: bool, focused: bool) {
        self.push_run(pos, 1, set, focused);
    }

    pub fn push_run(&mut self, pos: Position, len: i32, set: bool, focused: bool) {
        self.runs.push(PixelRun { pos, len, set, focused });
    }

    pub fn take(&mut self) -> Vec<PixelRun> {
        std::mem::take(&mut self.runs)
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Queues a repaint of the whole cell over a blank background:
    /// consecutive set cells sharing a focus status coalesce into one
    /// run, and unset cells are only painted where focused (the grid
    /// supplies the unfocused background).
    pub fn full_redraw(&mut self, pixels: &[u8], width: i32, height: i32, focused: &CellRect) {
        for y in 0..height {
            let mut x = 0;
            while x < width {
                let pos = Position::new(x, y);
                let inside = focused.contains(pos);
                if pixels[(y * width + x) as usize] != 0 {
                    let mut x2 = x + 1;
                    while x2 < width
                        && pixels[(y * width + x2) as usize] != 0
                        && focused.contains(Position::new(x2, y)) == inside
                    {
                        x2 += 1;
                    }
                    self.push_run(pos, x2 - x, true, inside);
                    x = x2;
                } else {
                    if inside {
                        self.push_pixel(pos, false, true);
                    }
                    x += 1;
                }
            }
        }
    }

    /// Queues updates for a focus rectangle change: exactly the cells
    /// whose "inside the focused rectangle" status flipped.
    pub fn focus_change(&mut self, pixels: &[u8], width: i32, height: i32, old: &CellRect, new: &CellRect) {
        for y in 0..height {
            let y_inside_old = y >= old.top && y <= old.bottom;
            let y_inside_new = y >= new.top && y <= new.bottom;
            for x in 0..width {
                let inside_old = y_inside_old && x >= old.left && x <= old.right;
                let inside_new = y_inside_new && x >= new.left && x <= new.right;
                if inside_old != inside_new {
                    let pos = Position::new(x, y);
                    self.push_pixel(pos, pixels[(y * width + x) as usize] != 0, inside_new);
                }
            }
        }
    }
}
