//! Full-snapshot undo history.
//!
//! Every mutating operation pushes the focus, the selection extent, and
//! the entire pixel buffer before changing anything, in that order. The
//! stride of one snapshot is therefore always
//! `4 + cell_width * cell_height`, which is what locates the most
//! recent snapshot when popping.

use softfont_engine::{Position, Size};

use super::GlyphEditState;

impl GlyphEditState {
    pub fn can_undo(&self) -> bool {
        self.history.len() >= self.snapshot_stride()
    }

    /// Restores the most recent snapshot: focus, selection, and every
    /// pixel, repainting only what differs from the current display.
    pub fn undo(&mut self) {
        if !self.can_undo() {
            return;
        }
        let stride = self.snapshot_stride();
        let mut offset = self.history.len() - stride;
        let focus = Position::new(i32::from(self.history[offset + 1]), i32::from(self.history[offset]));
        let selection = Size::new(i32::from(self.history[offset + 3]), i32::from(self.history[offset + 2]));
        self.select_range(focus, selection);
        let focused = self.focus_rect();
        offset += 4;
        for y in 0..self.cell_height() {
            for x in 0..self.cell_width() {
                let restored = self.history[offset] as u8;
                offset += 1;
                let pos = Position::new(x, y);
                if self.pixel(pos) != restored {
                    self.set_pixel(pos, restored);
                    self.queue.push_pixel(pos, restored != 0, focused.contains(pos));
                }
            }
        }
        self.history.truncate(self.history.len() - stride);
        self.history.shrink_to_fit();
    }

    pub(crate) fn save_snapshot(&mut self) {
        self.dirty = true;
        self.history.push(self.focus.y as i8);
        self.history.push(self.focus.x as i8);
        self.history.push(self.selection.height as i8);
        self.history.push(self.selection.width as i8);
        self.history.extend(self.pixels.iter().map(|&pixel| pixel as i8));
    }

    pub(crate) fn clear_history(&mut self) {
        self.dirty = false;
        self.history = Vec::new();
    }

    fn snapshot_stride(&self) -> usize {
        (4 + self.cell_width() * self.cell_height()) as usize
    }
}
