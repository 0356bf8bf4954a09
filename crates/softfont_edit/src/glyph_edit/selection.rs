use softfont_engine::{Position, Size};

use crate::render::CellRect;

use super::GlyphEditState;

impl GlyphEditState {
    /// Moves the focus by one step, dropping any selection.
    pub fn move_focus(&mut self, dy: i32, dx: i32) {
        self.select_range(Position::new(self.focus.x + dx, self.focus.y + dy), Size::default());
    }

    /// Grows or shrinks the selection extent, keeping the focus put.
    pub fn resize_selection(&mut self, dh: i32, dw: i32) {
        let extent = Size::new(self.selection.width + dw, self.selection.height + dh);
        self.select_range(self.focus, extent);
    }

    pub fn select_all(&mut self) {
        self.select_range(Position::default(), Size::new(self.cell_width() - 1, self.cell_height() - 1));
    }

    /// Applies a focus/selection change, clamped so the whole rectangle
    /// stays inside the cell, repainting only the cells whose focused
    /// status flipped.
    pub(crate) fn select_range(&mut self, origin: Position, extent: Size) {
        let width = self.cell_width();
        let height = self.cell_height();
        let new_y = origin.y.clamp(0, height - 1);
        let new_x = origin.x.clamp(0, width - 1);
        let new_h = extent.height.clamp(-new_y, height - new_y - 1);
        let new_w = extent.width.clamp(-new_x, width - new_x - 1);
        let focus = Position::new(new_x, new_y);
        let selection = Size::new(new_w, new_h);
        if self.focus != focus || self.selection != selection {
            let old = self.focus_rect();
            let new = CellRect::from_anchor(focus, selection);
            self.queue.focus_change(&self.pixels, width, height, &old, &new);
            self.focus = focus;
            self.selection = selection;
        }
    }
}
