use softfont_engine::Position;

use super::GlyphEditState;

impl GlyphEditState {
    /// Flips the pixel under the focus.
    pub fn toggle_pixel(&mut self) {
        self.save_snapshot();
        let pos = self.focus;
        let value = self.pixel(pos) ^ 1;
        self.set_pixel(pos, value);
        self.queue.push_pixel(pos, value != 0, true);
    }

    /// Sets every cell of the selection (or the whole glyph) to
    /// `value`, repainting only the cells that actually changed.
    pub fn fill_selection(&mut self, value: u8) {
        self.save_snapshot();
        let focused = self.focus_rect();
        let target = self.target_rect();
        for y in target.top..=target.bottom {
            for x in target.left..=target.right {
                let pos = Position::new(x, y);
                if self.pixel(pos) != value {
                    self.set_pixel(pos, value);
                    self.queue.push_pixel(pos, value != 0, focused.contains(pos));
                }
            }
        }
    }

    pub fn delete_selection(&mut self) {
        self.fill_selection(0);
    }

    /// Inverts every cell of the selection (or the whole glyph).
    pub fn invert(&mut self) {
        self.save_snapshot();
        let focused = self.focus_rect();
        let target = self.target_rect();
        for y in target.top..=target.bottom {
            for x in target.left..=target.right {
                let pos = Position::new(x, y);
                let value = self.pixel(pos) ^ 1;
                self.set_pixel(pos, value);
                self.queue.push_pixel(pos, value != 0, focused.contains(pos));
            }
        }
    }

    /// Mirrors the selection (or the whole glyph) left to right. The
    /// center column of an odd-width range stays put.
    pub fn flip_horizontal(&mut self) {
        self.save_snapshot();
        let focused = self.focus_rect();
        let target = self.target_rect();
        let origin = target.origin();
        let extent = target.extent();
        for y in 0..=extent.height {
            for x in 0..(extent.width + 1) / 2 {
                let pos1 = Position::new(origin.x + x, origin.y + y);
                let pos2 = Position::new(origin.x + extent.width - x, origin.y + y);
                let pixel1 = self.pixel(pos1);
                let pixel2 = self.pixel(pos2);
                if pixel1 != pixel2 {
                    self.set_pixel(pos1, pixel2);
                    self.set_pixel(pos2, pixel1);
                    self.queue.push_pixel(pos1, pixel2 != 0, focused.contains(pos1));
                    self.queue.push_pixel(pos2, pixel1 != 0, focused.contains(pos2));
                }
            }
        }
    }

    /// Mirrors the selection (or the whole glyph) top to bottom.
    pub fn flip_vertical(&mut self) {
        self.save_snapshot();
        let focused = self.focus_rect();
        let target = self.target_rect();
        let origin = target.origin();
        let extent = target.extent();
        for y in 0..(extent.height + 1) / 2 {
            for x in 0..=extent.width {
                let pos1 = Position::new(origin.x + x, origin.y + y);
                let pos2 = Position::new(origin.x + x, origin.y + extent.height - y);
                let pixel1 = self.pixel(pos1);
                let pixel2 = self.pixel(pos2);
                if pixel1 != pixel2 {
                    self.set_pixel(pos1, pixel2);
                    self.set_pixel(pos2, pixel1);
                    self.queue.push_pixel(pos1, pixel2 != 0, focused.contains(pos1));
                    self.queue.push_pixel(pos2, pixel1 != 0, focused.contains(pos2));
                }
            }
        }
    }
}
