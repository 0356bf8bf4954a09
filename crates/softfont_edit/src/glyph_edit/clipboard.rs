use softfont_engine::Position;

use super::GlyphEditState;

impl GlyphEditState {
    /// Captures the selection (or the whole glyph) into the clipboard
    /// and pins the selection to exactly the copied rectangle.
    pub fn copy(&mut self) {
        self.clipboard.clear();
        let target = self.target_rect();
        for y in target.top..=target.bottom {
            for x in target.left..=target.right {
                let pixel = self.pixel(Position::new(x, y));
                self.clipboard.push(pixel);
            }
        }
        self.clipboard_size = target.extent();
        self.select_range(target.origin(), target.extent());
    }

    pub fn cut(&mut self) {
        self.copy();
        self.fill_selection(0);
    }

    pub fn can_paste(&self) -> bool {
        !self.clipboard.is_empty()
    }

    /// Merges the clipboard bits in at the selection origin, clipped to
    /// the cell, then selects the pasted extent. Only set bits are
    /// written, so the paste is transparent over existing pixels.
    pub fn paste(&mut self) {
        if !self.can_paste() {
            return;
        }
        self.save_snapshot();
        let focused = self.focus_rect();
        let origin = focused.origin();
        let mut i = 0;
        for y in origin.y..=origin.y + self.clipboard_size.height {
            for x in origin.x..=origin.x + self.clipboard_size.width {
                let is_point = self.clipboard[i] != 0;
                i += 1;
                if is_point && y < self.cell_height() && x < self.cell_width() {
                    let pos = Position::new(x, y);
                    self.set_pixel(pos, 1);
                    if focused.contains(pos) {
                        self.queue.push_pixel(pos, true, true);
                    }
                }
            }
        }
        self.select_range(origin, self.clipboard_size);
    }
}
