use log::debug;
use softfont_engine::{EngineResult, Position, Size, SoftFont};
use std::path::Path;

use crate::render::{CellRect, PixelRun, RenderQueue};

/// The editing model for one soft font.
///
/// Owns the document and at most one checked-out glyph. The checked-out
/// pixel buffer is the working copy; it is written back into the
/// document on [`flush`](Self::flush) or when navigating to another
/// glyph. Switching glyphs clears the undo history.
pub struct GlyphEditState {
    pub(crate) font: SoftFont,
    pub(crate) pixels: Vec<u8>,
    pub(crate) focus: Position,
    pub(crate) selection: Size,
    pub(crate) clipboard: Vec<u8>,
    pub(crate) clipboard_size: Size,
    pub(crate) history: Vec<i8>,
    pub(crate) glyph_index: Option<i32>,
    pub(crate) dirty: bool,
    pub(crate) queue: RenderQueue,
}

impl Default for GlyphEditState {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphEditState {
    pub fn new() -> Self {
        Self::from_font(SoftFont::new())
    }

    /// Starts an editing session on `font`, checking out the glyph at
    /// the font's first character index.
    pub fn from_font(font: SoftFont) -> Self {
        let first = font.first_index();
        let mut state = Self {
            font,
            pixels: Vec::new(),
            focus: Position::default(),
            selection: Size::default(),
            clipboard: Vec::new(),
            clipboard_size: Size::default(),
            history: Vec::new(),
            glyph_index: None,
            dirty: false,
            queue: RenderQueue::default(),
        };
        state.load_char(first, 0, false);
        state
    }

    pub fn font(&self) -> &SoftFont {
        &self.font
    }

    /// Ends the session, checking the active glyph back in.
    pub fn into_font(mut self) -> SoftFont {
        self.flush();
        self.font
    }

    pub fn cell_width(&self) -> i32 {
        self.font.cell_width()
    }

    pub fn cell_height(&self) -> i32 {
        self.font.cell_height()
    }

    pub fn focus(&self) -> Position {
        self.focus
    }

    /// Signed selection extent relative to the focus; `(0, 0)` means no
    /// selection.
    pub fn selection(&self) -> Size {
        self.selection
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn active_glyph(&self) -> Option<i32> {
        self.glyph_index
    }

    /// True while the checked-out buffer has changes the document
    /// hasn't seen.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drains the region updates recorded since the last drain.
    pub fn take_runs(&mut self) -> Vec<PixelRun> {
        self.queue.take()
    }

    /// Checks the active glyph's pixels back into the document.
    pub fn flush(&mut self) {
        if let Some(index) = self.glyph_index {
            if self.dirty {
                self.font.set_pixels(index, &self.pixels);
                self.dirty = false;
                debug!("flushed glyph {index} into the document");
            }
        }
    }

    /// Flushes and writes the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be written.
    pub fn save(&mut self, path: &Path) -> EngineResult<()> {
        self.flush();
        self.font.save(path)
    }

    /// Checks out the glyph at `index` (clamped to the charset range).
    pub fn load_glyph(&mut self, index: i32) {
        self.load_char(index, 0, false);
    }

    /// Advances to the next glyph, skipping unused ones when
    /// `only_used` is set, but always stopping at the last index.
    pub fn next_glyph(&mut self, only_used: bool) {
        self.load_char(self.glyph_index.unwrap_or(-1), 1, only_used);
    }

    /// The counterpart of [`next_glyph`](Self::next_glyph).
    pub fn prev_glyph(&mut self, only_used: bool) {
        self.load_char(self.glyph_index.unwrap_or(100), -1, only_used);
    }

    pub fn first_glyph(&mut self) {
        self.load_char(0, 0, false);
    }

    pub fn last_glyph(&mut self) {
        self.load_char(100, 0, false);
    }

    pub(crate) fn load_char(&mut self, start_index: i32, increment: i32, only_used: bool) {
        let min_index = i32::from(self.font.charset_size() != 96);
        let max_index = if self.font.charset_size() == 96 { 95 } else { 94 };
        let mut index = start_index;
        loop {
            index = (index + increment).clamp(min_index, max_index);
            if index == min_index || index == max_index {
                break;
            }
            if !only_used || self.font.glyph_is_used(index) {
                break;
            }
        }
        if self.glyph_index != Some(index) {
            self.flush();
            self.clear_history();
            self.pixels = self.font.get_pixels(index);
            self.glyph_index = Some(index);
            self.focus = Position::default();
            self.selection = Size::default();
            let focused = self.focus_rect();
            let (width, height) = (self.cell_width(), self.cell_height());
            self.queue.full_redraw(&self.pixels, width, height, &focused);
            debug!("editing glyph {index}");
        }
    }

    /// The rectangle that currently reads as focused: the selection, or
    /// the focus cell alone.
    pub(crate) fn focus_rect(&self) -> CellRect {
        CellRect::from_anchor(self.focus, self.selection)
    }

    /// The rectangle operations act on: the selection, or the whole
    /// cell when nothing is selected.
    pub(crate) fn target_rect(&self) -> CellRect {
        if self.selection == Size::default() {
            CellRect::from_anchor(Position::default(), Size::new(self.cell_width() - 1, self.cell_height() - 1))
        } else {
            self.focus_rect()
        }
    }

    pub(crate) fn pixel(&self, pos: Position) -> u8 {
        self.pixels[(pos.y * self.cell_width() + pos.x) as usize]
    }

    pub(crate) fn set_pixel(&mut self, pos: Position, value: u8) {
        let index = (pos.y * self.cell_width() + pos.x) as usize;
        self.pixels[index] = value;
    }
}
