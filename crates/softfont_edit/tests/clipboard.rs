//! Copy, cut and paste.

use pretty_assertions::assert_eq;
use softfont_edit::GlyphEditState;
use softfont_engine::{Position, Size};

#[test]
fn paste_with_empty_clipboard_is_a_no_op() {
    let mut state = GlyphEditState::new();
    assert!(!state.can_paste());
    let before = state.pixels().to_vec();
    state.paste();
    assert_eq!(state.pixels(), before);
    assert!(!state.can_undo());
}

#[test]
fn copy_then_paste_in_place_reproduces_the_pattern() {
    let mut state = GlyphEditState::new();
    state.resize_selection(1, 1);
    state.fill_selection(1);
    let before = state.pixels().to_vec();

    state.copy();
    state.cut();
    assert!(state.pixels().iter().all(|&p| p == 0));

    state.paste();
    assert_eq!(state.pixels(), before);
    assert_eq!(state.selection(), Size::new(1, 1));
}

#[test]
fn copy_normalizes_the_selection_to_the_copied_rectangle() {
    let mut state = GlyphEditState::new();
    state.move_focus(3, 3);
    state.resize_selection(-2, -2);
    state.copy();
    assert_eq!(state.focus(), Position::new(1, 1));
    assert_eq!(state.selection(), Size::new(2, 2));
}

#[test]
fn paste_clips_to_the_cell_bounds() {
    let mut state = GlyphEditState::new();
    // A full 2x2 block on the clipboard.
    state.resize_selection(1, 1);
    state.fill_selection(1);
    state.copy();
    state.fill_selection(0);

    // Pasting at the bottom-right corner only lands one pixel.
    state.move_focus(15, 9);
    state.paste();
    let width = state.cell_width();
    let set: Vec<usize> = state.pixels().iter().enumerate().filter(|(_, &p)| p != 0).map(|(i, _)| i).collect();
    assert_eq!(set, [(15 * width + 9) as usize]);
}

#[test]
fn paste_is_transparent_over_existing_pixels() {
    let mut state = GlyphEditState::new();
    state.toggle_pixel();
    state.copy();
    // Clipboard now holds the whole glyph with one set pixel; pasting
    // over a glyph with another pixel set keeps both.
    state.move_focus(1, 0);
    state.toggle_pixel();
    state.move_focus(-1, 0);
    state.select_all();
    state.paste();
    let width = state.cell_width() as usize;
    assert_eq!(state.pixels()[0], 1);
    assert_eq!(state.pixels()[width], 1);
}

#[test]
fn cut_is_copy_plus_delete() {
    let mut state = GlyphEditState::new();
    state.resize_selection(2, 2);
    state.fill_selection(1);
    state.cut();
    assert!(state.can_paste());
    assert!(state.pixels().iter().all(|&p| p == 0));
    assert!(state.can_undo());
}
