//! Snapshot undo behavior.

use pretty_assertions::assert_eq;
use softfont_edit::GlyphEditState;
use softfont_engine::{Position, Size};

#[test]
fn initially_nothing_to_undo() {
    let mut state = GlyphEditState::new();
    assert!(!state.can_undo());
    let before = state.pixels().to_vec();
    state.undo();
    assert_eq!(state.pixels(), before);
}

#[test]
fn toggle_is_undoable() {
    let mut state = GlyphEditState::new();
    state.toggle_pixel();
    assert_eq!(state.pixels()[0], 1);
    assert!(state.can_undo());
    state.undo();
    assert_eq!(state.pixels()[0], 0);
    assert!(!state.can_undo());
}

#[test]
fn undo_restores_focus_and_selection() {
    let mut state = GlyphEditState::new();
    state.move_focus(3, 2);
    state.resize_selection(2, 1);
    state.fill_selection(1);
    state.move_focus(-3, -2);
    assert_eq!(state.focus(), Position::new(0, 0));
    assert_eq!(state.selection(), Size::new(0, 0));

    state.undo();
    assert_eq!(state.focus(), Position::new(2, 3));
    assert_eq!(state.selection(), Size::new(1, 2));
    assert!(state.pixels().iter().all(|&p| p == 0));
}

#[test]
fn n_undos_restore_the_state_before_n_operations() {
    let mut state = GlyphEditState::new();
    let pixels = state.pixels().to_vec();
    let focus = state.focus();
    let selection = state.selection();

    state.toggle_pixel();
    state.move_focus(2, 2);
    state.resize_selection(3, 3);
    state.fill_selection(1);
    state.invert();
    state.flip_horizontal();
    state.select_all();
    state.flip_vertical();

    // Five snapshots: toggle, fill, invert and the two flips.
    for _ in 0..5 {
        assert!(state.can_undo());
        state.undo();
    }
    assert!(!state.can_undo());
    assert_eq!(state.pixels(), pixels);
    assert_eq!(state.focus(), focus);
    assert_eq!(state.selection(), selection);
}

#[test]
fn undo_pops_exactly_one_snapshot_per_call() {
    let mut state = GlyphEditState::new();
    state.toggle_pixel();
    state.move_focus(0, 1);
    state.toggle_pixel();
    state.undo();
    // Second toggle undone; the first one is still there.
    assert_eq!(state.pixels()[0], 1);
    assert_eq!(state.pixels()[1], 0);
    assert!(state.can_undo());
    state.undo();
    assert_eq!(state.pixels()[0], 0);
}

#[test]
fn switching_glyphs_clears_the_history() {
    let mut state = GlyphEditState::new();
    state.toggle_pixel();
    assert!(state.can_undo());
    assert!(state.is_dirty());
    state.next_glyph(false);
    assert!(!state.can_undo());
    assert!(!state.is_dirty());
    // The edit was flushed into the document, not lost.
    assert!(state.font().glyph_is_used(1));
}
