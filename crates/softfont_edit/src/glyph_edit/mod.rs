//! Glyph editing model.
//!
//! `GlyphEditState` is the model layer for the pixel grid editor:
//! - one checked-out glyph's pixel buffer, focus and selection
//! - clipboard and full-snapshot undo history
//! - glyph navigation with checkout/checkin against the document
//!
//! The UI layer reads state, calls the operations, and drains the
//! render queue after each one.
//!
//! The implementation is split across files matching the test layout:
//! - `state.rs` - struct, constructors, queries, checkout/flush, navigation
//! - `selection.rs` - focus movement and selection resizing
//! - `glyph_operations.rs` - toggle, fill, invert, flips
//! - `clipboard.rs` - copy, cut, paste
//! - `undo.rs` - snapshot history

mod state;
pub use state::GlyphEditState;

mod clipboard;
mod glyph_operations;
mod selection;
mod undo;
