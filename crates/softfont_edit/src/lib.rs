#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Interactive editing layer for soft font glyphs.
//!
//! [`GlyphEditState`] checks one glyph's pixels out of a
//! [`softfont_engine::SoftFont`], applies the interactive operations
//! (focus/selection, clipboard, transforms, snapshot undo), and records
//! the minimal set of region updates in a [`RenderQueue`] for whatever
//! drawing surface the application drives.

pub mod glyph_edit;
pub use glyph_edit::GlyphEditState;

mod render;
pub use render::*;

mod session_state;
pub use session_state::SessionState;
