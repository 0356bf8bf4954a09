//! Session state for the glyph editor.
//!
//! A small serializable snapshot of where the user was: the active
//! glyph, the focus cell, and the selection extent. Enough to put an
//! editing session back where it left off; pixel data lives in the font
//! file itself.

use serde::{Deserialize, Serialize};

use crate::GlyphEditState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Character index of the glyph being edited
    #[serde(default)]
    pub glyph_index: Option<i32>,

    /// Focus cell as (x, y)
    #[serde(default)]
    pub focus: (i32, i32),

    /// Signed selection extent as (w, h)
    #[serde(default)]
    pub selection: (i32, i32),
}

fn default_version() -> u32 {
    1
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            version: 1,
            glyph_index: None,
            focus: (0, 0),
            selection: (0, 0),
        }
    }
}

impl GlyphEditState {
    pub fn session_state(&self) -> SessionState {
        SessionState {
            version: 1,
            glyph_index: self.active_glyph(),
            focus: (self.focus().x, self.focus().y),
            selection: (self.selection().width, self.selection().height),
        }
    }

    /// Re-applies a captured session: loads the glyph and restores the
    /// focus/selection, both clamped to the current cell bounds.
    pub fn restore_session(&mut self, session: &SessionState) {
        if let Some(index) = session.glyph_index {
            self.load_glyph(index);
        }
        self.select_range(session.focus.into(), session.selection.into());
    }
}
