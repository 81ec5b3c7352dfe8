//! Editing operations over the track model and the composed editor
//! session state.

mod editor;

pub use editor::{import_coaster, EditorState, UiState};
