mod action;
mod state;

pub use action::Action;
pub use state::{AppState, HitAreas, InputMode, MessageKind, StatusMessage, UiState, ViewCache};
