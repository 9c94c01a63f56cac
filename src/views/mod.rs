//! Screen views

use anyhow::Result;
use ratatui::prelude::*;

pub mod launcher;

/// Result of offering a key to a view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewAction {
    /// Key handled, nothing else to do
    Continue,
    /// View did not use the key
    Unhandled,
}

/// Trait for views that can be rendered
pub trait ViewTrait {
    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;

    /// Handle key input
    fn handle_key(&mut self, _key: crossterm::event::KeyCode) -> Result<ViewAction> {
        Ok(ViewAction::Unhandled)
    }
}
