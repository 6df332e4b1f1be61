//! Component trait - Interface for UI components
//!
//! A component owns its local state, turns key events into Actions and
//! renders itself. The theme is passed in on every draw instead of being
//! read from shared state.

use crate::action::Action;
use crate::model::Theme;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` - map a key to an Action, without touching state
/// 2. `update` - apply an Action, optionally returning a follow-up Action
/// 3. `draw` - render into `area`
pub trait Component {
    /// Called once before the first draw
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render the component; must not change state other than view caches
    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) -> Result<()>;
}
