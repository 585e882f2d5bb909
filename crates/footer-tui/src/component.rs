//! Component trait: the interface every UI panel implements.
//!
//! - Components own their state and render themselves.
//! - Components receive `AppState` (read-only) for data they don't own.
//! - Components produce `Vec<Action>`; they never touch the store directly.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app_state::AppState;

pub trait Component {
    /// Handle a key event. Returns actions to be dispatched.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action>;

    /// Handle a mouse event inside the component's last drawn `area`.
    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action>;

    /// Receive an action dispatched by the App.
    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action>;

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState);
}
