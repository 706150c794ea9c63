use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// An application driven by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Use this to set the tick rate.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles a terminal event. Called between ticks, as events arrive.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one tick.
    fn update(&mut self, runtime: &mut Runtime);
}
