//! The [`ViewModel`] trait sitting between the game model and its screens.

use crate::app::Message;

/// Turns UI messages into model commands and keeps the state a view draws from.
pub trait ViewModel {
    /// Handles a message, returning a follow-up for the app if one is needed.
    fn update(&mut self, message: Message) -> Option<Message>;
}
