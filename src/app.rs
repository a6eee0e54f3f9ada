use iced::{Element, Subscription, Task};
use log::info;

use crate::{
    models::snake::{config::GameConfig, snake_game::SnakeError},
    view::View,
    view_models::snake::snake_view_model::SnakeViewModel,
    views::snake::snake_game_screen::{SnakeGameMessage, SnakeGameScreen},
};

pub const WINDOW_TITLE: &str = "Snake";

pub struct State {
    screen: SnakeGameScreen,
}

#[derive(Clone, Debug)]
pub enum Message {
    Snake(SnakeGameMessage),
    Quit,
}

impl State {
    /// Builds the game screen. Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the configuration is invalid.
    pub fn new(config: GameConfig) -> Result<Self, SnakeError> {
        Ok(Self {
            screen: SnakeGameScreen::new(SnakeViewModel::new(config)?),
        })
    }

    pub fn update(state: &mut State, message: Message) -> Task<Message> {
        match message {
            Message::Quit => {
                info!("Quitting");
                iced::exit()
            }
            message => match state.screen.update(message) {
                Some(next) => Self::update(state, next),
                None => Task::none(),
            },
        }
    }

    #[must_use]
    pub fn view(state: &State) -> Element<'_, Message> {
        state.screen.view()
    }

    #[must_use]
    pub fn subscription(state: &State) -> Subscription<Message> {
        state.screen.subscription()
    }
}
