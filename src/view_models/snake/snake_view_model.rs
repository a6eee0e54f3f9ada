use std::time::Duration;

use iced::keyboard::{key::Named, Key};
use log::{debug, warn};

use crate::{
    app::Message,
    driver::SessionDriver,
    models::snake::{
        config::GameConfig,
        grid::{Direction, Grid},
        snake_game::{GameSnapshot, SnakeError, SnakeGame},
    },
    view_model::ViewModel,
    views::snake::snake_game_screen::SnakeGameMessage,
};

/// Time between two redraws. Independent of the logic tick.
pub const MILLIS_BETWEEN_FRAMES: u64 = 16;

/// Named keys that steer the snake.
pub const NAMED_KEY_BINDINGS: [(Named, Direction); 4] = [
    (Named::ArrowUp, Direction::Up),
    (Named::ArrowDown, Direction::Down),
    (Named::ArrowLeft, Direction::Left),
    (Named::ArrowRight, Direction::Right),
];

/// Character keys that steer the snake, matched case-insensitively.
pub const CHARACTER_KEY_BINDINGS: [(&str, Direction); 4] = [
    ("w", Direction::Up),
    ("s", Direction::Down),
    ("a", Direction::Left),
    ("d", Direction::Right),
];

/// Resolves a key press to a direction, if it is bound to one.
#[must_use]
pub fn direction_for_key(key: &Key) -> Option<Direction> {
    match key {
        Key::Named(named) => NAMED_KEY_BINDINGS
            .iter()
            .find(|(bound, _)| bound == named)
            .map(|(_, direction)| *direction),
        Key::Character(c) => CHARACTER_KEY_BINDINGS
            .iter()
            .find(|(bound, _)| c.as_str().eq_ignore_ascii_case(bound))
            .map(|(_, direction)| *direction),
        Key::Unidentified => None,
    }
}

#[derive(Debug)]
pub struct SnakeViewModel {
    driver: SessionDriver,
    last_snapshot: GameSnapshot,
    grid: Grid,
}

impl SnakeViewModel {
    /// Creates the game and starts its tick loop. Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid and a [`SnakeGame`] cannot
    /// be created, returns a [`SnakeError`].
    pub fn new(config: GameConfig) -> Result<Self, SnakeError> {
        debug!("New SnakeViewModel config: {:#?}", config);
        let tick = Duration::from_millis(config.tick_millis);
        let game = SnakeGame::new(config)?;
        let grid = game.get_grid();
        let last_snapshot = game.snapshot();
        Ok(Self {
            driver: SessionDriver::spawn(game, tick),
            last_snapshot,
            grid,
        })
    }

    #[must_use]
    pub fn get_snapshot(&self) -> &GameSnapshot {
        &self.last_snapshot
    }

    #[must_use]
    pub fn get_grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn get_time_between_frames(&self) -> u64 {
        MILLIS_BETWEEN_FRAMES
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.last_snapshot.is_game_over()
    }
}

impl ViewModel for SnakeViewModel {
    fn update(&mut self, message: Message) -> Option<Message> {
        let snake_game_message = match message {
            Message::Snake(snake_game_message) => snake_game_message,
            other => {
                warn!("Non-snake message sent to SnakeViewModel: {:#?}", other);
                return None;
            }
        };
        match snake_game_message {
            SnakeGameMessage::Key(Key::Named(Named::Escape)) => Some(Message::Quit),
            SnakeGameMessage::Key(Key::Named(Named::Enter)) => {
                if self.game_over() {
                    debug!("Restart requested");
                    self.driver.restart();
                } else {
                    debug!("Ignoring restart while the game is running");
                }
                None
            }
            SnakeGameMessage::Key(key) => {
                if let Some(direction) = direction_for_key(&key) {
                    self.driver.turn(direction);
                }
                None
            }
            SnakeGameMessage::Frame(_) => {
                self.last_snapshot = self.driver.latest();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_letter_bindings() {
        assert_eq!(
            direction_for_key(&Key::Named(Named::ArrowUp)),
            Some(Direction::Up)
        );
        assert_eq!(
            direction_for_key(&Key::Named(Named::ArrowLeft)),
            Some(Direction::Left)
        );
        assert_eq!(
            direction_for_key(&Key::Character("d".into())),
            Some(Direction::Right)
        );
        assert_eq!(
            direction_for_key(&Key::Character("S".into())),
            Some(Direction::Down)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(direction_for_key(&Key::Named(Named::Enter)), None);
        assert_eq!(direction_for_key(&Key::Character("q".into())), None);
        assert_eq!(direction_for_key(&Key::Unidentified), None);
    }

    #[tokio::test]
    async fn test_escape_quits_and_enter_waits_for_game_over() {
        let mut view_model = SnakeViewModel::new(GameConfig::default()).unwrap();
        let quit = view_model.update(Message::Snake(SnakeGameMessage::Key(Key::Named(
            Named::Escape,
        ))));
        assert!(matches!(quit, Some(Message::Quit)));

        let enter = view_model.update(Message::Snake(SnakeGameMessage::Key(Key::Named(
            Named::Enter,
        ))));
        assert!(enter.is_none());
        assert!(!view_model.game_over());
    }
}
