use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use iced::{
    alignment::{Horizontal, Vertical},
    keyboard::{self, Key},
    time,
    widget::{column, container, text, Column, Row, Stack},
    Alignment, Border, Color, Element, Length, Subscription,
};

use crate::{
    app::Message,
    models::snake::{grid::Cell, snake_game::EndReason},
    view::View,
    view_model::ViewModel,
    view_models::snake::snake_view_model::SnakeViewModel,
};

/// Side of one board cell in pixels.
pub const CELL_SIZE: f32 = 20.0;

const BACKGROUND: Color = Color::BLACK;
const GRID_LINE: Color = Color {
    r: 50.0 / 255.0,
    g: 50.0 / 255.0,
    b: 50.0 / 255.0,
    a: 1.0,
};
const SNAKE_BODY: Color = Color {
    r: 0.0,
    g: 200.0 / 255.0,
    b: 0.0,
    a: 1.0,
};
const SNAKE_HEAD: Color = Color {
    r: 0.0,
    g: 150.0 / 255.0,
    b: 0.0,
    a: 1.0,
};
const FOOD: Color = Color {
    r: 220.0 / 255.0,
    g: 20.0 / 255.0,
    b: 60.0 / 255.0,
    a: 1.0,
};
const OVERLAY: Color = Color {
    a: 160.0 / 255.0,
    ..Color::BLACK
};

#[derive(Clone, Debug)]
pub enum SnakeGameMessage {
    Key(Key),
    Frame(Instant),
}

#[derive(Debug)]
pub struct SnakeGameScreen {
    view_model: SnakeViewModel,
}

impl SnakeGameScreen {
    #[must_use]
    pub fn new(view_model: SnakeViewModel) -> Self {
        Self { view_model }
    }

    fn board(&self) -> Column<'_, Message> {
        let snapshot = self.view_model.get_snapshot();
        let grid = self.view_model.get_grid();
        let head = snapshot.head();
        let body: HashSet<Cell> = snapshot.snake.iter().copied().collect();

        let make_container = |color: Color| {
            container(text(" "))
                .width(CELL_SIZE)
                .height(CELL_SIZE)
                .style(move |_: &_| container::Style {
                    border: Border {
                        color: GRID_LINE,
                        width: 1.0,
                        ..Default::default()
                    },
                    background: Some(color.into()),
                    ..container::Style::default()
                })
        };

        let mut board = Column::new();
        for row in 0..grid.rows() {
            let mut cells: Row<Message> = Row::new();
            for col in 0..grid.cols() {
                let cell = Cell::new(col, row);
                let color = if head == Some(cell) {
                    SNAKE_HEAD
                } else if body.contains(&cell) {
                    SNAKE_BODY
                } else if snapshot.food == Some(cell) {
                    FOOD
                } else {
                    BACKGROUND
                };
                cells = cells.push(make_container(color));
            }
            board = board.push(cells);
        }
        board
    }

    #[allow(clippy::cast_precision_loss)]
    fn game_over_overlay(&self) -> Element<'_, Message> {
        let snapshot = self.view_model.get_snapshot();
        let grid = self.view_model.get_grid();
        let title = match snapshot.end_reason {
            Some(EndReason::BoardFull) => "Board Cleared",
            _ => "Game Over",
        };
        container(
            column![
                text(title).size(28).color(Color::WHITE),
                text(format!("Final Score: {}", snapshot.score)).color(Color::WHITE),
                text("Press Enter to Restart or Esc to Quit").color(Color::WHITE),
            ]
            .spacing(10)
            .align_x(Alignment::Center),
        )
        .width(Length::Fixed(grid.cols() as f32 * CELL_SIZE))
        .height(Length::Fixed(grid.rows() as f32 * CELL_SIZE))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(|_: &_| container::Style {
            background: Some(OVERLAY.into()),
            ..container::Style::default()
        })
        .into()
    }
}

impl View for SnakeGameScreen {
    fn update(&mut self, message: Message) -> Option<Message> {
        self.view_model.update(message)
    }

    fn view(&self) -> Element<'_, Message> {
        let snapshot = self.view_model.get_snapshot();
        let score = text(format!("Score: {}", snapshot.score))
            .size(20)
            .color(Color::WHITE);

        let playfield: Element<Message> = if snapshot.is_game_over() {
            Stack::new()
                .push(self.board())
                .push(self.game_over_overlay())
                .into()
        } else {
            self.board().into()
        };

        container(column![score, playfield].spacing(10))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .style(|_: &_| container::Style {
                background: Some(BACKGROUND.into()),
                ..container::Style::default()
            })
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let frames = time::every(Duration::from_millis(
            self.view_model.get_time_between_frames(),
        ))
        .map(SnakeGameMessage::Frame)
        .map(Message::Snake);
        let keyboard = keyboard::on_key_press(|key, _| {
            Some(Message::Snake(SnakeGameMessage::Key(key)))
        });
        Subscription::batch(vec![frames, keyboard])
    }
}
