//! Headless runs steered by a bot, for watching the engine in the logs.
use std::time::Duration;

use env_logger::Env;
use log::{error, info};
use rustsnake::{
    driver::SessionDriver,
    models::snake::{config::GameConfig, snake_bot::SnakeBotType, snake_game::SnakeGame},
};

const GAMES_TO_PLAY: u32 = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("rustsnake=info,autoplay=info"))
        .init();

    let config = GameConfig::default();
    let tick = Duration::from_millis(config.tick_millis);
    let game = SnakeGame::new(config)?;
    let grid = game.get_grid();
    let bot_type = SnakeBotType::MoveToClosestAppleBot;
    let bot = bot_type.make_new_bot();
    info!("Autoplay with {} for {} games", bot_type, GAMES_TO_PLAY);

    let driver = SessionDriver::spawn(game, tick);
    let mut snapshots = driver.subscribe();
    let mut games_played = 0;
    while games_played < GAMES_TO_PLAY {
        if let Err(e) = snapshots.changed().await {
            error!("Session driver stopped publishing: {}", e);
            break;
        }
        let snapshot = snapshots.borrow_and_update().clone();
        if snapshot.is_game_over() {
            games_played += 1;
            info!(
                "Game {} ended by {:?} with score {} after {} ticks",
                games_played,
                snapshot.end_reason,
                snapshot.score,
                snapshot.ticks
            );
            if games_played < GAMES_TO_PLAY {
                driver.restart();
            }
            continue;
        }
        driver.turn(bot.make_move(&snapshot, grid));
    }

    driver.shutdown().await;
    Ok(())
}
