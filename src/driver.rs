//! Fixed-tick logic task.
//!
//! A [`SessionDriver`] moves a [`SnakeGame`] into a tokio task that ticks it on an
//! interval and applies turns and restarts in between. Every tick publishes a
//! [`GameSnapshot`] on a watch channel; readers never touch the game itself.
use std::time::Duration;

use log::{debug, error, warn};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::models::snake::{
    grid::Direction,
    snake_game::{GameSnapshot, GameStatus, SnakeGame},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverCommand {
    Turn(Direction),
    Restart,
    Stop,
}

#[derive(Debug)]
pub struct SessionDriver {
    sender: mpsc::UnboundedSender<DriverCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
    handle: Option<JoinHandle<()>>,
}

impl SessionDriver {
    /// Starts ticking `game` every `tick`. Must be called within a tokio runtime.
    #[must_use]
    pub fn spawn(game: SnakeGame, tick: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (publisher, snapshots) = watch::channel(game.snapshot());
        let handle = tokio::spawn(Self::main_loop(game, tick, receiver, publisher));
        Self {
            sender,
            snapshots,
            handle: Some(handle),
        }
    }

    async fn main_loop(
        mut game: SnakeGame,
        tick: Duration,
        mut receiver: mpsc::UnboundedReceiver<DriverCommand>,
        publisher: watch::Sender<GameSnapshot>,
    ) {
        let mut interval = time::interval_at(time::Instant::now() + tick, tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                command = receiver.recv() => match command {
                    Some(DriverCommand::Turn(direction)) => {
                        game.set_pending_direction(direction);
                    }
                    Some(DriverCommand::Restart) => match game.restart() {
                        Ok(snapshot) => {
                            publisher.send_replace(snapshot);
                            interval.reset();
                        }
                        Err(e) => warn!("Restart rejected: {}", e),
                    },
                    Some(DriverCommand::Stop) | None => {
                        debug!("Stopping session driver");
                        break;
                    }
                },
                _ = interval.tick() => {
                    if game.get_status() == GameStatus::Running {
                        publisher.send_replace(game.tick());
                    }
                }
            }
        }
    }

    /// Queues a turn for the next tick.
    pub fn turn(&self, direction: Direction) {
        self.send(DriverCommand::Turn(direction));
    }

    /// Asks for a restart. Rejected by the game unless it is over.
    pub fn restart(&self) {
        self.send(DriverCommand::Restart);
    }

    pub fn stop(&self) {
        self.send(DriverCommand::Stop);
    }

    fn send(&self, command: DriverCommand) {
        if let Err(e) = self.sender.send(command) {
            error!("Session driver is gone, dropped {:?}", e.0);
        }
    }

    /// The snapshot published by the most recent tick or restart.
    #[must_use]
    pub fn latest(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Stops the task and waits for it to finish.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                error!("Session driver ended abnormally: {:#?}", e);
            }
        }
    }
}

impl Drop for SessionDriver {
    fn drop(&mut self) {
        if self.handle.is_some() {
            // the task may already be gone; nothing to report then
            let _ = self.sender.send(DriverCommand::Stop);
        }
    }
}
