use env_logger::Env;
use iced::{Size, Task};
use log::debug;
use rustsnake::{
    app::{State, WINDOW_TITLE},
    models::snake::config::GameConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("rustsnake=info")).init();
    debug!("Debug on");

    // the tick loop runs on this runtime; iced drives rendering on the main thread
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let state = State::new(GameConfig::default())?;
    iced::application(WINDOW_TITLE, State::update, State::view)
        .window_size(Size::new(640.0, 480.0))
        .subscription(State::subscription)
        .run_with(move || (state, Task::none()))?;
    Ok(())
}
