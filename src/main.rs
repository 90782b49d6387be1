use std::io::{self, Write};

use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{error, info};

use galaxy_rider::assets::Assets;
use galaxy_rider::audio::{Silence, TerminalAudio};
use galaxy_rider::config::Config;
use galaxy_rider::game::Game;
use galaxy_rider::rendering::{OutputTarget, ScreenBuffer, TerminalPresenter};
use galaxy_rider::simulation::Simulation;
use galaxy_rider::terminal_io::{request_key_releases, stop_key_releases, SimulatedInput, TerminalInput};
use galaxy_rider::types::Scale;

const DEBUG_QUIT_TICK: u64 = 600;

fn main() -> io::Result<()> {
    let config = Config::parse();
    simple_logging::log_to_file(&config.log_file, log::LevelFilter::Info)?;
    info!("Starting Galaxy Rider.");

    let seed = config.seed_or_random();
    info!("Using seed {}", seed);
    let assets = Assets::load(&config.assets, config.mute);

    if config.debug {
        run_headless(&config, assets, seed)
    } else {
        run_terminal(&config, assets, seed)
    }
}

fn run_headless(config: &Config, assets: Assets, seed: u64) -> io::Result<()> {
    info!("Debug mode enabled. Resolution {}x{}", config.width, config.height);
    let scale = Scale::for_terminal(config.width, config.height);
    let target = OutputTarget::Headless(ScreenBuffer::new(config.width, config.height));
    let presenter = TerminalPresenter::new(target, config.width, config.height, assets, &scale);
    let mut game = Game::new(Simulation::new(scale, seed), SimulatedInput::demo(DEBUG_QUIT_TICK), presenter, Silence)
        .with_max_frames(config.frames)
        .without_game_over_hold();
    game.run()?;
    Ok(())
}

fn run_terminal(config: &Config, assets: Assets, seed: u64) -> io::Result<()> {
    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let (width, height) = match size() {
        Ok(dimensions) => dimensions,
        Err(e) => {
            error!("Failed to get terminal size: {}", e);
            let _ = disable_raw_mode();
            return Err(e);
        }
    };
    info!("Terminal size: {}x{}", width, height);

    let mut target = OutputTarget::Terminal(io::stdout());
    let mut key_releases = false;
    let result = setup_screen(&mut target).and_then(|_| {
        let supported = supports_keyboard_enhancement().unwrap_or_else(|e| {
            error!("Failed to query keyboard enhancement support: {}", e);
            false
        });
        key_releases = request_key_releases(&mut target, supported);
        let scale = Scale::for_terminal(width, height);
        let audio = TerminalAudio::new(io::stdout(), assets.hit_sound, assets.engine_sound);
        let presenter = TerminalPresenter::new(target, width, height, assets, &scale);
        let mut game = Game::new(Simulation::new(scale, seed), TerminalInput::new(), presenter, audio)
            .with_max_frames(config.frames);
        game.run()
    });

    restore_screen(key_releases);
    match result {
        Ok(score) => {
            info!("Exiting with final score {}.", score);
            Ok(())
        }
        Err(e) => {
            error!("Game loop failed: {}", e);
            Err(e)
        }
    }
}

fn setup_screen(target: &mut OutputTarget) -> io::Result<()> {
    info!("Entering alternate screen and hiding cursor.");
    target.apply(EnterAlternateScreen).map_err(|e| { error!("Failed to enter alternate screen: {}", e); e })?;
    target.apply(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    target.flush().map_err(|e| { error!("Failed to flush stdout after setup: {}", e); e })
}

/// Best effort: every step runs even if an earlier one fails.
fn restore_screen(key_releases: bool) {
    let mut target = OutputTarget::Terminal(io::stdout());
    if key_releases {
        if let Err(e) = stop_key_releases(&mut target) {
            error!("Failed to pop keyboard enhancement flags on exit: {}", e);
        }
    }
    if let Err(e) = target.apply(Show) {
        error!("Failed to show cursor on exit: {}", e);
    }
    if let Err(e) = target.apply(LeaveAlternateScreen) {
        error!("Failed to leave alternate screen: {}", e);
    }
    if let Err(e) = disable_raw_mode() {
        error!("Failed to disable raw mode on exit: {}", e);
    }
}
