use std::io;
use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::audio::Audio;
use crate::constants::{GAME_OVER_HOLD, TICK_DURATION};
use crate::rendering::Presenter;
use crate::simulation::Simulation;
use crate::terminal_io::InputSource;

/// Paces the loop to fixed tick boundaries.
pub struct FrameClock {
    start: Instant,
    next_tick: Instant,
    tick: Duration,
}

impl FrameClock {
    pub fn new(tick: Duration) -> Self {
        let start = Instant::now();
        FrameClock { start, next_tick: start + tick, tick }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Blocks until the next tick boundary. A late frame resets the schedule
    /// instead of bursting to catch up.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.next_tick {
            thread::sleep(self.next_tick - now);
            self.next_tick += self.tick;
        } else {
            self.next_tick = now + self.tick;
        }
    }
}

pub struct Game<I: InputSource, P: Presenter, A: Audio> {
    pub simulation: Simulation,
    input: I,
    presenter: P,
    audio: A,
    max_frames: Option<u64>,
    hold_game_over: bool,
}

impl<I: InputSource, P: Presenter, A: Audio> Game<I, P, A> {
    pub fn new(simulation: Simulation, input: I, presenter: P, audio: A) -> Self {
        Game {
            simulation,
            input,
            presenter,
            audio,
            max_frames: None,
            hold_game_over: true,
        }
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Skip the pause that keeps the game over banner on screen.
    pub fn without_game_over_hold(mut self) -> Self {
        self.hold_game_over = false;
        self
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Runs until game over, a quit request, or the frame limit. Returns the final score.
    pub fn run(&mut self) -> io::Result<u32> {
        self.audio.play_loop();
        let mut clock = FrameClock::new(TICK_DURATION);

        while !self.simulation.is_over() {
            if self.max_frames.is_some_and(|max| self.simulation.tick_count >= max) {
                info!("Frame limit reached at tick {}", self.simulation.tick_count);
                break;
            }
            clock.wait();
            self.step(clock.elapsed())?;
        }

        info!(
            "Session finished after {} ticks ({:.1}s). Final score: {}",
            self.simulation.tick_count,
            self.simulation.elapsed.as_secs_f64(),
            self.simulation.score
        );
        self.presenter.present_game_over(self.simulation.score)?;
        if self.hold_game_over {
            thread::sleep(GAME_OVER_HOLD);
        }
        Ok(self.simulation.score)
    }

    /// One tick: poll input, advance the simulation, play cues, draw.
    pub fn step(&mut self, elapsed: Duration) -> io::Result<()> {
        let keys = self.input.poll(self.simulation.tick_count + 1)?;
        let report = self.simulation.tick(elapsed, keys);
        for _ in 0..report.hits {
            self.audio.play_hit();
        }
        self.presenter.present(&self.simulation.snapshot())
    }
}
