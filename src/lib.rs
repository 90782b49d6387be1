pub mod assets;
pub mod audio;
pub mod config;
pub mod constants;
pub mod entities;
pub mod game;
pub mod rendering;
pub mod simulation;
pub mod terminal_io;
pub mod types;
