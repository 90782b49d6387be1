use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "galaxy-rider")]
#[command(about = "Dodge the falling enemy ships for as long as you can")]
pub struct Config {
    /// Run headless: scripted input, in-memory screen dumped to the log
    #[arg(long)]
    pub debug: bool,

    /// Headless screen width in cells
    #[arg(long, default_value_t = 80)]
    pub width: u16,

    /// Headless screen height in cells
    #[arg(long, default_value_t = 24)]
    pub height: u16,

    /// Stop after this many ticks
    #[arg(long)]
    pub frames: Option<u64>,

    /// Seed for enemy sizes, speeds and columns
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding sprites and sounds
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Disable sound cues
    #[arg(long)]
    pub mute: bool,

    #[arg(long, default_value = "galaxy-rider.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
