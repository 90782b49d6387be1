//! Optional resources. Each one is decided once at load time: either the file
//! was usable, or a placeholder stands in for it for the rest of the session.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

pub const PLAYER_FILL: char = '=';
pub const ENEMY_FILL: char = '#';
pub const EXPLOSION_FILL: char = '*';
pub const BACKGROUND_FILL: char = ' ';

/// Text-art sprite. Rows may have different lengths; missing cells are blank.
#[derive(Clone, Debug, PartialEq)]
pub enum Sprite {
    Art(Vec<Vec<char>>),
    Placeholder(char),
}

impl Sprite {
    pub fn load_or_placeholder(path: &Path, fill: char) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => {
                let rows: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();
                if rows.iter().all(|row| row.is_empty()) {
                    warn!("Sprite {} is empty, using placeholder '{}'", path.display(), fill);
                    Sprite::Placeholder(fill)
                } else {
                    info!("Loaded sprite {}", path.display());
                    Sprite::Art(rows)
                }
            }
            Err(e) => {
                warn!("Could not load sprite {}: {}. Using placeholder '{}'", path.display(), e, fill);
                Sprite::Placeholder(fill)
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Sprite::Placeholder(_))
    }

    /// Natural size in cells, if the sprite has one.
    pub fn natural_size(&self) -> Option<(u16, u16)> {
        match self {
            Sprite::Art(rows) => {
                let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
                Some((width as u16, rows.len() as u16))
            }
            Sprite::Placeholder(_) => None,
        }
    }

    /// Character at (`col`, `row`) when the sprite is stretched over a
    /// `width` x `height` block of cells (nearest neighbour).
    pub fn sample(&self, col: u16, row: u16, width: u16, height: u16) -> char {
        match self {
            Sprite::Placeholder(fill) => *fill,
            Sprite::Art(rows) => {
                let (art_width, art_height) = self.natural_size().unwrap_or((1, 1));
                if art_width == 0 || art_height == 0 || width == 0 || height == 0 {
                    return ' ';
                }
                let src_y = row as usize * art_height as usize / height as usize;
                let src_x = col as usize * art_width as usize / width as usize;
                rows.get(src_y).and_then(|r| r.get(src_x)).copied().unwrap_or(' ')
            }
        }
    }
}

/// A sound effect that either exists on disk or is silently skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Present,
    Silent,
}

impl SoundCue {
    pub fn load(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => {
                info!("Found sound {}", path.display());
                SoundCue::Present
            }
            Ok(_) => {
                warn!("Sound {} is empty, continuing without it", path.display());
                SoundCue::Silent
            }
            Err(e) => {
                warn!("Could not load sound {}: {}. Continuing without it", path.display(), e);
                SoundCue::Silent
            }
        }
    }

    pub fn is_present(&self) -> bool {
        *self == SoundCue::Present
    }
}

#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Sprite,
    pub enemy: Sprite,
    pub explosion: Sprite,
    pub background: Sprite,
    pub hit_sound: SoundCue,
    pub engine_sound: SoundCue,
}

impl Assets {
    pub fn load(dir: &Path, mute: bool) -> Self {
        info!("Loading assets from {}", dir.display());
        let file = |name: &str| -> PathBuf { dir.join(name) };
        let (hit_sound, engine_sound) = if mute {
            info!("Sound muted");
            (SoundCue::Silent, SoundCue::Silent)
        } else {
            (SoundCue::load(&file("explosion.wav")), SoundCue::load(&file("engine.wav")))
        };
        Assets {
            player: Sprite::load_or_placeholder(&file("spaceship.txt"), PLAYER_FILL),
            enemy: Sprite::load_or_placeholder(&file("enemy.txt"), ENEMY_FILL),
            explosion: Sprite::load_or_placeholder(&file("explosion.txt"), EXPLOSION_FILL),
            background: Sprite::load_or_placeholder(&file("background.txt"), BACKGROUND_FILL),
            hit_sound,
            engine_sound,
        }
    }

    /// Placeholders everywhere and no sound.
    pub fn placeholders() -> Self {
        Assets {
            player: Sprite::Placeholder(PLAYER_FILL),
            enemy: Sprite::Placeholder(ENEMY_FILL),
            explosion: Sprite::Placeholder(EXPLOSION_FILL),
            background: Sprite::Placeholder(BACKGROUND_FILL),
            hit_sound: SoundCue::Silent,
            engine_sound: SoundCue::Silent,
        }
    }
}
