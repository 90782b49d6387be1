use std::io::{self, Write};
use log::info;
use crossterm::{cursor::MoveTo, execute, queue, Command};

use crate::assets::{Assets, Sprite};
use crate::constants::{CELL_HEIGHT, CELL_WIDTH, EXPLOSION_DESIGN_HEIGHT, EXPLOSION_DESIGN_WIDTH};
use crate::simulation::Snapshot;
use crate::types::{pixel_to_cell_x, pixel_to_cell_y, Rect, Scale};

/// Draws world state. Implementations only read the snapshot.
pub trait Presenter {
    fn present(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;
    fn present_game_over(&mut self, score: u32) -> io::Result<()>;
}

pub fn game_over_message(score: u32) -> String {
    format!("GAME OVER! Final Score: {}", score)
}

// --- Headless screen ---

/// In-memory stand-in for the terminal: rows of cells and a cursor.
pub struct ScreenBuffer {
    cells: Vec<Vec<char>>,
    cursor: (u16, u16),
}

impl ScreenBuffer {
    pub fn new(columns: u16, rows: u16) -> Self {
        ScreenBuffer {
            cells: vec![vec![' '; columns as usize]; rows as usize],
            cursor: (0, 0),
        }
    }

    pub fn columns(&self) -> u16 {
        self.cells.first().map_or(0, |row| row.len() as u16)
    }

    pub fn rows(&self) -> u16 {
        self.cells.len() as u16
    }

    pub fn move_to(&mut self, column: u16, row: u16) {
        self.cursor = (column, row);
    }

    pub fn cell(&self, column: u16, row: u16) -> Option<char> {
        self.cells.get(row as usize)?.get(column as usize).copied()
    }

    /// Writes from the cursor and leaves it after the last character.
    /// Anything past the right edge or below the last row is dropped.
    pub fn write_str(&mut self, text: &str) {
        let (column, row) = self.cursor;
        let mut written = 0u16;
        for c in text.chars() {
            let target = self
                .cells
                .get_mut(row as usize)
                .and_then(|line| line.get_mut(column.saturating_add(written) as usize));
            if let Some(cell) = target {
                *cell = c;
            }
            written = written.saturating_add(1);
        }
        self.cursor = (column.saturating_add(written), row);
    }

    pub fn row_text(&self, row: u16) -> String {
        self.cells
            .get(row as usize)
            .map(|line| line.iter().collect())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.rows()).map(|row| self.row_text(row)).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    pub fn print_to_log(&self) {
        info!("Final screen ({}x{}):", self.columns(), self.rows());
        for (row, line) in self.lines().iter().enumerate() {
            info!("{:>3}|{}", row, line);
        }
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- Where frames go ---
pub enum OutputTarget {
    Terminal(io::Stdout),
    Headless(ScreenBuffer),
}

impl OutputTarget {
    /// Queued on a terminal; the frame's final flush sends it.
    pub fn move_cursor(&mut self, column: u16, row: u16) -> io::Result<()> {
        match self {
            OutputTarget::Terminal(out) => queue!(out, MoveTo(column, row)),
            OutputTarget::Headless(screen) => {
                screen.move_to(column, row);
                Ok(())
            }
        }
    }

    /// Terminal mode changes. A headless screen has no modes, so they are skipped.
    pub fn apply(&mut self, command: impl Command) -> io::Result<()> {
        match self {
            OutputTarget::Terminal(out) => execute!(out, command),
            OutputTarget::Headless(_) => Ok(()),
        }
    }

    pub fn screen_buffer(&self) -> Option<&ScreenBuffer> {
        match self {
            OutputTarget::Headless(screen) => Some(screen),
            OutputTarget::Terminal(_) => None,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Terminal(out) => out.write(buf),
            OutputTarget::Headless(screen) => screen.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Terminal(out) => out.flush(),
            OutputTarget::Headless(_) => Ok(()),
        }
    }
}

// --- GameGrid: one char per terminal cell ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    /// Cells outside the grid, including negative ones, are ignored.
    pub fn set_char(&mut self, x: i32, y: i32, c: char) {
        if x >= 0 && y >= 0 && y < self.height as i32 && x < self.width as i32 {
            self.grid[y as usize][x as usize] = c;
        }
    }

    /// Tiles art across the whole grid, or fills it with the placeholder.
    pub fn fill_background(&mut self, background: &Sprite) {
        let (tile_width, tile_height) = background.natural_size().unwrap_or((1, 1));
        for y in 0..self.height {
            for x in 0..self.width {
                let c = background.sample(x % tile_width.max(1), y % tile_height.max(1), tile_width, tile_height);
                self.grid[y as usize][x as usize] = c;
            }
        }
    }

    /// Stretches `sprite` over the cells covered by `rect` (world pixels).
    pub fn draw_sprite(&mut self, sprite: &Sprite, rect: &Rect) {
        let col_start = pixel_to_cell_x(rect.left());
        let row_start = pixel_to_cell_y(rect.top());
        let cols = (pixel_to_cell_x(rect.right() - 1) - col_start + 1).max(1);
        let rows = (pixel_to_cell_y(rect.bottom() - 1) - row_start + 1).max(1);
        for row in 0..rows {
            for col in 0..cols {
                let c = sprite.sample(col as u16, row as u16, cols as u16, rows as u16);
                if c != ' ' {
                    self.set_char(col_start + col, row_start + row, c);
                }
            }
        }
    }

    pub fn render(&self, target: &mut OutputTarget) -> io::Result<()> {
        for (y, row) in self.grid.iter().enumerate() {
            target.move_cursor(0, y as u16)?;
            target.write_all(row.iter().collect::<String>().as_bytes())?;
        }
        Ok(())
    }
}

// --- Presenter on a terminal or screen buffer ---
pub struct TerminalPresenter {
    pub target: OutputTarget,
    grid: GameGrid,
    assets: Assets,
    explosion_size: (i32, i32),
}

impl TerminalPresenter {
    pub fn new(target: OutputTarget, columns: u16, rows: u16, assets: Assets, scale: &Scale) -> Self {
        TerminalPresenter {
            target,
            grid: GameGrid::new(columns, rows),
            assets,
            explosion_size: (scale.apply(EXPLOSION_DESIGN_WIDTH), scale.apply(EXPLOSION_DESIGN_HEIGHT)),
        }
    }

    fn explosion_rect(&self, x: i32, y: i32) -> Rect {
        match self.assets.explosion.natural_size() {
            Some((cols, rows)) => Rect::new(x, y, cols as i32 * CELL_WIDTH, rows as i32 * CELL_HEIGHT),
            None => Rect::new(x, y, self.explosion_size.0, self.explosion_size.1),
        }
    }

    fn write_at(&mut self, x: u16, y: u16, text: &str) -> io::Result<()> {
        self.target.move_cursor(x, y)?;
        self.target.write_all(text.as_bytes())
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        self.grid.fill_background(&self.assets.background);
        self.grid.draw_sprite(&self.assets.player, snapshot.player);
        for enemy in snapshot.enemies {
            self.grid.draw_sprite(&self.assets.enemy, &enemy.rect);
        }
        for explosion in snapshot.explosions {
            let rect = self.explosion_rect(explosion.x, explosion.y);
            self.grid.draw_sprite(&self.assets.explosion, &rect);
        }
        self.grid.render(&mut self.target)?;

        let seconds = snapshot.elapsed.as_secs_f64().round() as u64;
        self.write_at(1, 0, &format!("TIME: {}s", seconds))?;
        self.write_at(1, 1, &format!("SCORE: {}", snapshot.score))?;
        self.write_at(1, 2, &format!("LIVES: {}", snapshot.lives))?;
        self.target.flush()
    }

    fn present_game_over(&mut self, score: u32) -> io::Result<()> {
        let message = game_over_message(score);
        let x = (self.grid.width / 2).saturating_sub(message.len() as u16 / 2);
        let y = self.grid.height / 2;
        self.write_at(x, y, &message)?;
        self.target.flush()?;
        if let Some(sb) = self.target.screen_buffer() {
            sb.print_to_log();
        }
        Ok(())
    }
}
