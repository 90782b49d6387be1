use crate::constants::{CELL_HEIGHT, CELL_WIDTH, DESIGN_HEIGHT, DESIGN_WIDTH};

/// Axis-aligned bounding box in world pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Screen size in world pixels plus the factor that maps design units onto it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub screen_width: i32,
    pub screen_height: i32,
    pub factor: f64,
}

impl Scale {
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        let scale_x = screen_width as f64 / DESIGN_WIDTH as f64;
        let scale_y = screen_height as f64 / DESIGN_HEIGHT as f64;
        Scale {
            screen_width,
            screen_height,
            factor: scale_x.min(scale_y), // Keep the aspect ratio
        }
    }

    /// A terminal of `columns` x `rows` cells.
    pub fn for_terminal(columns: u16, rows: u16) -> Self {
        Scale::new(columns as i32 * CELL_WIDTH, rows as i32 * CELL_HEIGHT)
    }

    /// Design units to screen pixels, truncated, never below 1.
    pub fn apply(&self, design_units: i32) -> i32 {
        ((design_units as f64 * self.factor) as i32).max(1)
    }
}

pub fn pixel_to_cell_x(x: i32) -> i32 {
    x.div_euclid(CELL_WIDTH)
}

pub fn pixel_to_cell_y(y: i32) -> i32 {
    y.div_euclid(CELL_HEIGHT)
}
