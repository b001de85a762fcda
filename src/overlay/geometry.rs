//! Pure geometry for the overlay window: bounds, movement limits and
//! content-driven sizing.

use serde::{Deserialize, Serialize};

/// Smallest size the overlay shrinks to when fitting content.
pub const MIN_WIDTH: u32 = 300;
pub const MIN_HEIGHT: u32 = 200;

/// Horizontal padding added around reported content width.
const CONTENT_PADDING: f64 = 32.0;

/// Content smaller than this in either direction counts as empty.
const CONTENT_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

/// Work area of the display the overlay lives on, in desktop coordinates.
/// Secondary displays may have a non-zero or negative origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenMetrics {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Allowed range for the window's top edge: two thirds of the window may
/// leave the screen at either end.
pub fn vertical_band(window_height: f64, screen: &ScreenMetrics) -> (f64, f64) {
    let overhang = window_height * 2.0 / 3.0;
    let top = screen.y as f64;
    (top - overhang, top + screen.height as f64 + overhang)
}

/// Allowed range for the window's left edge: half the window may leave the
/// screen at either end.
pub fn horizontal_band(window_width: f64, screen: &ScreenMetrics) -> (f64, f64) {
    let overhang = window_width / 2.0;
    let left = screen.x as f64;
    (left - overhang, left + screen.width as f64 - overhang)
}

/// `true` when `y` lies inside the vertical band.
pub fn within_vertical_band(y: f64, window_height: f64, screen: &ScreenMetrics) -> bool {
    let (min, max) = vertical_band(window_height, screen);
    y >= min && y <= max
}

/// Clamp a left-edge coordinate into the horizontal band.
pub fn clamp_horizontal(x: f64, window_width: f64, screen: &ScreenMetrics) -> f64 {
    let (min, max) = horizontal_band(window_width, screen);
    // `max < min` only for windows wider than twice the screen
    x.max(min).min(max.max(min))
}

/// Bounds that fit reported content dimensions on `screen`, keeping the
/// current top edge and pulling the window left so its right edge stays on
/// screen.
pub fn fit_to_content(
    content_width: f64,
    content_height: f64,
    current: Position,
    screen: &ScreenMetrics,
) -> Bounds {
    let max_width = (screen.width / 2).max(MIN_WIDTH);
    let padded = (content_width + CONTENT_PADDING).floor().max(0.0) as u32;
    let width = padded.min(max_width).max(MIN_WIDTH);
    let height = (content_height.ceil().max(0.0) as u32).max(MIN_HEIGHT);
    let right = screen.x + screen.width as i32;
    let x = current.x.min(right - width as i32);

    Bounds {
        x,
        y: current.y,
        width,
        height,
    }
}

/// Whether reported content dimensions amount to something worth showing.
pub fn is_meaningful_content(width: f64, height: f64) -> bool {
    width > CONTENT_THRESHOLD && height > CONTENT_THRESHOLD
}
