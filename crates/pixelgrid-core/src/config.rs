//! Viewer constants.
//!
//! Everything that tunes the look and feel of the grid lives here: scale
//! bounds, lattice cell size and the default colors.

use crate::color::Color;

/// Smallest allowed camera scale (most zoomed out).
pub const MIN_SCALE: f64 = 0.1;
/// Largest allowed camera scale (most zoomed in).
pub const MAX_SCALE: f64 = 2.0;

/// Side length of one lattice cell, in world units.
pub const BASE_CELL_SIZE: f64 = 50.0;

/// Scales below `MIN_SCALE * BUFFER_RATIO` render the grid dimmed, so a
/// dense line lattice at low zoom fades instead of strobing.
pub const BUFFER_RATIO: f64 = 1.5;

/// Grid line width in world units; multiplied by the camera scale per frame.
pub const BASE_LINE_WIDTH: f32 = 1.0;

/// Frame clear color.
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::rgba(0.01, 0.01, 0.01, 0.8);
/// Grid line color before the brightness modifier is applied.
pub const DEFAULT_GRID_COLOR: Color = Color::rgba(0.8, 0.8, 0.8, 0.8);

/// Palette offered for cell colors.
pub const COLOR_PALETTE: [Color; 6] = [
    Color::rgb(1.0, 0.0, 0.0),
    Color::rgb(0.0, 1.0, 0.0),
    Color::rgb(0.0, 0.0, 1.0),
    Color::rgb(1.0, 1.0, 0.0),
    Color::rgb(1.0, 0.0, 1.0),
    Color::rgb(0.0, 1.0, 1.0),
];
