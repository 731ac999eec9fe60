//! Pixelgrid Core
//!
//! This crate contains the window-system and GPU independent parts of the
//! pixelgrid viewer: camera state, visible-region calculation, grid/pixel
//! geometry generation and camera persistence.

pub mod camera;
pub mod cells;
pub mod color;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod mapper;
pub mod region;
pub mod store;

pub use camera::CameraState;
pub use cells::{CellField, PixelCell};
pub use color::Color;
pub use region::VisibleRegion;
