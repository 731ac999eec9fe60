//! In-memory pixel-cell set with a lattice-hash spatial index.
//!
//! Cells arrive in bulk from the data source and are immutable until the
//! next bulk replace. Lookups are keyed by lattice coordinate, so geometry
//! generation walks only the visible cells instead of scanning the full set.

use crate::color::Color;
use crate::region::VisibleRegion;
use ahash::AHashMap;

/// One colored lattice cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCell {
    pub x: i64,
    pub y: i64,
    pub color: Color,
}

impl PixelCell {
    pub fn new(x: i64, y: i64, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// The full fetched cell set, indexed by lattice coordinate.
///
/// Duplicate coordinates are not rejected; the later cell wins, matching
/// last-drawn-wins overlap behavior.
#[derive(Debug, Default)]
pub struct CellField {
    cells: AHashMap<(i64, i64), Color>,
}

impl CellField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire cell set with a freshly fetched one.
    pub fn replace(&mut self, cells: impl IntoIterator<Item = PixelCell>) {
        self.cells.clear();
        for cell in cells {
            self.cells.insert((cell.x, cell.y), cell.color);
        }
        tracing::debug!(count = self.cells.len(), "cell set replaced");
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.cells.get(&(x, y)).copied()
    }

    /// Iterate the cells intersecting `region`, in lattice scan order.
    ///
    /// Cost is proportional to the number of visible lattice cells, not the
    /// size of the stored set.
    pub fn cells_in<'a>(
        &'a self,
        region: &VisibleRegion,
    ) -> impl Iterator<Item = PixelCell> + 'a {
        let (x0, y0, x1, y1) = region.cell_range();
        (y0..=y1).flat_map(move |y| {
            (x0..=x1).filter_map(move |x| {
                self.cells
                    .get(&(x, y))
                    .map(|&color| PixelCell { x, y, color })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraState;

    #[test]
    fn replace_overwrites_previous_set() {
        let mut field = CellField::new();
        field.replace([PixelCell::new(1, 1, Color::WHITE)]);
        field.replace([PixelCell::new(2, 2, Color::BLACK)]);
        assert_eq!(field.len(), 1);
        assert_eq!(field.get(1, 1), None);
        assert_eq!(field.get(2, 2), Some(Color::BLACK));
    }

    #[test]
    fn duplicate_coordinates_last_wins() {
        let mut field = CellField::new();
        field.replace([
            PixelCell::new(3, 4, Color::WHITE),
            PixelCell::new(3, 4, Color::BLACK),
        ]);
        assert_eq!(field.len(), 1);
        assert_eq!(field.get(3, 4), Some(Color::BLACK));
    }

    #[test]
    fn cells_in_filters_by_region() {
        let mut field = CellField::new();
        // Cell (0,0) spans world [0,50); cell (20,20) spans [1000,1050).
        field.replace([
            PixelCell::new(0, 0, Color::WHITE),
            PixelCell::new(20, 20, Color::BLACK),
        ]);

        let region = VisibleRegion::compute(&CameraState::default(), 500.0, 500.0);
        let visible: Vec<_> = field.cells_in(&region).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!((visible[0].x, visible[0].y), (0, 0));
    }

    #[test]
    fn cells_in_is_empty_for_empty_field() {
        let field = CellField::new();
        let region = VisibleRegion::compute(&CameraState::default(), 500.0, 500.0);
        assert_eq!(field.cells_in(&region).count(), 0);
    }
}
