//! End-to-end viewport pipeline tests.
//!
//! These drive the full camera → visible-region → geometry path the way a
//! frame does, checking that grid lines, pixel quads and input coordinates
//! agree with each other.

use pixelgrid_core::camera::CameraState;
use pixelgrid_core::cells::{CellField, PixelCell};
use pixelgrid_core::config::BASE_CELL_SIZE;
use pixelgrid_core::geometry::{cell_quads, grid_lines};
use pixelgrid_core::region::VisibleRegion;
use pixelgrid_core::{Color, store::{CameraStore, MemoryStore}};

#[test]
fn frame_pipeline_at_identity() {
    let camera = CameraState::default();
    let region = VisibleRegion::compute(&camera, 500.0, 500.0);

    let lines = grid_lines(&region);
    assert_eq!(lines.len(), 24);

    let mut field = CellField::new();
    field.replace([
        PixelCell::new(0, 0, Color::WHITE),
        PixelCell::new(5, 5, Color::BLACK),
        // Outside the 550-unit region.
        PixelCell::new(50, 50, Color::WHITE),
    ]);
    let quads = cell_quads(&field, &region);
    assert_eq!(quads.len(), 2);
}

#[test]
fn geometry_tracks_camera_after_pan_and_zoom() {
    let mut camera = CameraState::default();
    camera.pan_by(500.0, 250.0);
    camera.zoom_at(100.0, 100.0, 0.5);

    let region = VisibleRegion::compute(&camera, 800.0, 600.0);

    // Region stays lattice-aligned and keeps covering the viewport.
    assert_eq!(region.start_x % BASE_CELL_SIZE, 0.0);
    assert_eq!(region.start_y % BASE_CELL_SIZE, 0.0);
    assert!(region.start_x <= camera.offset_x);
    assert!(region.end_x >= region.start_x + 800.0 / camera.scale);

    // Every grid line stays inside the region bounds.
    for line in grid_lines(&region) {
        assert!(line.start.x >= region.start_x as f32 && line.end.x <= region.end_x as f32);
        assert!(line.start.y >= region.start_y as f32 && line.end.y <= region.end_y as f32);
    }
}

#[test]
fn visible_quads_shrink_when_zooming_in() {
    let mut field = CellField::new();
    let mut cells = Vec::new();
    for x in 0..40 {
        for y in 0..40 {
            cells.push(PixelCell::new(x, y, Color::WHITE));
        }
    }
    field.replace(cells);

    let zoomed_out = CameraState::new(0.0, 0.0, 0.5);
    let zoomed_in = CameraState::new(0.0, 0.0, 2.0);
    let region_out = VisibleRegion::compute(&zoomed_out, 500.0, 500.0);
    let region_in = VisibleRegion::compute(&zoomed_in, 500.0, 500.0);

    assert!(cell_quads(&field, &region_out).len() > cell_quads(&field, &region_in).len());
}

#[test]
fn session_restore_round_trip() {
    let store = MemoryStore::new();

    // First session: user pans and zooms, state is saved on idle.
    let mut camera = store.load().unwrap_or_default();
    camera.pan_by(240.0, 360.0);
    camera.zoom_at(100.0, 100.0, 0.2);
    store.save(&camera).unwrap();

    // Next session starts where the last one left off.
    let restored = store.load().unwrap_or_default();
    assert_eq!(restored, camera);

    let region_a = VisibleRegion::compute(&camera, 640.0, 480.0);
    let region_b = VisibleRegion::compute(&restored, 640.0, 480.0);
    assert_eq!(region_a, region_b);
}
