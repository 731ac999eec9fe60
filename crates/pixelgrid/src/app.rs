//! Viewer application: event loop glue between input, camera and renderer.
//!
//! All state mutation happens on the event-loop thread. Mutations set a
//! dirty flag instead of rendering inline, so any number of camera, resize
//! or data changes within one event batch coalesce into a single redraw.

use crate::data;
use pixelgrid_core::camera::CameraState;
use pixelgrid_core::cells::{CellField, PixelCell};
use pixelgrid_core::config::{
    BASE_LINE_WIDTH, DEFAULT_BACKGROUND_COLOR, DEFAULT_GRID_COLOR,
};
use pixelgrid_core::geometry;
use pixelgrid_core::mapper::SurfaceMapper;
use pixelgrid_core::region::VisibleRegion;
use pixelgrid_core::store::{CameraStore, SaveDebouncer};
use pixelgrid_render::{
    GraphicsContext, GridRenderer, PixelRenderer, SurfaceContext, ViewTransform,
};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::event::{MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

/// Canvas pixels per wheel "line" on line-based mice.
const WHEEL_LINE_PIXELS: f64 = 20.0;
/// Zoom factor per scroll pixel for ctrl-wheel (trackpad pinch) input.
const PINCH_ZOOM_FACTOR: f64 = 0.01;
/// Poll interval while a fetch or a debounced save is outstanding.
const WAKE_INTERVAL: Duration = Duration::from_millis(100);

/// Window, surface and the two compiled pipelines.
struct Gpu {
    window: Arc<Window>,
    surface: SurfaceContext,
    grid: GridRenderer,
    pixels: PixelRenderer,
}

pub struct ViewerApp {
    store: Box<dyn CameraStore>,
    camera: CameraState,
    cells: CellField,
    mapper: SurfaceMapper,
    debouncer: SaveDebouncer,
    last_saved: Option<CameraState>,
    fetch: Option<Receiver<Vec<PixelCell>>>,
    gpu: Option<Gpu>,
    /// Set when backend acquisition failed; the surface stays inert.
    render_disabled: bool,
    ctrl_held: bool,
    cursor: (f64, f64),
    dirty: bool,
}

impl ViewerApp {
    pub fn new(store: Box<dyn CameraStore>) -> Self {
        // Restore the last-viewed camera before the first render.
        let camera = store.load().unwrap_or_default();
        tracing::info!(?camera, "camera restored");

        Self {
            store,
            camera,
            cells: CellField::new(),
            mapper: SurfaceMapper::new(),
            debouncer: SaveDebouncer::default(),
            last_saved: None,
            fetch: None,
            gpu: None,
            render_disabled: false,
            ctrl_held: false,
            cursor: (0.0, 0.0),
            dirty: false,
        }
    }

    fn mark_camera_changed(&mut self) {
        self.debouncer.mark_changed(Instant::now());
        self.dirty = true;
    }

    fn save_camera(&mut self) {
        if self.last_saved == Some(self.camera) {
            return;
        }
        match self.store.save(&self.camera) {
            Ok(()) => {
                self.last_saved = Some(self.camera);
                tracing::debug!(?self.camera, "camera state saved");
            }
            Err(err) => tracing::warn!(%err, "camera save failed"),
        }
    }

    fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        let (dx, dy) = scroll_to_pixels(delta);
        let (canvas_x, canvas_y) = self.mapper.to_canvas_local(self.cursor.0, self.cursor.1);
        apply_scroll(&mut self.camera, canvas_x, canvas_y, dx, dy, self.ctrl_held);
        self.mark_camera_changed();
    }

    fn render(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let (width, height) = gpu.surface.size();
        let region = VisibleRegion::compute(&self.camera, width as f64, height as f64);
        let lines = geometry::grid_lines(&region);
        let quads = geometry::cell_quads(&self.cells, &region);
        gpu.grid.upload(&lines);
        gpu.pixels.upload(&quads);

        let transform = ViewTransform::for_camera(&self.camera, width as f32, height as f32);

        let mut frame = match gpu.surface.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                tracing::error!(%err, "frame acquisition failed");
                return;
            }
        };
        {
            let mut pass = frame.clear_pass(DEFAULT_BACKGROUND_COLOR);
            let brightness = geometry::grid_brightness(self.camera.scale);
            gpu.grid.render(
                &mut pass,
                &transform,
                BASE_LINE_WIDTH * self.camera.scale as f32,
                DEFAULT_GRID_COLOR.dimmed(brightness),
            );
            gpu.pixels.render(&mut pass, &transform);
        }
        frame.finish();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() || self.render_disabled {
            return;
        }

        let window = match event_loop
            .create_window(Window::default_attributes().with_title("pixelgrid"))
        {
            Ok(window) => Arc::new(window),
            Err(err) => {
                tracing::error!(%err, "window creation failed, rendering disabled");
                self.render_disabled = true;
                return;
            }
        };

        let size = window.inner_size();
        let gpu = GraphicsContext::new_sync()
            .and_then(|context| {
                let surface =
                    SurfaceContext::new(context.clone(), window.clone(), size.width, size.height)?;
                let format = surface.format();
                Ok(Gpu {
                    window: window.clone(),
                    grid: GridRenderer::new(context.clone(), format),
                    pixels: PixelRenderer::new(context, format),
                    surface,
                })
            });

        match gpu {
            Ok(gpu) => {
                // The surface covers the whole window client area.
                self.mapper.attach(0.0, 0.0);
                self.gpu = Some(gpu);
            }
            Err(err) => {
                tracing::error!(%err, "rasterization backend unavailable, rendering disabled");
                self.render_disabled = true;
                return;
            }
        }

        self.fetch = Some(data::spawn_fetch());
        self.dirty = true;
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.save_camera();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.surface.resized(size.width, size.height);
                }
                self.dirty = true;
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.ctrl_held = modifiers.state().control_key();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.handle_scroll(delta);
            }
            WindowEvent::PinchGesture { delta, .. } => {
                let (x, y) = self.mapper.to_canvas_local(self.cursor.0, self.cursor.1);
                self.camera.zoom_at(x, y, delta);
                self.mark_camera_changed();
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Poll the single-shot fetch without blocking the loop.
        if let Some(rx) = &self.fetch {
            match rx.try_recv() {
                Ok(cells) => {
                    self.cells.replace(cells);
                    self.fetch = None;
                    self.dirty = true;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("cell fetch ended without data");
                    self.fetch = None;
                }
            }
        }

        // Deferred, debounced camera persistence.
        let now = Instant::now();
        if self.debouncer.due(now) {
            self.save_camera();
            self.debouncer.flushed();
        }

        // One redraw per batch of mutations.
        if self.dirty {
            if let Some(gpu) = &self.gpu {
                gpu.window.request_redraw();
            }
            self.dirty = false;
        }

        let pending_work = self.fetch.is_some() || self.debouncer.pending();
        event_loop.set_control_flow(if pending_work {
            ControlFlow::WaitUntil(now + WAKE_INTERVAL)
        } else {
            ControlFlow::Wait
        });
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.save_camera();
    }
}

/// Convert a wheel delta to canvas pixels.
///
/// Uses the browser sign convention the camera expects: positive y means
/// scrolling down (content moves up, offset grows).
fn scroll_to_pixels(delta: MouseScrollDelta) -> (f64, f64) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (
            -x as f64 * WHEEL_LINE_PIXELS,
            -y as f64 * WHEEL_LINE_PIXELS,
        ),
        MouseScrollDelta::PixelDelta(pos) => (-pos.x, -pos.y),
    }
}

/// Route a scroll to pan or zoom.
///
/// With the pinch modifier held the vertical delta becomes a zoom toward the
/// cursor; otherwise both axes pan.
fn apply_scroll(
    camera: &mut CameraState,
    canvas_x: f64,
    canvas_y: f64,
    dx: f64,
    dy: f64,
    pinch: bool,
) {
    if pinch {
        camera.zoom_at(canvas_x, canvas_y, -dy * PINCH_ZOOM_FACTOR);
    } else {
        camera.pan_by(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_scroll_pans() {
        let mut camera = CameraState::new(100.0, 100.0, 1.0);
        apply_scroll(&mut camera, 0.0, 0.0, 30.0, -10.0, false);
        assert_eq!(camera.offset_x, 130.0);
        assert_eq!(camera.offset_y, 90.0);
    }

    #[test]
    fn pinch_scroll_zooms_at_cursor() {
        let mut camera = CameraState::default();
        // Scroll up 50 px with the modifier held: zoom in by 1.5x.
        apply_scroll(&mut camera, 250.0, 250.0, 0.0, -50.0, true);
        assert!((camera.scale - 1.5).abs() < 1e-9);
        let (wx, wy) = camera.world_at(250.0, 250.0);
        assert!((wx - 250.0).abs() < 1e-6);
        assert!((wy - 250.0).abs() < 1e-6);
    }

    #[test]
    fn line_delta_scales_to_pixels() {
        let (dx, dy) = scroll_to_pixels(MouseScrollDelta::LineDelta(0.0, 1.0));
        assert_eq!(dx, 0.0);
        assert_eq!(dy, -WHEEL_LINE_PIXELS);
    }

    #[test]
    fn pixel_delta_passes_through_negated() {
        let (dx, dy) = scroll_to_pixels(MouseScrollDelta::PixelDelta(
            winit::dpi::PhysicalPosition::new(4.0, -8.0),
        ));
        assert_eq!((dx, dy), (-4.0, 8.0));
    }
}
