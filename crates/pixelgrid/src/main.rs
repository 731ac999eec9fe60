//! Infinite-canvas pixel grid viewer.

mod app;
mod data;

use app::ViewerApp;
use pixelgrid_core::store::{CameraStore, JsonFileStore, MemoryStore};
use winit::event_loop::{ControlFlow, EventLoop};

fn main() {
    pixelgrid_core::logging::init();

    let store: Box<dyn CameraStore> = match JsonFileStore::default_path() {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => {
            tracing::warn!("no data directory available, camera state will not persist");
            Box::new(MemoryStore::new())
        }
    };

    let event_loop = EventLoop::new().expect("failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ViewerApp::new(store);
    event_loop.run_app(&mut app).expect("event loop error");
}
