//! Pixelgrid Render
//!
//! wgpu-based rendering for the pixelgrid viewer: a shared graphics context,
//! a window surface wrapper, and the two per-frame pipelines (grid lines,
//! pixel quads). Shader programs are compiled once at surface initialization;
//! vertex/instance buffers are rebuilt every frame from the visible region.

mod context;
mod error;
mod frame;
mod grid_renderer;
mod pixel_renderer;
mod surface;
mod transform;

pub use context::GraphicsContext;
pub use error::RenderError;
pub use frame::FrameContext;
pub use grid_renderer::GridRenderer;
pub use pixel_renderer::PixelRenderer;
pub use surface::SurfaceContext;
pub use transform::ViewTransform;
