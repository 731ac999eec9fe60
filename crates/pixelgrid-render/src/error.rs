use thiserror::Error;

/// Failures while acquiring or driving the rasterization backend.
///
/// All of these are fatal to the affected surface only: the caller logs the
/// error and stops issuing draws, the process keeps running.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("GPU device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("surface has no default configuration for this adapter")]
    SurfaceConfig,
    #[error("surface texture unavailable: {0}")]
    SurfaceTexture(#[from] wgpu::SurfaceError),
}
