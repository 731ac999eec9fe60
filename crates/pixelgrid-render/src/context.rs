use crate::error::RenderError;
use std::sync::Arc;

/// A shared graphics context.
///
/// Wraps the wgpu instance/adapter/device/queue quartet behind an `Arc` so
/// the surface and both pipelines can hold cheap clones. Acquisition is
/// fallible by design: a machine without a usable GPU backend gets a
/// [`RenderError`] back, not a panic, and the viewer degrades to an inert
/// surface.
pub struct GraphicsContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GraphicsContext {
    /// Creates a new graphics context synchronously.
    ///
    /// See [`GraphicsContext::new`] for the asynchronous version.
    pub fn new_sync() -> Result<Arc<Self>, RenderError> {
        pollster::block_on(Self::new())
    }

    /// Creates a new graphics context asynchronously.
    pub async fn new() -> Result<Arc<Self>, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                ..Default::default()
            })
            .await?;

        tracing::info!(adapter = %adapter.get_info().name, "graphics context ready");

        Ok(Arc::new(Self {
            instance,
            adapter,
            device,
            queue,
        }))
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
