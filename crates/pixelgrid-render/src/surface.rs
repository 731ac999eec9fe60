use crate::context::GraphicsContext;
use crate::error::RenderError;
use crate::frame::FrameContext;
use std::sync::Arc;

/// Window surface plus its current configuration.
///
/// Resizes are recorded by [`SurfaceContext::resized`] and applied lazily at
/// the start of the next frame, so a burst of resize events costs one
/// reconfigure.
pub struct SurfaceContext {
    context: Arc<GraphicsContext>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    pending_resize: Option<(u32, u32)>,
}

impl SurfaceContext {
    /// Create and configure a surface for a window-like target.
    pub fn new(
        context: Arc<GraphicsContext>,
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let surface = context.instance.create_surface(target)?;
        let config = surface
            .get_default_config(&context.adapter, width.max(1), height.max(1))
            .ok_or(RenderError::SurfaceConfig)?;
        surface.configure(&context.device, &config);

        tracing::debug!(format = ?config.format, width, height, "surface configured");

        Ok(Self {
            context,
            surface,
            config,
            pending_resize: None,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Surface size in physical pixels, after any pending resize.
    pub fn size(&self) -> (u32, u32) {
        match self.pending_resize {
            Some(size) => size,
            None => (self.config.width, self.config.height),
        }
    }

    pub fn graphics_context(&self) -> &Arc<GraphicsContext> {
        &self.context
    }

    /// Record a display size change; applied on the next `begin_frame`.
    pub fn resized(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.pending_resize = Some((width, height));
        }
    }

    /// Start a frame: apply pending resizes and acquire the surface texture.
    ///
    /// A lost or outdated surface is reconfigured and retried once before
    /// the error propagates.
    pub fn begin_frame(&mut self) -> Result<FrameContext, RenderError> {
        if let Some((width, height)) = self.pending_resize.take() {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.context.device, &self.config);
        }

        let texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                self.surface.configure(&self.context.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(err) => return Err(err.into()),
        };

        let view = texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        Ok(FrameContext::new(self.context.clone(), texture, view, encoder))
    }
}
