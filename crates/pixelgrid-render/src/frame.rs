use crate::context::GraphicsContext;
use pixelgrid_core::Color;
use std::sync::Arc;

/// Context for a single frame of rendering.
///
/// Holds the acquired surface texture and the command encoder. The frame is
/// terminal per invocation: begin a pass, draw, then [`FrameContext::finish`]
/// submits and presents.
pub struct FrameContext {
    context: Arc<GraphicsContext>,
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: Option<wgpu::CommandEncoder>,
}

impl FrameContext {
    pub(crate) fn new(
        context: Arc<GraphicsContext>,
        texture: wgpu::SurfaceTexture,
        view: wgpu::TextureView,
        encoder: wgpu::CommandEncoder,
    ) -> Self {
        Self {
            context,
            texture,
            view,
            encoder: Some(encoder),
        }
    }

    /// Begin the frame's render pass, clearing to `background`.
    ///
    /// Draw order inside the pass is the z-order: grid first, pixels on top.
    pub fn clear_pass(&mut self, background: Color) -> wgpu::RenderPass<'_> {
        let encoder = self
            .encoder
            .as_mut()
            .expect("clear_pass called after finish");
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Viewer Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: background.r as f64,
                        g: background.g as f64,
                        b: background.b as f64,
                        a: background.a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }

    /// Submit the recorded commands and present the frame.
    pub fn finish(mut self) {
        if let Some(encoder) = self.encoder.take() {
            self.context.queue.submit(std::iter::once(encoder.finish()));
        }
        self.texture.present();
    }
}
