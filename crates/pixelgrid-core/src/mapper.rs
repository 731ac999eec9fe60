//! Pointer-to-canvas coordinate mapping.
//!
//! Input events arrive in client (window-system) coordinates; the viewer
//! works in canvas-local pixels. The mapper subtracts the surface's
//! on-screen origin once it is attached.

/// Maps client pixel coordinates to canvas-local pixel coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurfaceMapper {
    origin: Option<(f64, f64)>,
}

impl SurfaceMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the canvas origin in client coordinates.
    pub fn attach(&mut self, origin_x: f64, origin_y: f64) {
        self.origin = Some((origin_x, origin_y));
    }

    pub fn detach(&mut self) {
        self.origin = None;
    }

    pub fn is_attached(&self) -> bool {
        self.origin.is_some()
    }

    /// Convert client coordinates to canvas-local coordinates.
    ///
    /// Returns `(0, 0)` while no surface is attached; conversion before
    /// mount is a no-op, not an error.
    pub fn to_canvas_local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        match self.origin {
            Some((ox, oy)) => (client_x - ox, client_y - oy),
            None => (0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unattached_maps_to_zero() {
        let mapper = SurfaceMapper::new();
        assert_eq!(mapper.to_canvas_local(123.0, 456.0), (0.0, 0.0));
    }

    #[test]
    fn attached_subtracts_origin() {
        let mut mapper = SurfaceMapper::new();
        mapper.attach(10.0, 50.0);
        assert_eq!(mapper.to_canvas_local(110.0, 80.0), (100.0, 30.0));
    }

    #[test]
    fn detach_restores_fallback() {
        let mut mapper = SurfaceMapper::new();
        mapper.attach(5.0, 5.0);
        mapper.detach();
        assert_eq!(mapper.to_canvas_local(50.0, 50.0), (0.0, 0.0));
    }
}
