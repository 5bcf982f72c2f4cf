//! Camera and plane geometry for the full-viewport backdrop.
//!
//! Matrices are column-major, ready for `uniformMatrix4fv`.

/// Vertical field of view in degrees.
pub const FOV_Y_DEG: f32 = 75.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 1000.0;
/// Camera distance from the plane along +z.
pub const EYE_Z: f32 = 2.0;

/// Container size in CSS pixels together with the effective pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        Self {
            css_width: css_width.max(0.0),
            css_height: css_height.max(0.0),
            pixel_ratio,
        }
    }

    /// Zero (or negative / NaN) width or height.
    pub fn is_degenerate(&self) -> bool {
        !(self.css_width > 0.0 && self.css_height > 0.0)
    }

    /// Drawing-buffer size in device pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        let scale = |css: f64| (css * self.pixel_ratio).round().max(0.0) as u32;
        (scale(self.css_width), scale(self.css_height))
    }

    /// Width over height, or `None` when there is no area to divide by.
    pub fn aspect(&self) -> Option<f32> {
        if self.is_degenerate() {
            None
        } else {
            Some((self.css_width / self.css_height) as f32)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    aspect: f32,
    projection: [f32; 16],
    view: [f32; 16],
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            aspect,
            projection: [0.0; 16],
            view: translation(0.0, 0.0, -EYE_Z),
        };
        camera.update_projection();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn projection(&self) -> &[f32; 16] {
        &self.projection
    }

    pub fn model_view(&self) -> &[f32; 16] {
        &self.view
    }

    /// Change the aspect ratio and rebuild the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    fn update_projection(&mut self) {
        self.projection = perspective(FOV_Y_DEG.to_radians(), self.aspect, NEAR, FAR);
    }

    /// World-space half extents visible on the `z = 0` plane.
    pub fn visible_half_extent(&self) -> (f32, f32) {
        let half_h = EYE_Z * (FOV_Y_DEG.to_radians() * 0.5).tan();
        (half_h * self.aspect, half_h)
    }

    /// Project a world point on the plane to normalized device coordinates.
    pub fn project(&self, x: f32, y: f32) -> (f32, f32) {
        let eye = mul_point(&self.view, [x, y, 0.0, 1.0]);
        let clip = mul_point(&self.projection, eye);
        (clip[0] / clip[3], clip[1] / clip[3])
    }
}

#[rustfmt::skip]
fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> [f32; 16] {
    let f = 1.0 / (fov_y * 0.5).tan();
    let range_inv = 1.0 / (near - far);
    [
        f / aspect, 0.0, 0.0, 0.0,
        0.0, f, 0.0, 0.0,
        0.0, 0.0, (near + far) * range_inv, -1.0,
        0.0, 0.0, 2.0 * near * far * range_inv, 0.0,
    ]
}

#[rustfmt::skip]
fn translation(x: f32, y: f32, z: f32) -> [f32; 16] {
    [
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        x, y, z, 1.0,
    ]
}

fn mul_point(m: &[f32; 16], p: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (row, slot) in out.iter_mut().enumerate() {
        *slot = (0..4).map(|col| m[col * 4 + row] * p[col]).sum();
    }
    out
}

/// Two triangles spanning a `width x height` plane centred on the origin,
/// as interleaved `(x, y)` pairs.
#[rustfmt::skip]
pub fn plane_vertices(width: f32, height: f32) -> [f32; 12] {
    let (hw, hh) = (width * 0.5, height * 0.5);
    [
        -hw, -hh, hw, -hh, hw, hh,
        -hw, -hh, hw, hh, -hw, hh,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_viewports() {
        assert!(Viewport::new(0.0, 0.0, 1.0).is_degenerate());
        assert!(Viewport::new(800.0, 0.0, 1.0).is_degenerate());
        assert!(Viewport::new(f64::NAN, 10.0, 1.0).is_degenerate());
        assert_eq!(Viewport::new(0.0, 600.0, 2.0).aspect(), None);
        assert_eq!(Viewport::new(800.0, 400.0, 1.0).aspect(), Some(2.0));
    }

    #[test]
    fn test_buffer_size_applies_ratio() {
        assert_eq!(Viewport::new(800.0, 600.0, 2.0).buffer_size(), (1600, 1200));
        assert_eq!(Viewport::new(100.5, 10.0, 1.0).buffer_size(), (101, 10));
    }

    #[test]
    fn test_projection_maps_visible_edge_to_ndc_one() {
        let camera = Camera::new(16.0 / 9.0);
        let (hw, hh) = camera.visible_half_extent();
        let (x, y) = camera.project(hw, hh);
        assert!((x - 1.0).abs() < 1e-4, "x={x}");
        assert!((y - 1.0).abs() < 1e-4, "y={y}");
    }

    #[test]
    fn test_set_aspect_updates_projection() {
        let mut camera = Camera::new(1.0);
        let before = *camera.projection();
        camera.set_aspect(2.0);
        assert_ne!(before, *camera.projection());
        assert!((camera.projection()[0] * 2.0 - before[0]).abs() < 1e-6);
    }

    #[test]
    fn test_plane_vertices_span_extent() {
        let v = plane_vertices(8.0, 4.0);
        let xs: Vec<f32> = v.iter().step_by(2).copied().collect();
        let ys: Vec<f32> = v.iter().skip(1).step_by(2).copied().collect();
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 4.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -2.0);
    }
}
