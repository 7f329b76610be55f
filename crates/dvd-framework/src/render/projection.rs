use glam::Mat4;

use crate::coords::Viewport;

/// Orthographic projection from logical pixels to clip space.
///
/// Maps `(0, 0)` to the top-left corner and `(width, height)` to the
/// bottom-right corner of the surface. Depth is unused; geometry sits at z = 0.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    matrix: Mat4,
}

impl Projection {
    pub fn orthographic(viewport: Viewport) -> Self {
        let w = viewport.width.max(1.0);
        let h = viewport.height.max(1.0);
        Self {
            matrix: Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0),
        }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    pub(crate) fn columns(&self) -> [[f32; 4]; 4] {
        self.matrix.to_cols_array_2d()
    }
}
