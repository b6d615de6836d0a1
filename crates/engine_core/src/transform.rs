//! Affine transform builders and the accumulated transform carried by scene nodes.

use glam::{Mat4, Vec3, Vec4};

/// Translation matrix.
pub fn translation(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

/// Non-uniform scale matrix.
pub fn scaling(factors: Vec3) -> Mat4 {
    Mat4::from_scale(factors)
}

/// Rodrigues rotation of `angle` radians about `axis`.
///
/// The axis must already be unit length; it is not renormalized here.
pub fn rotation(angle: f32, axis: Vec3) -> Mat4 {
    debug_assert!(axis.is_normalized(), "rotation axis must be unit length");

    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let Vec3 { x, y, z } = axis;

    Mat4::from_cols(
        Vec4::new(t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0),
        Vec4::new(t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0),
        Vec4::new(t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0),
        Vec4::W,
    )
}

/// Transform accumulated by builder calls and consumed by a display pass.
///
/// Absent means identity. Every builder call right-multiplies onto the
/// accumulated matrix, so the last call is the first applied to a vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingTransform {
    matrix: Option<Mat4>,
}

impl PendingTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Right-compose `m` onto the accumulated matrix.
    pub fn compose(&mut self, m: Mat4) {
        self.matrix = Some(match self.matrix {
            Some(acc) => acc * m,
            None => m,
        });
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.compose(translation(offset));
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.compose(scaling(factors));
    }

    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        self.compose(rotation(angle, axis));
    }

    /// The accumulated matrix, if any builder call happened since the last take.
    pub fn get(&self) -> Option<Mat4> {
        self.matrix
    }

    /// Move the accumulated matrix out, leaving the transform absent.
    pub fn take(&mut self) -> Option<Mat4> {
        self.matrix.take()
    }

    pub fn is_absent(&self) -> bool {
        self.matrix.is_none()
    }

    /// Apply the accumulated transform to a point (identity when absent).
    pub fn apply(&self, point: Vec3) -> Vec3 {
        match self.matrix {
            Some(m) => m.transform_point3(point),
            None => point,
        }
    }
}

/// Global transform stack used while traversing a scene graph.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self::with_root(Mat4::IDENTITY)
    }

    pub fn with_root(root: Mat4) -> Self {
        Self {
            current: root,
            saved: Vec::with_capacity(16),
        }
    }

    /// Save the current global transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the most recently saved transform. Returns false on underflow.
    pub fn pop(&mut self) -> bool {
        match self.saved.pop() {
            Some(m) => {
                self.current = m;
                true
            }
            None => {
                log::warn!("MatrixStack::pop called with nothing saved");
                false
            }
        }
    }

    /// Right-multiply `m` onto the current global transform.
    pub fn multiply(&mut self, m: Mat4) {
        self.current *= m;
    }

    pub fn current(&self) -> Mat4 {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}
