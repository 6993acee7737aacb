use glam::*;

/// A transform made of a position, a rotation and a scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub pos: Vec3,
    pub rot: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);

    /// Create a new transform.
    pub const fn new(pos: Vec3, rot: Quat, scale: Vec3) -> Self {
        Self { pos, rot, scale }
    }

    /// Create a transform only translating by `pos`.
    pub const fn from_pos(pos: Vec3) -> Self {
        Self::new(pos, Quat::IDENTITY, Vec3::ONE)
    }

    /// Decompose an affine matrix into a transform.
    ///
    /// Shear in `matrix` is lost.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rot, pos) = matrix.to_scale_rotation_translation();
        Self { pos, rot, scale }
    }

    /// Get the world matrix.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rot, self.pos)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The interactive manipulation handle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pivot {
    pub transform: Transform,
}

impl Pivot {
    /// Create a new pivot.
    pub const fn new(transform: Transform) -> Self {
        Self { transform }
    }
}
