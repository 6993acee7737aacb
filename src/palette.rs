use glam::*;

use crate::Error;

/// The shared table of instance transforms referenced by each splat's transform index.
///
/// Matrices are stored transposed, the layout expected by the GPU mirror. [`TransformPalette::get`]
/// and [`TransformPalette::set`] take and return untransposed matrices, so callers never see the
/// stored layout unless they ask for [`TransformPalette::raw`].
///
/// Slot 0 always exists and is the identity unless explicitly overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformPalette {
    transforms: Vec<Mat4>,
}

impl TransformPalette {
    /// The maximum number of transforms, bounded by the 16 bit transform index.
    pub const CAPACITY: usize = u16::MAX as usize + 1;

    /// The default number of preallocated slots.
    pub const DEFAULT_ALLOC: usize = 512;

    /// Create a new palette holding only the identity.
    pub fn new() -> Self {
        let mut transforms = Vec::with_capacity(Self::DEFAULT_ALLOC);
        transforms.push(Mat4::IDENTITY);
        Self { transforms }
    }

    /// Append a transform, returning its index.
    pub fn add_transform(&mut self, transform: Mat4) -> Result<u16, Error> {
        if self.transforms.len() >= Self::CAPACITY {
            return Err(Error::PaletteFull {
                capacity: Self::CAPACITY,
            });
        }

        let index = self.transforms.len() as u16;
        self.transforms.push(transform.transpose());
        Ok(index)
    }

    /// Overwrite the transform at `index`.
    pub fn set(&mut self, index: u16, transform: Mat4) {
        match self.transforms.get_mut(index as usize) {
            Some(slot) => *slot = transform.transpose(),
            None => log::error!(
                "Transform index {index} out of range, palette has {}",
                self.transforms.len()
            ),
        }
    }

    /// Get the transform at `index`.
    pub fn get(&self, index: u16) -> Option<Mat4> {
        self.transforms
            .get(index as usize)
            .map(|transform| transform.transpose())
    }

    /// Get the last transform.
    pub fn last(&self) -> Mat4 {
        self.transforms
            .last()
            .map(|transform| transform.transpose())
            .unwrap_or(Mat4::IDENTITY)
    }

    /// Get the stored transposed matrices.
    pub fn raw(&self) -> &[Mat4] {
        &self.transforms
    }

    /// Get the stored transposed matrices as bytes for uploading.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.transforms)
    }

    /// Get the number of transforms.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Check if the palette is empty, which never happens after construction.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Default for TransformPalette {
    fn default() -> Self {
        Self::new()
    }
}
