use std::ops::Range;

use glam::*;
use half::f16;
use rayon::prelude::*;

use crate::{SplatState, TransformPalette, parallel};

/// The number of spherical harmonics coefficients per splat, DC first then the rest, 3 channels
/// of 16 coefficients.
pub const SH_LEN: usize = 3 * 16;

/// The zeroth order spherical harmonics constant.
pub const SH_C0: f32 = 0.282_094_8;

/// The attributes of a single splat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splat {
    pub pos: Vec3,
    pub rot: Quat,
    pub scale: Vec3,
    pub sh: [f32; SH_LEN],
    pub opacity: f32,
}

impl Splat {
    /// Create a splat at `pos` with a flat `rgb` color in \[0, 1\].
    pub fn new(pos: Vec3, rgb: Vec3) -> Self {
        let mut sh = [0.0; SH_LEN];
        sh[..3].copy_from_slice(&((rgb - Vec3::splat(0.5)) / SH_C0).to_array());

        Self {
            pos,
            rot: Quat::IDENTITY,
            scale: Vec3::ONE,
            sh,
            opacity: 1.0,
        }
    }

    /// Get the DC color in \[0, 1\].
    pub fn rgb(&self) -> Vec3 {
        Vec3::from_slice(&self.sh[..3]) * SH_C0 + Vec3::splat(0.5)
    }
}

/// The number of splats per state class.
///
/// Each splat is counted once, deleted before selected before hidden.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplatCounts {
    pub selected: u32,
    pub hidden: u32,
    pub deleted: u32,
}

/// A collection of splats, the store every edit operation mutates.
///
/// The collection is append only from the edit operations' point of view: indices stay stable,
/// [`Splats::truncate`] only removes a range at the back.
#[derive(Debug, Clone, Default)]
pub struct Splats {
    pos: Vec<Vec3>,
    rot: Vec<Quat>,
    scale: Vec<Vec3>,
    sh: Vec<[f32; SH_LEN]>,
    opacity: Vec<f32>,
    state: Vec<SplatState>,
    transform_index: Vec<u16>,

    /// The instance transforms referenced by [`Splats::transform_index`].
    pub palette: TransformPalette,

    counts: SplatCounts,
    state_mirror: Vec<u32>,
    color_mirror: Vec<[f16; 4]>,
    selection_bounds: Option<Option<(Vec3, Vec3)>>,
}

impl Splats {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from splats, all in the normal state and on the identity transform.
    pub fn from_splats(splats: impl IntoIterator<Item = Splat>) -> Self {
        let mut this = Self::new();
        for splat in splats {
            this.push(splat);
        }

        log::debug!("Created splats with {} elements", this.len());

        this.update_state();
        this.update_feature_dc(&(0..this.len() as u32).collect::<Vec<_>>());
        this
    }

    /// Push a splat without updating the derived data.
    fn push(&mut self, splat: Splat) {
        self.pos.push(splat.pos);
        self.rot.push(splat.rot);
        self.scale.push(splat.scale);
        self.sh.push(splat.sh);
        self.opacity.push(splat.opacity);
        self.state.push(SplatState::NORMAL);
        self.transform_index.push(0);
    }

    /// Get the number of splats.
    pub fn len(&self) -> usize {
        self.pos.len()
    }

    /// Check if there are no splats.
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Get the splat at `index`.
    pub fn get(&self, index: usize) -> Option<Splat> {
        Some(Splat {
            pos: *self.pos.get(index)?,
            rot: self.rot[index],
            scale: self.scale[index],
            sh: self.sh[index],
            opacity: self.opacity[index],
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.pos
    }

    pub fn rotations(&self) -> &[Quat] {
        &self.rot
    }

    pub fn scales(&self) -> &[Vec3] {
        &self.scale
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacity
    }

    pub fn sh(&self) -> &[[f32; SH_LEN]] {
        &self.sh
    }

    /// Get the spherical harmonics mutably.
    ///
    /// Call [`Splats::update_feature_dc`] after changing the DC terms.
    pub fn sh_mut(&mut self) -> &mut [[f32; SH_LEN]] {
        &mut self.sh
    }

    pub fn state(&self) -> &[SplatState] {
        &self.state
    }

    /// Get the states mutably.
    ///
    /// Call [`Splats::update_state`] after changing them.
    pub fn state_mut(&mut self) -> &mut [SplatState] {
        &mut self.state
    }

    pub fn transform_index(&self) -> &[u16] {
        &self.transform_index
    }

    /// Get the transform indices mutably.
    ///
    /// Call [`Splats::update_transform_index`] after changing them.
    pub fn transform_index_mut(&mut self) -> &mut [u16] {
        &mut self.transform_index
    }

    /// Get the transform indices and the palette at the same time.
    pub fn transform_index_and_palette_mut(&mut self) -> (&mut [u16], &mut TransformPalette) {
        (&mut self.transform_index, &mut self.palette)
    }

    /// Get the states and the spherical harmonics at the same time.
    pub fn state_and_sh_mut(&mut self) -> (&mut [SplatState], &mut [[f32; SH_LEN]]) {
        (&mut self.state, &mut self.sh)
    }

    /// Get the per state counts computed by the last [`Splats::update_state`].
    pub fn counts(&self) -> SplatCounts {
        self.counts
    }

    pub fn num_selected(&self) -> u32 {
        self.counts.selected
    }

    pub fn num_hidden(&self) -> u32 {
        self.counts.hidden
    }

    pub fn num_deleted(&self) -> u32 {
        self.counts.deleted
    }

    pub fn has_selection(&self) -> bool {
        self.counts.selected > 0
    }

    /// Recompute the counts and the packed state mirror.
    pub fn update_state(&mut self) {
        self.counts = self
            .state
            .par_iter()
            .fold(SplatCounts::default, |mut counts, state| {
                if state.is_deleted() {
                    counts.deleted += 1;
                } else if state.is_selected() {
                    counts.selected += 1;
                } else if state.is_hidden() {
                    counts.hidden += 1;
                }
                counts
            })
            .reduce(SplatCounts::default, |a, b| SplatCounts {
                selected: a.selected + b.selected,
                hidden: a.hidden + b.hidden,
                deleted: a.deleted + b.deleted,
            });

        self.pack_state_mirror();
        self.make_selection_bounds_dirty();
    }

    /// Repack the transform indices into the state mirror.
    pub fn update_transform_index(&mut self) {
        self.pack_state_mirror();
        self.make_selection_bounds_dirty();
    }

    /// Repack the DC color of the splats at `indices` into the half precision color mirror.
    pub fn update_feature_dc(&mut self, indices: &[u32]) {
        self.color_mirror.resize(self.len(), [f16::ZERO; 4]);

        let sh = &self.sh;
        parallel::for_each_at(&mut self.color_mirror, indices, |k, pod| {
            let dc = &sh[indices[k] as usize];
            *pod = [
                f16::from_f32(dc[0]),
                f16::from_f32(dc[1]),
                f16::from_f32(dc[2]),
                f16::ZERO,
            ];
        });
    }

    fn pack_state_mirror(&mut self) {
        self.state
            .par_iter()
            .zip(self.transform_index.par_iter())
            .map(|(state, index)| pack_state(*state, *index))
            .collect_into_vec(&mut self.state_mirror);
    }

    /// Get the packed state mirror, state in bits 0 to 8 and transform index in bits 16 to 32.
    pub fn state_mirror(&self) -> &[u32] {
        &self.state_mirror
    }

    /// Get the state as one byte per splat for uploading.
    pub fn state_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.state)
    }

    /// Get the packed state mirror as bytes for uploading.
    pub fn state_mirror_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.state_mirror)
    }

    /// Get the half precision DC color mirror.
    pub fn color_mirror(&self) -> &[[f16; 4]] {
        &self.color_mirror
    }

    pub fn color_mirror_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_mirror)
    }

    /// Mark the selection bounding box for recomputation.
    pub fn make_selection_bounds_dirty(&mut self) {
        self.selection_bounds = None;
    }

    /// Get the bounding box of the selected splats in the space of `world`.
    ///
    /// Each splat is first moved by its palette transform. Returns [`None`] if nothing is
    /// selected.
    pub fn selection_bounds(&mut self, world: Mat4) -> Option<(Vec3, Vec3)> {
        let local = match self.selection_bounds {
            Some(bounds) => bounds,
            None => {
                let bounds = self.compute_selection_bounds();
                self.selection_bounds = Some(bounds);
                bounds
            }
        }?;

        let (min, max) = (0..8)
            .map(|corner| {
                let pick = |bit: u32, axis: usize| {
                    if corner & bit == 0 {
                        local.0[axis]
                    } else {
                        local.1[axis]
                    }
                };
                world.transform_point3(vec3(pick(1, 0), pick(2, 1), pick(4, 2)))
            })
            .fold(
                (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)),
                |(min, max), p| (min.min(p), max.max(p)),
            );

        Some((min, max))
    }

    fn compute_selection_bounds(&self) -> Option<(Vec3, Vec3)> {
        self.state
            .iter()
            .zip(&self.pos)
            .zip(&self.transform_index)
            .filter(|((state, _), _)| state.is_selected())
            .map(|((_, pos), index)| {
                self.palette
                    .get(*index)
                    .unwrap_or(Mat4::IDENTITY)
                    .transform_point3(*pos)
            })
            .fold(None, |bounds, p| match bounds {
                None => Some((p, p)),
                Some((min, max)) => Some((p.min(min), p.max(max))),
            })
    }

    /// Copy the splats at `indices` of `other` to the back of this collection.
    ///
    /// Returns the appended range.
    pub fn merge(&mut self, other: &Splats, indices: &[u32]) -> Range<u32> {
        self.append(other.gather(indices))
    }

    /// Copy the splats at `indices` of this collection to its back.
    ///
    /// Returns the appended range.
    pub fn duplicate(&mut self, indices: &[u32]) -> Range<u32> {
        let gathered = self.gather(indices);
        self.append(gathered)
    }

    /// Remove `range` from the back of the collection.
    ///
    /// Returns `false` and leaves the collection untouched if `range` does not end at the back.
    pub fn truncate(&mut self, range: Range<u32>) -> bool {
        if range.end as usize != self.len() || range.start > range.end {
            log::error!(
                "Cannot truncate {range:?}, collection has {} elements",
                self.len()
            );
            return false;
        }

        let len = range.start as usize;
        self.pos.truncate(len);
        self.rot.truncate(len);
        self.scale.truncate(len);
        self.sh.truncate(len);
        self.opacity.truncate(len);
        self.state.truncate(len);
        self.transform_index.truncate(len);
        self.color_mirror.truncate(len);

        self.update_state();
        true
    }

    /// Copy the splats at `indices` into a new collection sharing no palette.
    fn gather(&self, indices: &[u32]) -> Splats {
        let pick = |i: &u32| *i as usize;

        Splats {
            pos: indices.iter().map(|i| self.pos[pick(i)]).collect(),
            rot: indices.iter().map(|i| self.rot[pick(i)]).collect(),
            scale: indices.iter().map(|i| self.scale[pick(i)]).collect(),
            sh: indices.iter().map(|i| self.sh[pick(i)]).collect(),
            opacity: indices.iter().map(|i| self.opacity[pick(i)]).collect(),
            state: indices.iter().map(|i| self.state[pick(i)]).collect(),
            transform_index: indices
                .iter()
                .map(|i| self.transform_index[pick(i)])
                .collect(),
            ..Default::default()
        }
    }

    fn append(&mut self, mut other: Splats) -> Range<u32> {
        let start = self.len() as u32;

        self.pos.append(&mut other.pos);
        self.rot.append(&mut other.rot);
        self.scale.append(&mut other.scale);
        self.sh.append(&mut other.sh);
        self.opacity.append(&mut other.opacity);
        self.state.append(&mut other.state);
        self.transform_index.append(&mut other.transform_index);

        let range = start..self.len() as u32;
        log::debug!("Appended {} splats at {range:?}", range.len());

        self.update_state();
        self.update_feature_dc(&range.clone().collect::<Vec<_>>());
        range
    }
}

/// Pack a state and a transform index the way the GPU mirror stores them.
pub const fn pack_state(state: SplatState, transform_index: u16) -> u32 {
    state.bits() as u32 | (transform_index as u32) << 16
}
