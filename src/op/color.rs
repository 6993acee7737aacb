use glam::*;

use crate::{EntityId, SH_C0, SH_LEN, Scene, SplatState, Splats, op::target_splats, parallel};

/// The floor of `1 - weight` when inverting a paint blend.
pub const PAINT_UNDO_EPSILON: f32 = 1.0 / 256.0;

/// The whole entity color adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAdjustment {
    pub albedo_color: Vec3,
    pub brightness: f32,
    pub transparency: f32,
    pub white_point: f32,
    pub black_point: f32,
}

impl Default for ColorAdjustment {
    fn default() -> Self {
        Self {
            albedo_color: Vec3::ONE,
            brightness: 0.0,
            transparency: 1.0,
            white_point: 1.0,
            black_point: 0.0,
        }
    }
}

/// An operation swapping the color adjustment of an entity.
#[derive(Debug, Clone)]
pub struct SetColorAdjustmentOp {
    target: EntityId,
    old: ColorAdjustment,
    new: ColorAdjustment,
}

impl SetColorAdjustmentOp {
    pub fn new(target: EntityId, old: ColorAdjustment, new: ColorAdjustment) -> Self {
        Self { target, old, new }
    }

    pub fn apply(&self, scene: &mut Scene) {
        self.set(scene, self.new);
    }

    pub fn undo(&self, scene: &mut Scene) {
        self.set(scene, self.old);
    }

    fn set(&self, scene: &mut Scene, adjustment: ColorAdjustment) {
        match scene.get_mut(self.target) {
            Some(entity) => entity.color_adjustment = adjustment,
            None => log::warn!("Entity {:?} is gone, color adjustment skipped", self.target),
        }
    }
}

/// The paint brush color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintColor {
    /// The color in \[0, 1\].
    pub color: Vec3,
    /// The weight of [`PaintColor::color`] in the blend, in \[0, 1\].
    pub mix_weight: f32,
}

impl Default for PaintColor {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            mix_weight: 0.5,
        }
    }
}

/// An operation blending a paint color into the DC color of captured splats.
///
/// Undo inverts the blend, which loses precision as the weight approaches 1.
#[derive(Debug, Clone)]
pub struct PaintColorOp {
    target: EntityId,
    paint: PaintColor,
    indices: Vec<u32>,
    was_painted: Vec<bool>,
}

impl PaintColorOp {
    /// Create a new paint operation on the splats `pred` holds for.
    pub fn new(
        target: EntityId,
        splats: &Splats,
        paint: PaintColor,
        pred: impl Fn(usize) -> bool + Sync,
    ) -> Self {
        let indices = parallel::build_index(splats.len(), pred);
        let state = splats.state();
        let was_painted = indices
            .iter()
            .map(|&i| state[i as usize].contains(SplatState::PAINT))
            .collect();

        log::debug!("Paint captured {} splats", indices.len());

        Self {
            target,
            paint,
            indices,
            was_painted,
        }
    }

    pub fn paint(&self) -> PaintColor {
        self.paint
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn apply(&self, scene: &mut Scene) {
        let Some(splats) = target_splats(scene, self.target) else {
            return;
        };

        let PaintColor { color, mix_weight } = self.paint;
        let (state, sh) = splats.state_and_sh_mut();
        parallel::for_each_at(state, &self.indices, |_, state| {
            state.insert(SplatState::PAINT);
        });
        parallel::for_each_at(sh, &self.indices, |_, sh| {
            let rgb = to_rgb(sh) * (1.0 - mix_weight) + color * mix_weight;
            from_rgb(sh, rgb);
        });

        splats.update_state();
        splats.update_feature_dc(&self.indices);
    }

    pub fn undo(&self, scene: &mut Scene) {
        let Some(splats) = target_splats(scene, self.target) else {
            return;
        };

        let PaintColor { color, mix_weight } = self.paint;
        let was_painted = &self.was_painted;
        let (state, sh) = splats.state_and_sh_mut();
        parallel::for_each_at(state, &self.indices, |k, state| {
            if !was_painted[k] {
                state.remove(SplatState::PAINT);
            }
        });
        parallel::for_each_at(sh, &self.indices, |_, sh| {
            let rgb =
                (to_rgb(sh) - color * mix_weight) / (1.0 - mix_weight).max(PAINT_UNDO_EPSILON);
            from_rgb(sh, rgb);
        });

        splats.update_state();
        splats.update_feature_dc(&self.indices);
    }
}

/// Convert the DC coefficients to a color.
fn to_rgb(sh: &[f32; SH_LEN]) -> Vec3 {
    Vec3::from_slice(&sh[..3]) * SH_C0 + Vec3::splat(0.5)
}

/// Write a color back into the DC coefficients.
fn from_rgb(sh: &mut [f32; SH_LEN], rgb: Vec3) {
    sh[..3].copy_from_slice(&((rgb - Vec3::splat(0.5)) / SH_C0).to_array());
}
