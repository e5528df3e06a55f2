use alloc::vec::Vec;

use crate::provider::Placeable;
use crate::types::round_to_i32;
use crate::{IntOffset, LayerTransform, Placement, StackPosition};

/// Vertical stacks shift by this much less than horizontal ones.
const VERTICAL_OFFSET_RATIO: f32 = 0.8;

/// Z index of the front card; back cards use `-relative_index`.
pub const FRONT_Z_INDEX: f32 = 1.0;

/// A single visible card, measured and ready to be placed.
///
/// Built fresh for every item of the visible window on every layout pass.
#[derive(Clone, Debug)]
pub struct MeasuredItem<K, P> {
    pub key: K,
    /// Index in the backing collection.
    pub index: usize,
    /// Position inside the visible window; 0 is the front card.
    pub relative_index: usize,
    pub drag_offset: IntOffset,
    /// Scale of this card (always 1.0 for the front card).
    pub scale: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    pub placeables: Vec<P>,
    pub offset_factor: f32,
    pub stack_position: StackPosition,
}

impl<K, P: Placeable> MeasuredItem<K, P> {
    pub fn is_front(&self) -> bool {
        self.relative_index == 0
    }

    /// Computes the placement of a single content piece of this item.
    pub fn placement_for(&self, placeable: &P) -> Placement {
        if self.is_front() {
            let drag_enabled = placeable.is_drag_enabled();
            let offset = if drag_enabled {
                self.drag_offset
            } else {
                IntOffset::ZERO
            };
            let rotation = if drag_enabled { self.rotation } else { 0.0 };
            return Placement {
                offset,
                z_index: FRONT_Z_INDEX,
                layer: LayerTransform {
                    rotation_z: rotation,
                    ..LayerTransform::IDENTITY
                },
            };
        }

        let width = placeable.width();
        let height = placeable.height();
        let shrink = 1.0 - self.scale;
        Placement {
            offset: stacked_offset(
                width,
                height,
                self.relative_index,
                self.offset_factor,
                self.stack_position,
            ),
            z_index: -(self.relative_index as f32),
            layer: LayerTransform {
                scale_x: self.scale,
                scale_y: self.scale,
                translation_x: -(width as f32) / 2.0 * shrink,
                translation_y: -(height as f32) / 2.0 * shrink,
                rotation_z: 0.0,
            },
        }
    }

    /// Emits a placement for every content piece of this item, in measurement order.
    pub fn place(&self, mut f: impl FnMut(&P, Placement)) {
        for placeable in &self.placeables {
            f(placeable, self.placement_for(placeable));
        }
    }
}

/// Offset of a back card at `relative_index` for content of the given size.
///
/// Offsets grow linearly with depth. Vertical positions are scaled by 0.8 so the stack does not
/// run away as quickly as a horizontal one.
pub fn stacked_offset(
    width: u32,
    height: u32,
    relative_index: usize,
    offset_factor: f32,
    stack_position: StackPosition,
) -> IntOffset {
    let depth = relative_index as f32;
    match stack_position {
        StackPosition::Left => {
            IntOffset::new(-round_to_i32(width as f32 * depth * offset_factor), 0)
        }
        StackPosition::Right => {
            IntOffset::new(round_to_i32(width as f32 * depth * offset_factor), 0)
        }
        StackPosition::Top => IntOffset::new(
            0,
            -round_to_i32(height as f32 * depth * offset_factor * VERTICAL_OFFSET_RATIO),
        ),
        StackPosition::Bottom => IntOffset::new(
            0,
            round_to_i32(height as f32 * depth * offset_factor * VERTICAL_OFFSET_RATIO),
        ),
    }
}
