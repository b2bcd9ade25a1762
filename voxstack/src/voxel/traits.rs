use std::fmt::Debug;

/// Value stored in a single voxel.
///
/// Blanket-implemented for any `Copy + Default + PartialEq + Debug` type.
/// The `Default` value is the empty (black) content a fresh volume is
/// filled with.
pub trait VoxelTrait: Clone + Copy + PartialEq + Default + Debug {}

impl<T> VoxelTrait for T where T: Clone + Copy + PartialEq + Default + Debug {}

/// Single-channel 8-bit intensity, the shipped voxel type.
pub type Intensity = u8;
