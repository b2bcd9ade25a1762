pub mod core;
pub mod spatial;
pub mod voxel;

pub use self::core::{Cube, SideShift};
pub use spatial::{Extent2d, GrayVolume, VolumeError, VoxNode, VoxVolume};
pub use voxel::{Intensity, VoxelTrait};
