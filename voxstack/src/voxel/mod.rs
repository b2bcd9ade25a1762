mod traits;

pub use traits::{Intensity, VoxelTrait};
