mod extent2d;
mod node;
mod volume;

pub use extent2d::Extent2d;
pub use node::VoxNode;
pub use volume::{GrayVolume, VolumeError, VoxVolume};
