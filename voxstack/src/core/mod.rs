mod cube;
mod side_shift;

pub use cube::Cube;
pub use side_shift::{MAX_SIDE_SHIFT, SideShift};
