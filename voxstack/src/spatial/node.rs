use std::fmt;

use glam::UVec3;

use crate::{Cube, VoxelTrait};

/// A node of the adaptive octree.
///
/// The variant is always the most compact one consistent with the content:
/// a [`VoxNode::Branch`] never holds eight `Uniform` children, and a
/// [`VoxNode::Octants`] never holds eight equal values.
#[derive(Debug)]
pub enum VoxNode<T: VoxelTrait> {
    /// The whole cube is one value, regardless of cube size.
    Uniform(T),
    /// The eight immediate octants are each one value. Carries no size
    /// information of its own; the caller's shift decides whether a write
    /// has to split it further.
    Octants([T; 8]),
    /// Eight owned children, each independently any variant.
    Branch(Box<[VoxNode<T>; 8]>),
}

impl<T: VoxelTrait> Default for VoxNode<T> {
    fn default() -> Self {
        Self::Uniform(T::default())
    }
}

impl<T: VoxelTrait> VoxNode<T> {
    pub fn get(&self, cube: Cube) -> T {
        match self {
            Self::Uniform(value) => *value,
            Self::Octants(values) => values[cube.child_index()],
            Self::Branch(children) => {
                let (index, rest) = cube.descend();
                children[index].get(rest)
            }
        }
    }

    /// Writes `value` into the sub-volume addressed by `cube` and returns
    /// the node that should now occupy this slot, which may differ in
    /// variant from the receiver.
    #[must_use]
    pub fn set(self, cube: Cube, value: T) -> Self {
        match self {
            Self::Uniform(current) => {
                if cube.is_unit() || value == current {
                    return Self::Uniform(value);
                }

                // Split into a branch seeded with the original value, then
                // delegate the write into it.
                let children: [VoxNode<T>; 8] = std::array::from_fn(|_| Self::Uniform(current));

                Self::Branch(Box::new(children)).set(cube, value)
            }
            Self::Octants(mut values) => {
                let index = cube.child_index();

                if values[index] == value {
                    return Self::Octants(values);
                }

                if cube.shift == 1 {
                    // The octants are unit voxels: store in place, or
                    // coalesce if the write makes all eight equal.
                    values[index] = value;

                    if values.iter().all(|v| *v == value) {
                        Self::Uniform(value)
                    } else {
                        Self::Octants(values)
                    }
                } else {
                    // The addressed octant spans more than one voxel and
                    // can no longer be described by a single value.
                    let children: [VoxNode<T>; 8] =
                        std::array::from_fn(|i| Self::Uniform(values[i]));

                    Self::Branch(Box::new(children)).set(cube, value)
                }
            }
            Self::Branch(mut children) => {
                let (index, rest) = cube.descend();

                children[index] = std::mem::take(&mut children[index]).set(rest, value);

                Self::coalesce(children)
            }
        }
    }

    // Checked once per level on the way back up a write: eight uniform
    // children collapse into a single leaf.
    fn coalesce(children: Box<[VoxNode<T>; 8]>) -> Self {
        let mut values = [T::default(); 8];

        for (slot, child) in values.iter_mut().zip(children.iter()) {
            match child {
                Self::Uniform(value) => *slot = *value,
                _ => return Self::Branch(children),
            }
        }

        if values.iter().all(|v| *v == values[0]) {
            Self::Uniform(values[0])
        } else {
            Self::Octants(values)
        }
    }

    /// Total structural node count: one for a uniform leaf, eight for an
    /// octant leaf, one plus the children for a branch.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Uniform(_) => 1,
            Self::Octants(_) => 8,
            Self::Branch(children) => 1 + children.iter().map(VoxNode::node_count).sum::<usize>(),
        }
    }

    pub fn memory_size(&self) -> usize {
        match self {
            Self::Uniform(_) | Self::Octants(_) => std::mem::size_of::<Self>(),
            Self::Branch(children) => {
                std::mem::size_of::<Self>()
                    + children.iter().map(VoxNode::memory_size).sum::<usize>()
            }
        }
    }

    pub(crate) fn dump(
        &self,
        f: &mut fmt::Formatter<'_>,
        origin: UVec3,
        shift: u8,
        depth: usize,
    ) -> fmt::Result {
        let prefix = "  ".repeat(depth + 1);
        let side = 1u64 << shift;

        match self {
            Self::Uniform(value) => writeln!(
                f,
                "{prefix}Uniform @({}, {}, {}) side {side} value: {value:?}",
                origin.x, origin.y, origin.z
            ),
            Self::Octants(values) => writeln!(
                f,
                "{prefix}Octants @({}, {}, {}) side {side} values: {values:?}",
                origin.x, origin.y, origin.z
            ),
            Self::Branch(children) => {
                writeln!(
                    f,
                    "{prefix}Branch @({}, {}, {}) side {side}",
                    origin.x, origin.y, origin.z
                )?;

                let half = (side / 2) as u32;

                for (index, child) in children.iter().enumerate() {
                    let index = index as u32;
                    let child_origin = UVec3::new(
                        origin.x + (index & 1) * half,
                        origin.y + ((index >> 1) & 1) * half,
                        origin.z + ((index >> 2) & 1) * half,
                    );

                    child.dump(f, child_origin, shift - 1, depth + 1)?;
                }

                Ok(())
            }
        }
    }
}
