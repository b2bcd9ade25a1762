use std::fmt;

use glam::UVec3;
use log::{debug, trace};

use crate::{Cube, Extent2d, Intensity, SideShift, VoxNode, VoxelTrait};

/// Failure modes of the volume API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeError {
    /// A plane buffer whose length does not match `width * height`.
    ShapeMismatch { expected: usize, actual: usize },
    /// An X/Y coordinate beyond the fixed construction extent.
    OutOfBounds { x: u32, y: u32 },
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "plane buffer: expected {expected} pixels, got {actual}")
            }
            Self::OutOfBounds { x, y } => {
                write!(f, "position ({x}, {y}) outside the volume extent")
            }
        }
    }
}

impl std::error::Error for VolumeError {}

/// A compressed, mutable 3D voxel volume assembled from 2D plane slices.
///
/// Content is stored in an adaptive octree whose nodes split and coalesce
/// as voxels are written, so large contiguous regions of one value cost a
/// single node. The X/Y extent is fixed at construction; the depth axis
/// grows on demand as larger Z indices are touched.
///
/// # Examples
///
/// ```rust
/// use voxstack::GrayVolume;
///
/// let mut volume = GrayVolume::new(64, 64);
/// assert_eq!(volume.node_count(), 1);
///
/// volume.set(10, 20, 3, 0xff).unwrap();
/// assert_eq!(volume.get(10, 20, 3).unwrap(), 0xff);
/// assert_eq!(volume.get(10, 20, 4).unwrap(), 0);
/// assert!(volume.node_count() > 1);
/// ```
pub struct VoxVolume<T: VoxelTrait> {
    root: VoxNode<T>,
    shift: SideShift,
    extent: Extent2d,
}

/// The shipped single-channel 8-bit grayscale volume.
pub type GrayVolume = VoxVolume<Intensity>;

impl<T: VoxelTrait> VoxVolume<T> {
    /// Creates an empty volume with the given fixed X/Y extent.
    ///
    /// Every voxel reads as `T::default()` (black); the side length starts
    /// at the smallest power of two covering both extents.
    ///
    /// # Panics
    /// - If either extent is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "volume extents must be positive");

        Self {
            root: VoxNode::default(),
            shift: SideShift::covering(width, height),
            extent: Extent2d::new(width, height),
        }
    }

    /// The X/Y extent fixed at construction.
    #[must_use]
    pub const fn extent(&self) -> Extent2d {
        self.extent
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.extent.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.extent.height
    }

    #[must_use]
    pub const fn side_shift(&self) -> SideShift {
        self.shift
    }

    /// Current side length in voxels; grows with the largest Z touched.
    #[must_use]
    pub const fn side(&self) -> u64 {
        self.shift.side()
    }

    /// Writes one voxel. Grows the tree depth first when `z` is beyond the
    /// current side length.
    pub fn set(&mut self, x: u32, y: u32, z: u32, value: T) -> Result<(), VolumeError> {
        if !self.extent.contains(x, y) {
            return Err(VolumeError::OutOfBounds { x, y });
        }

        self.grow_to_cover(z);
        self.write(x, y, z, value);

        Ok(())
    }

    /// Reads one voxel. Depth growth changes the addressing scheme, so a
    /// read beyond the current side length grows the tree as a side effect
    /// before returning the (necessarily default) value.
    pub fn get(&mut self, x: u32, y: u32, z: u32) -> Result<T, VolumeError> {
        if !self.extent.contains(x, y) {
            return Err(VolumeError::OutOfBounds { x, y });
        }

        self.grow_to_cover(z);

        let cube = Cube::new(UVec3::new(x, y, z), self.shift.shift());

        Ok(self.root.get(cube))
    }

    /// Writes one full plane at depth `z` from a row-major buffer of
    /// exactly `width * height` pixels.
    ///
    /// Fails with [`VolumeError::ShapeMismatch`] before any mutation when
    /// the buffer length is wrong; each pixel is then an independent tree
    /// descent.
    pub fn set_plane(&mut self, z: u32, pixels: &[T]) -> Result<(), VolumeError> {
        let expected = self.extent.area();

        if pixels.len() != expected {
            return Err(VolumeError::ShapeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        trace!(
            "set_plane z={z} ({}x{})",
            self.extent.width, self.extent.height
        );

        self.grow_to_cover(z);

        for y in 0..self.extent.height {
            let row = (y * self.extent.width) as usize;

            for x in 0..self.extent.width {
                self.write(x, y, z, pixels[row + x as usize]);
            }
        }

        Ok(())
    }

    /// Reads one full plane at depth `z` into a dense row-major buffer of
    /// `width * height` pixels.
    #[must_use]
    pub fn get_plane(&mut self, z: u32) -> Vec<T> {
        trace!(
            "get_plane z={z} ({}x{})",
            self.extent.width, self.extent.height
        );

        self.grow_to_cover(z);

        let mut pixels = Vec::with_capacity(self.extent.area());

        for y in 0..self.extent.height {
            for x in 0..self.extent.width {
                let cube = Cube::new(UVec3::new(x, y, z), self.shift.shift());
                pixels.push(self.root.get(cube));
            }
        }

        pixels
    }

    /// Total structural node count — the compression metric. A fresh or
    /// fully-uniform volume reports 1.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Resets the entire volume to one value. The side length is kept.
    pub fn fill(&mut self, value: T) {
        self.root = VoxNode::Uniform(value);
    }

    /// Resets the entire volume to the default (black) value.
    pub fn clear(&mut self) {
        self.fill(T::default());
    }

    /// Whether the whole volume currently holds a single value.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        matches!(self.root, VoxNode::Uniform(_))
    }

    /// Whether the whole volume currently holds the default (black) value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.root, VoxNode::Uniform(value) if value == T::default())
    }

    /// Resident size of the structure in bytes, heap included.
    #[must_use]
    pub fn memory_size(&self) -> usize {
        // The root node is stored inline, so its own size is already part
        // of the container's.
        std::mem::size_of::<Self>() + self.root.memory_size()
            - std::mem::size_of::<VoxNode<T>>()
    }

    fn grow_to_cover(&mut self, z: u32) {
        while !self.shift.contains(z) {
            let root = std::mem::take(&mut self.root);

            // The old root keeps octant 0 of the new level; the other
            // seven octants are fresh zero-valued volume. Degenerate roots
            // are rendered in their compact variant directly.
            self.root = match root {
                VoxNode::Uniform(value) if value == T::default() => VoxNode::Uniform(value),
                VoxNode::Uniform(value) => {
                    let mut values = [T::default(); 8];
                    values[0] = value;

                    VoxNode::Octants(values)
                }
                root => {
                    let mut children: [VoxNode<T>; 8] =
                        std::array::from_fn(|_| VoxNode::default());
                    children[0] = root;

                    VoxNode::Branch(Box::new(children))
                }
            };

            self.shift.grow();

            debug!("volume depth grown to side {}", self.side());
        }
    }

    fn write(&mut self, x: u32, y: u32, z: u32, value: T) {
        let cube = Cube::new(UVec3::new(x, y, z), self.shift.shift());

        self.root = std::mem::take(&mut self.root).set(cube, value);
    }
}

impl<T: VoxelTrait> fmt::Display for VoxVolume<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "VoxVolume {}x{}, side: {}, nodes: {}",
            self.extent.width,
            self.extent.height,
            self.side(),
            self.node_count()
        )?;

        self.root.dump(f, UVec3::ZERO, self.shift.shift(), 0)
    }
}
