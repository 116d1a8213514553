use std::fmt;

use glam::{IVec3, UVec3};
use serde::{Deserialize, Serialize};

use crate::constants::BYTES_PER_VOXEL;
use crate::error::{CapacityError, ValidationError};

/// Voxel coordinate as supplied by the source model. Signed so that
/// negative input survives until bounds checking.
pub type VoxelCoord = IVec3;

/// Spatial axis of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "width",
            Self::Y => "height",
            Self::Z => "depth",
        })
    }
}

/// Validated volume extents. Every axis is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions(UVec3);

impl Dimensions {
    /// Validate raw extents. Zero or negative values are rejected.
    pub fn new(width: i64, height: i64, depth: i64) -> Result<Self, ValidationError> {
        Ok(Self(UVec3::new(
            positive_extent(Axis::X, width)?,
            positive_extent(Axis::Y, height)?,
            positive_extent(Axis::Z, depth)?,
        )))
    }

    pub fn width(self) -> u32 {
        self.0.x
    }

    pub fn height(self) -> u32 {
        self.0.y
    }

    pub fn depth(self) -> u32 {
        self.0.z
    }

    pub fn extent(self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.0.x,
            Axis::Y => self.0.y,
            Axis::Z => self.0.z,
        }
    }

    pub fn as_uvec3(self) -> UVec3 {
        self.0
    }

    /// Number of grid cells, or a capacity error if it overflows `usize`.
    pub fn voxel_count(self) -> Result<usize, CapacityError> {
        let count = u64::from(self.0.x)
            .checked_mul(u64::from(self.0.y))
            .and_then(|n| n.checked_mul(u64::from(self.0.z)));
        count
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| self.too_large())
    }

    /// Length of the dense RGBA buffer. Capped at `isize::MAX`, the
    /// largest allocation a `Vec` can hold.
    pub fn byte_len(self) -> Result<usize, CapacityError> {
        self.voxel_count()?
            .checked_mul(BYTES_PER_VOXEL)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or_else(|| self.too_large())
    }

    /// Map a source coordinate into the grid, or `None` if it lies outside.
    pub fn checked_coord(self, coord: VoxelCoord) -> Option<UVec3> {
        if coord.cmplt(IVec3::ZERO).any() {
            return None;
        }
        let coord = coord.as_uvec3();
        coord.cmplt(self.0).all().then_some(coord)
    }

    fn too_large(self) -> CapacityError {
        CapacityError::VolumeTooLarge {
            width: self.0.x,
            height: self.0.y,
            depth: self.0.z,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.0.x, self.0.y, self.0.z)
    }
}

fn positive_extent(axis: Axis, value: i64) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveExtent { axis, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::ExtentTooLarge {
        axis,
        value,
        max: i64::from(u32::MAX),
    })
}

/// One 8-bit-per-channel color. Byte layout matches the dense payload.
#[repr(C)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A palette-indexed voxel from the sparse list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparseVoxel {
    pub coord: VoxelCoord,
    pub index: u32,
}

impl SparseVoxel {
    pub fn new(x: i32, y: i32, z: i32, index: u32) -> Self {
        Self {
            coord: IVec3::new(x, y, z),
            index,
        }
    }
}

/// Index to color table. Slots may be empty; voxels that reference an
/// empty or missing slot are left transparent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Option<Rgba>>,
}

impl Palette {
    /// Build a dense palette where slot `n` holds the `n`th color.
    pub fn from_colors(colors: impl IntoIterator<Item = Rgba>) -> Self {
        Self {
            entries: colors.into_iter().map(Some).collect(),
        }
    }

    /// Build a palette that may contain holes.
    pub fn from_entries(entries: Vec<Option<Rgba>>) -> Self {
        Self { entries }
    }

    pub fn get(&self, index: u32) -> Option<Rgba> {
        let slot = usize::try_from(index).ok()?;
        self.entries.get(slot).copied().flatten()
    }

    /// Number of slots, including empty ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_reject_non_positive() {
        assert!(matches!(
            Dimensions::new(0, 1, 1),
            Err(ValidationError::NonPositiveExtent {
                axis: Axis::X,
                value: 0
            })
        ));
        assert!(matches!(
            Dimensions::new(1, -3, 1),
            Err(ValidationError::NonPositiveExtent {
                axis: Axis::Y,
                value: -3
            })
        ));
        assert!(matches!(
            Dimensions::new(1, 1, 0),
            Err(ValidationError::NonPositiveExtent { axis: Axis::Z, .. })
        ));
    }

    #[test]
    fn test_dimensions_reject_beyond_u32() {
        let result = Dimensions::new(1, 1, i64::from(u32::MAX) + 1);
        assert!(matches!(
            result,
            Err(ValidationError::ExtentTooLarge { axis: Axis::Z, .. })
        ));
    }

    #[test]
    fn test_byte_len() {
        let dims = Dimensions::new(2, 3, 4).expect("valid dims");
        assert_eq!(dims.voxel_count(), Ok(24));
        assert_eq!(dims.byte_len(), Ok(96));
        assert_eq!(dims.to_string(), "2x3x4");
    }

    #[test]
    fn test_byte_len_overflow_is_capacity_error() {
        let max = i64::from(u32::MAX);
        let dims = Dimensions::new(max, max, max).expect("extents fit u32");
        assert!(matches!(
            dims.byte_len(),
            Err(CapacityError::VolumeTooLarge { .. })
        ));
    }

    #[test]
    fn test_checked_coord() {
        let dims = Dimensions::new(2, 3, 4).expect("valid dims");
        assert_eq!(
            dims.checked_coord(IVec3::new(1, 2, 3)),
            Some(UVec3::new(1, 2, 3))
        );
        assert_eq!(dims.checked_coord(IVec3::new(2, 0, 0)), None);
        assert_eq!(dims.checked_coord(IVec3::new(0, 3, 0)), None);
        assert_eq!(dims.checked_coord(IVec3::new(0, 0, 4)), None);
        assert_eq!(dims.checked_coord(IVec3::new(-1, 0, 0)), None);
    }

    #[test]
    fn test_palette_lookup_with_holes() {
        let palette = Palette::from_entries(vec![
            Some(Rgba::new(1, 2, 3, 4)),
            None,
            Some(Rgba::new(5, 6, 7, 8)),
        ]);
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.get(0), Some(Rgba::new(1, 2, 3, 4)));
        assert_eq!(palette.get(1), None);
        assert_eq!(palette.get(2), Some(Rgba::new(5, 6, 7, 8)));
        assert_eq!(palette.get(3), None);
    }

    #[test]
    fn test_rgba_is_four_bytes() {
        assert_eq!(std::mem::size_of::<Rgba>(), BYTES_PER_VOXEL);
        assert_eq!(bytemuck::bytes_of(&Rgba::new(9, 8, 7, 6)), &[9, 8, 7, 6]);
    }
}
