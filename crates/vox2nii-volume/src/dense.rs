use glam::UVec3;
use vox2nii_core::constants::BYTES_PER_VOXEL;
use vox2nii_core::{CapacityError, Dimensions, Rgba};

/// Linear voxel index of an in-bounds coordinate: x varies fastest, then y, then z.
/// The byte offset of the voxel is this value times `BYTES_PER_VOXEL`.
pub fn linear_index(dims: Dimensions, coord: UVec3) -> usize {
    let width = dims.width() as usize;
    let height = dims.height() as usize;
    coord.x as usize + coord.y as usize * width + coord.z as usize * width * height
}

/// Fully materialized RGBA grid. Cells start transparent black.
///
/// The buffer may carry zeroed room in front of the payload so a header
/// can be written in place and the whole buffer returned without a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseVolume {
    dims: Dimensions,
    data: Vec<u8>,
    start: usize,
}

impl DenseVolume {
    /// Allocate a zero-filled volume.
    pub fn zeroed(dims: Dimensions) -> Result<Self, CapacityError> {
        Self::with_header_room(dims, 0)
    }

    /// Allocate a zero-filled volume preceded by `room` zero bytes. This is
    /// the only allocation made during rasterization, and a failed
    /// allocation is reported instead of aborting.
    pub fn with_header_room(dims: Dimensions, room: usize) -> Result<Self, CapacityError> {
        let payload = dims.byte_len()?;
        let len = payload
            .checked_add(room)
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or(CapacityError::OutputTooLarge { payload })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|e| {
            log::warn!("Could not allocate {} bytes for a {} volume: {}", len, dims, e);
            CapacityError::VolumeTooLarge {
                width: dims.width(),
                height: dims.height(),
                depth: dims.depth(),
            }
        })?;
        data.resize(len, 0);

        Ok(Self {
            dims,
            data,
            start: room,
        })
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// The RGBA payload, without any header room.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[self.start..]
    }

    /// The zeroed bytes in front of the payload.
    pub fn header_room_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.start]
    }

    /// The whole buffer: header room followed by the payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The payload viewed as one color per cell.
    pub fn voxels(&self) -> &[Rgba] {
        bytemuck::cast_slice(self.as_bytes())
    }

    pub fn get(&self, coord: UVec3) -> Option<Rgba> {
        if !coord.cmplt(self.dims.as_uvec3()).all() {
            return None;
        }
        self.voxels().get(linear_index(self.dims, coord)).copied()
    }

    /// Overwrite one cell. The coordinate must already be bounds-checked.
    pub(crate) fn write(&mut self, coord: UVec3, color: Rgba) {
        let offset = self.start + linear_index(self.dims, coord) * BYTES_PER_VOXEL;
        self.data[offset..offset + BYTES_PER_VOXEL].copy_from_slice(bytemuck::bytes_of(&color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_index_axis_order() {
        let dims = Dimensions::new(2, 3, 4).expect("dims");
        assert_eq!(linear_index(dims, UVec3::new(0, 0, 0)), 0);
        assert_eq!(linear_index(dims, UVec3::new(1, 0, 0)), 1);
        assert_eq!(linear_index(dims, UVec3::new(0, 1, 0)), 2);
        assert_eq!(linear_index(dims, UVec3::new(0, 0, 1)), 6);
        assert_eq!(linear_index(dims, UVec3::new(1, 2, 3)), 23);
    }

    #[test]
    fn test_zeroed_volume() {
        let dims = Dimensions::new(3, 2, 5).expect("dims");
        let volume = DenseVolume::zeroed(dims).expect("alloc");
        assert_eq!(volume.as_bytes().len(), 3 * 2 * 5 * 4);
        assert!(volume.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(volume.voxels().len(), 30);
    }

    #[test]
    fn test_write_places_channels_at_byte_offset() {
        let dims = Dimensions::new(2, 2, 2).expect("dims");
        let mut volume = DenseVolume::zeroed(dims).expect("alloc");
        volume.write(UVec3::new(1, 1, 1), Rgba::new(11, 22, 33, 44));

        let bytes = volume.as_bytes();
        assert_eq!(&bytes[28..32], &[11, 22, 33, 44]);
        assert!(bytes[..28].iter().all(|&b| b == 0));
        assert_eq!(
            volume.get(UVec3::new(1, 1, 1)),
            Some(Rgba::new(11, 22, 33, 44))
        );
        assert_eq!(volume.get(UVec3::new(2, 0, 0)), None);
    }

    #[test]
    fn test_oversized_volume_is_capacity_error() {
        let max = i64::from(u32::MAX);
        let dims = Dimensions::new(max, max, 2).expect("dims");
        assert!(matches!(
            DenseVolume::zeroed(dims),
            Err(CapacityError::VolumeTooLarge { .. })
        ));
    }

    #[test]
    fn test_header_room_precedes_payload() {
        let dims = Dimensions::new(2, 1, 1).expect("dims");
        let mut volume = DenseVolume::with_header_room(dims, 3).expect("alloc");
        volume.write(UVec3::new(1, 0, 0), Rgba::new(1, 2, 3, 4));
        volume.header_room_mut().copy_from_slice(&[9, 9, 9]);

        assert_eq!(volume.as_bytes(), &[0, 0, 0, 0, 1, 2, 3, 4]);
        assert_eq!(volume.voxels()[1], Rgba::new(1, 2, 3, 4));
        assert_eq!(volume.into_bytes(), vec![9, 9, 9, 0, 0, 0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_unallocatable_volume_is_capacity_error() {
        let dims = Dimensions::new(32_767, 32_767, 32_767).expect("dims");
        assert!(matches!(
            DenseVolume::zeroed(dims),
            Err(CapacityError::VolumeTooLarge {
                width: 32_767,
                ..
            })
        ));
    }
}
