use vox2nii_core::constants::{BITS_PER_VOXEL, BYTES_PER_VOXEL};

use crate::decode::decode_header;
use crate::error::HeaderReadError;
use crate::format::{DT_RGBA32, MAGIC_SINGLE_FILE, SPATIAL_RANK, VOX_OFFSET};
use crate::header::HeaderFields;

/// Check that a combined buffer is a single-file 3D RGBA image whose
/// payload length agrees with its header. Returns the decoded header.
pub fn validate_image(bytes: &[u8]) -> Result<HeaderFields, HeaderReadError> {
    if bytes.len() < VOX_OFFSET {
        return Err(HeaderReadError::TooSmall(bytes.len(), VOX_OFFSET));
    }

    let fields = decode_header(bytes)?;

    if fields.magic != MAGIC_SINGLE_FILE {
        return Err(HeaderReadError::NotSingleFile(fields.magic));
    }
    if fields.datatype != DT_RGBA32 || fields.bitpix != BITS_PER_VOXEL {
        return Err(HeaderReadError::UnsupportedDatatype {
            datatype: fields.datatype,
            bitpix: fields.bitpix,
        });
    }
    if fields.dim[0] != SPATIAL_RANK {
        return Err(HeaderReadError::UnexpectedRank {
            expected: SPATIAL_RANK,
            actual: fields.dim[0],
        });
    }
    if fields.vox_offset != VOX_OFFSET as f32 {
        return Err(HeaderReadError::InvalidVoxOffset(fields.vox_offset));
    }

    let mut voxels = 1usize;
    for &extent in &fields.dim[1..=3] {
        if extent <= 0 {
            return Err(HeaderReadError::InvalidExtent(extent));
        }
        voxels = voxels.saturating_mul(extent as usize);
    }

    let expected = voxels
        .saturating_mul(BYTES_PER_VOXEL)
        .saturating_add(VOX_OFFSET);
    if bytes.len() != expected {
        return Err(HeaderReadError::PayloadLength {
            expected,
            actual: bytes.len(),
        });
    }

    Ok(fields)
}
