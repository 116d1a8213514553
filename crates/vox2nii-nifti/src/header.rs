use serde::{Deserialize, Serialize};
use vox2nii_core::constants::BITS_PER_VOXEL;
use vox2nii_core::{Axis, Dimensions, ValidationError};

use crate::defaults::HeaderDefaults;
use crate::format::{
    offsets, Endianness, Field, XformCode, DT_RGBA32, MAGIC_SINGLE_FILE, MAX_EXTENT, SPATIAL_RANK,
    VOX_OFFSET,
};

/// Quaternion and affine orientation fields.
///
/// All zero unless the caller supplies an orientation; readers treat an
/// all-zero block with unknown form codes as the default grid mapping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Orientation {
    /// quatern_b, quatern_c, quatern_d.
    pub quatern: [f32; 3],
    /// qoffset_x, qoffset_y, qoffset_z.
    pub qoffset: [f32; 3],
    pub srow_x: [f32; 4],
    pub srow_y: [f32; 4],
    pub srow_z: [f32; 4],
}

/// Plain value record for the fields this system writes. Every other
/// documented field is encoded as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFields {
    pub endianness: Endianness,
    pub dim: [i16; 8],
    pub datatype: i16,
    pub bitpix: i16,
    /// Slot 0 is qfac; slots 1..=7 are per-axis spacing.
    pub pixdim: [f32; 8],
    pub vox_offset: f32,
    pub scl_slope: f32,
    pub scl_inter: f32,
    pub xyzt_units: u8,
    pub qform_code: XformCode,
    pub sform_code: XformCode,
    pub orientation: Orientation,
    pub descrip: [u8; 80],
    pub aux_file: [u8; 24],
    pub magic: [u8; 4],
}

impl HeaderFields {
    /// Derive the field record for an RGBA volume of the given size.
    ///
    /// Rejects extents that overflow the signed 16-bit dim slots, and any
    /// datatype, bitpix or vox_offset that would disagree with a 32-bit
    /// RGBA payload placed directly after the header.
    pub fn from_defaults(
        dims: Dimensions,
        defaults: &HeaderDefaults,
    ) -> Result<Self, ValidationError> {
        if defaults.datatype_code != DT_RGBA32 {
            return Err(ValidationError::InconsistentField {
                field: offsets::DATATYPE.name,
                actual: defaults.datatype_code.to_string(),
                expected: DT_RGBA32.to_string(),
            });
        }
        if defaults.bits_per_voxel != BITS_PER_VOXEL {
            return Err(ValidationError::InconsistentField {
                field: offsets::BITPIX.name,
                actual: defaults.bits_per_voxel.to_string(),
                expected: BITS_PER_VOXEL.to_string(),
            });
        }
        if defaults.vox_offset != VOX_OFFSET as f32 {
            return Err(ValidationError::InconsistentField {
                field: offsets::VOX_OFFSET.name,
                actual: defaults.vox_offset.to_string(),
                expected: VOX_OFFSET.to_string(),
            });
        }

        Ok(Self {
            endianness: defaults.endianness,
            dim: [
                SPATIAL_RANK,
                extent_slot(dims, Axis::X)?,
                extent_slot(dims, Axis::Y)?,
                extent_slot(dims, Axis::Z)?,
                0,
                0,
                0,
                0,
            ],
            datatype: defaults.datatype_code,
            bitpix: defaults.bits_per_voxel,
            pixdim: defaults.pixel_spacing,
            vox_offset: defaults.vox_offset,
            scl_slope: defaults.scl_slope,
            scl_inter: defaults.scl_inter,
            xyzt_units: defaults.xyzt_units,
            qform_code: defaults.transform_codes.qform,
            sform_code: defaults.transform_codes.sform,
            orientation: defaults.orientation.unwrap_or_default(),
            descrip: text_field(offsets::DESCRIP, defaults.description.as_deref()),
            aux_file: text_field(offsets::AUX_FILE, defaults.aux_file.as_deref()),
            magic: MAGIC_SINGLE_FILE,
        })
    }

    pub fn width(&self) -> i16 {
        self.dim[1]
    }

    pub fn height(&self) -> i16 {
        self.dim[2]
    }

    pub fn depth(&self) -> i16 {
        self.dim[3]
    }

    pub fn description(&self) -> String {
        text_until_nul(&self.descrip)
    }

    pub fn aux_file_name(&self) -> String {
        text_until_nul(&self.aux_file)
    }
}

fn extent_slot(dims: Dimensions, axis: Axis) -> Result<i16, ValidationError> {
    let extent = dims.extent(axis);
    i16::try_from(extent).map_err(|_| ValidationError::FieldOverflow {
        field: match axis {
            Axis::X => "dim[1]",
            Axis::Y => "dim[2]",
            Axis::Z => "dim[3]",
        },
        value: i64::from(extent),
        max: i64::from(MAX_EXTENT),
    })
}

/// Pack optional text into a NUL-padded fixed-width slot.
///
/// Keeps printable ASCII only and drops backticks and dollar signs so the
/// stored text cannot trigger shell interpolation downstream. The last
/// byte always stays NUL.
fn text_field<const N: usize>(field: Field, text: Option<&str>) -> [u8; N] {
    debug_assert_eq!(field.width, N);
    let mut slot = [0u8; N];
    let Some(text) = text else {
        return slot;
    };

    let cleaned: Vec<u8> = text
        .chars()
        .filter(|c| (c.is_ascii_graphic() || *c == ' ') && !matches!(c, '`' | '$'))
        .map(|c| c as u8)
        .collect();
    if cleaned.len() != text.len() {
        log::debug!("{}: dropped characters not allowed in header text", field.name);
    }

    let capacity = N - 1;
    if cleaned.len() > capacity {
        log::debug!(
            "{}: truncated {} bytes to {}",
            field.name,
            cleaned.len(),
            capacity
        );
    }
    let len = cleaned.len().min(capacity);
    slot[..len].copy_from_slice(&cleaned[..len]);
    slot
}

fn text_until_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
