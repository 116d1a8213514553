//! NIfTI-1 single-file layout: a 348-byte documented header, a 4-byte
//! extension flag, then the voxel payload.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Value of the leading `sizeof_hdr` field.
pub const HEADER_SIZE: usize = 348;

/// Length of the extension flag trailer after the documented header.
pub const EXTENSION_FLAG_SIZE: usize = 4;

/// Header plus extension flag. The payload starts here.
pub const VOX_OFFSET: usize = HEADER_SIZE + EXTENSION_FLAG_SIZE;

/// Magic for header and data combined in one file.
pub const MAGIC_SINGLE_FILE: [u8; 4] = *b"n+1\0";

/// Magic for a detached `.hdr`/`.img` pair. Accepted when reading only.
pub const MAGIC_PAIR: [u8; 4] = *b"ni1\0";

/// Datatype code for 32-bit RGBA voxels.
pub const DT_RGBA32: i16 = 2304;

/// Largest extent a signed 16-bit dim slot can hold.
pub const MAX_EXTENT: u32 = i16::MAX as u32;

/// Number of spatial axes written to `dim[0]`.
pub const SPATIAL_RANK: i16 = 3;

/// A field's position in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
}

impl Field {
    const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    pub const fn end(self) -> usize {
        self.offset + self.width
    }

    pub fn range(self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// Byte positions of every documented NIfTI-1 field.
pub mod offsets {
    use super::Field;

    pub const SIZEOF_HDR: Field = Field::new("sizeof_hdr", 0, 4);
    pub const DATA_TYPE: Field = Field::new("data_type", 4, 10);
    pub const DB_NAME: Field = Field::new("db_name", 14, 18);
    pub const EXTENTS: Field = Field::new("extents", 32, 4);
    pub const SESSION_ERROR: Field = Field::new("session_error", 36, 2);
    pub const REGULAR: Field = Field::new("regular", 38, 1);
    pub const DIM_INFO: Field = Field::new("dim_info", 39, 1);
    pub const DIM: Field = Field::new("dim", 40, 16);
    pub const INTENT_P1: Field = Field::new("intent_p1", 56, 4);
    pub const INTENT_P2: Field = Field::new("intent_p2", 60, 4);
    pub const INTENT_P3: Field = Field::new("intent_p3", 64, 4);
    pub const INTENT_CODE: Field = Field::new("intent_code", 68, 2);
    pub const DATATYPE: Field = Field::new("datatype", 70, 2);
    pub const BITPIX: Field = Field::new("bitpix", 72, 2);
    pub const SLICE_START: Field = Field::new("slice_start", 74, 2);
    pub const PIXDIM: Field = Field::new("pixdim", 76, 32);
    pub const VOX_OFFSET: Field = Field::new("vox_offset", 108, 4);
    pub const SCL_SLOPE: Field = Field::new("scl_slope", 112, 4);
    pub const SCL_INTER: Field = Field::new("scl_inter", 116, 4);
    pub const SLICE_END: Field = Field::new("slice_end", 120, 2);
    pub const SLICE_CODE: Field = Field::new("slice_code", 122, 1);
    pub const XYZT_UNITS: Field = Field::new("xyzt_units", 123, 1);
    pub const CAL_MAX: Field = Field::new("cal_max", 124, 4);
    pub const CAL_MIN: Field = Field::new("cal_min", 128, 4);
    pub const SLICE_DURATION: Field = Field::new("slice_duration", 132, 4);
    pub const TOFFSET: Field = Field::new("toffset", 136, 4);
    pub const GLMAX: Field = Field::new("glmax", 140, 4);
    pub const GLMIN: Field = Field::new("glmin", 144, 4);
    pub const DESCRIP: Field = Field::new("descrip", 148, 80);
    pub const AUX_FILE: Field = Field::new("aux_file", 228, 24);
    pub const QFORM_CODE: Field = Field::new("qform_code", 252, 2);
    pub const SFORM_CODE: Field = Field::new("sform_code", 254, 2);
    pub const QUATERN_B: Field = Field::new("quatern_b", 256, 4);
    pub const QUATERN_C: Field = Field::new("quatern_c", 260, 4);
    pub const QUATERN_D: Field = Field::new("quatern_d", 264, 4);
    pub const QOFFSET_X: Field = Field::new("qoffset_x", 268, 4);
    pub const QOFFSET_Y: Field = Field::new("qoffset_y", 272, 4);
    pub const QOFFSET_Z: Field = Field::new("qoffset_z", 276, 4);
    pub const SROW_X: Field = Field::new("srow_x", 280, 16);
    pub const SROW_Y: Field = Field::new("srow_y", 296, 16);
    pub const SROW_Z: Field = Field::new("srow_z", 312, 16);
    pub const INTENT_NAME: Field = Field::new("intent_name", 328, 16);
    pub const MAGIC: Field = Field::new("magic", 344, 4);
    pub const EXTENSION: Field = Field::new("extension", 348, 4);

    /// Every field in offset order, covering all 352 bytes.
    pub const LAYOUT: [Field; 44] = [
        SIZEOF_HDR,
        DATA_TYPE,
        DB_NAME,
        EXTENTS,
        SESSION_ERROR,
        REGULAR,
        DIM_INFO,
        DIM,
        INTENT_P1,
        INTENT_P2,
        INTENT_P3,
        INTENT_CODE,
        DATATYPE,
        BITPIX,
        SLICE_START,
        PIXDIM,
        VOX_OFFSET,
        SCL_SLOPE,
        SCL_INTER,
        SLICE_END,
        SLICE_CODE,
        XYZT_UNITS,
        CAL_MAX,
        CAL_MIN,
        SLICE_DURATION,
        TOFFSET,
        GLMAX,
        GLMIN,
        DESCRIP,
        AUX_FILE,
        QFORM_CODE,
        SFORM_CODE,
        QUATERN_B,
        QUATERN_C,
        QUATERN_D,
        QOFFSET_X,
        QOFFSET_Y,
        QOFFSET_Z,
        SROW_X,
        SROW_Y,
        SROW_Z,
        INTENT_NAME,
        MAGIC,
        EXTENSION,
    ];
}

/// Byte order of every multi-byte numeric field in one header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

/// Coordinate-system code stored in `qform_code` and `sform_code`.
///
/// A zero code means the mapping method is unknown. It is never
/// reinterpreted as scanner-anatomical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum XformCode {
    #[default]
    Unknown = 0,
    ScannerAnat = 1,
    AlignedAnat = 2,
    Talairach = 3,
    Mni152 = 4,
}

impl XformCode {
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::ScannerAnat),
            2 => Some(Self::AlignedAnat),
            3 => Some(Self::Talairach),
            4 => Some(Self::Mni152),
            _ => None,
        }
    }

    pub fn code(self) -> i16 {
        self as i16
    }
}
