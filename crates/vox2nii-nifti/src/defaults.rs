use serde::{Deserialize, Serialize};
use vox2nii_core::constants::BITS_PER_VOXEL;
use vox2nii_core::ConfigError;

use crate::format::{Endianness, XformCode, DT_RGBA32, VOX_OFFSET};
use crate::header::Orientation;

/// Form codes for the quaternion and affine orientation blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformCodes {
    pub qform: XformCode,
    pub sform: XformCode,
}

/// Settings the header encoder fills its fields from.
///
/// Every field has a documented default, so a RON file only needs to list
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderDefaults {
    /// Datatype code. Only 32-bit RGBA (2304) is accepted.
    pub datatype_code: i16,
    pub bits_per_voxel: i16,
    /// pixdim slots. Slot 0 is qfac.
    pub pixel_spacing: [f32; 8],
    /// Where the payload begins. Must equal the 352-byte header length.
    pub vox_offset: f32,
    pub scl_slope: f32,
    pub scl_inter: f32,
    /// Spatial and temporal unit codes. 0 means unknown.
    pub xyzt_units: u8,
    pub transform_codes: TransformCodes,
    pub orientation: Option<Orientation>,
    pub description: Option<String>,
    pub aux_file: Option<String>,
    pub endianness: Endianness,
}

impl Default for HeaderDefaults {
    fn default() -> Self {
        Self {
            datatype_code: DT_RGBA32,
            bits_per_voxel: BITS_PER_VOXEL,
            pixel_spacing: [1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
            vox_offset: VOX_OFFSET as f32,
            scl_slope: 1.0,
            scl_inter: 0.0,
            xyzt_units: 0,
            transform_codes: TransformCodes::default(),
            orientation: None,
            description: None,
            aux_file: None,
            endianness: Endianness::Little,
        }
    }
}

impl HeaderDefaults {
    /// Parse settings from RON. Missing fields take their defaults.
    pub fn from_ron(ron_str: &str) -> Result<Self, ConfigError> {
        let options = ron::Options::default();
        options
            .from_str(ron_str)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Copy with the datatype forced to 32-bit RGBA.
    pub fn with_rgba32(&self) -> Self {
        Self {
            datatype_code: DT_RGBA32,
            bits_per_voxel: BITS_PER_VOXEL,
            ..self.clone()
        }
    }
}
