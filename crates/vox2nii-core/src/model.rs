//! Input boundary: the sparse model as handed over by an external decoder.
//!
//! The shape mirrors what a `.vox` reader produces once chunk framing and
//! palette extraction are done: `size {x, y, z}`, `xyzi.values` and
//! `rgba.values`. Every part is optional on the wire because the input is
//! untrusted; `decode` turns it into validated core types.

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, DecodeError, ValidationError};
use crate::types::{Dimensions, Palette, Rgba, SparseVoxel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSize {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVoxel {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub i: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoxelList {
    #[serde(default)]
    pub values: Option<Vec<ModelVoxel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteList {
    /// `null` slots are allowed and behave like missing entries.
    #[serde(default)]
    pub values: Option<Vec<Option<Rgba>>>,
}

/// Already-parsed sparse voxel model, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseModel {
    #[serde(default)]
    pub size: Option<ModelSize>,
    #[serde(default)]
    pub xyzi: Option<VoxelList>,
    #[serde(default)]
    pub rgba: Option<PaletteList>,
}

/// Validated model ready for rasterization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedModel {
    pub dims: Dimensions,
    pub voxels: Vec<SparseVoxel>,
    pub palette: Palette,
}

impl SparseModel {
    /// Assemble a model from already-typed parts.
    pub fn new(size: ModelSize, voxels: Vec<ModelVoxel>, palette: Vec<Option<Rgba>>) -> Self {
        Self {
            size: Some(size),
            xyzi: Some(VoxelList {
                values: Some(voxels),
            }),
            rgba: Some(PaletteList {
                values: Some(palette),
            }),
        }
    }

    /// Parse the decoder's JSON rendition of a model. Only UTF-8 JSON
    /// objects are accepted.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            DecodeError::UnsupportedInput(format!("input is not UTF-8 text: {e}"))
        })?;
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DecodeError::Json(e.to_string()))?;
        if !value.is_object() {
            return Err(DecodeError::UnsupportedInput(format!(
                "expected a JSON object, found {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| DecodeError::Json(e.to_string()))
    }

    /// Check presence of every required part and validate geometry.
    /// Voxel coordinates are range-checked against the size here so that
    /// values too wide for the grid's coordinate type never get truncated.
    pub fn decode(&self) -> Result<DecodedModel, ConvertError> {
        let size = self.size.ok_or(DecodeError::MissingSize)?;
        let voxels = self
            .xyzi
            .as_ref()
            .and_then(|list| list.values.as_ref())
            .ok_or(DecodeError::MissingVoxels)?;
        let palette = self
            .rgba
            .as_ref()
            .and_then(|list| list.values.as_ref())
            .ok_or(DecodeError::MissingPalette)?;

        let dims = Dimensions::new(size.x, size.y, size.z)?;

        let voxels = voxels
            .iter()
            .enumerate()
            .map(|(index, v)| match (narrow(v.x), narrow(v.y), narrow(v.z)) {
                (Some(x), Some(y), Some(z)) => Ok(SparseVoxel::new(x, y, z, v.i)),
                _ => Err(ValidationError::VoxelOutOfBounds {
                    index,
                    x: v.x,
                    y: v.y,
                    z: v.z,
                    width: dims.width(),
                    height: dims.height(),
                    depth: dims.depth(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DecodedModel {
            dims,
            voxels,
            palette: Palette::from_entries(palette.clone()),
        })
    }
}

fn narrow(value: i64) -> Option<i32> {
    i32::try_from(value).ok()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use glam::IVec3;

    const TWO_VOXELS: &str = r#"{
        "size": { "x": 2, "y": 1, "z": 1 },
        "xyzi": { "values": [ { "x": 0, "y": 0, "z": 0, "i": 0 }, { "x": 1, "y": 0, "z": 0, "i": 1 } ] },
        "rgba": { "values": [ { "r": 1, "g": 2, "b": 3, "a": 4 }, { "r": 5, "g": 6, "b": 7, "a": 8 } ] }
    }"#;

    #[test]
    fn test_decode_json_model() {
        let model = SparseModel::from_json_slice(TWO_VOXELS.as_bytes()).expect("parse");
        let decoded = model.decode().expect("decode");
        assert_eq!(decoded.dims, Dimensions::new(2, 1, 1).expect("dims"));
        assert_eq!(decoded.voxels.len(), 2);
        assert_eq!(decoded.voxels[1].coord, IVec3::new(1, 0, 0));
        assert_eq!(decoded.voxels[1].index, 1);
        assert_eq!(decoded.palette.get(1), Some(Rgba::new(5, 6, 7, 8)));
    }

    #[test]
    fn test_missing_parts_are_decode_errors() {
        let no_size = r#"{ "xyzi": { "values": [] }, "rgba": { "values": [] } }"#;
        let model = SparseModel::from_json_slice(no_size.as_bytes()).expect("parse");
        assert!(matches!(
            model.decode(),
            Err(ConvertError::InputDecode(DecodeError::MissingSize))
        ));

        let no_voxels = r#"{ "size": { "x": 1, "y": 1, "z": 1 }, "xyzi": {}, "rgba": { "values": [] } }"#;
        let model = SparseModel::from_json_slice(no_voxels.as_bytes()).expect("parse");
        assert!(matches!(
            model.decode(),
            Err(ConvertError::InputDecode(DecodeError::MissingVoxels))
        ));

        let no_palette = r#"{ "size": { "x": 1, "y": 1, "z": 1 }, "xyzi": { "values": [] } }"#;
        let model = SparseModel::from_json_slice(no_palette.as_bytes()).expect("parse");
        let err = model.decode().expect_err("palette is required");
        assert_eq!(err.kind(), ErrorKind::MalformedModel);
    }

    #[test]
    fn test_empty_voxel_list_is_valid() {
        let json = r#"{ "size": { "x": 1, "y": 1, "z": 1 }, "xyzi": { "values": [] }, "rgba": { "values": [] } }"#;
        let model = SparseModel::from_json_slice(json.as_bytes()).expect("parse");
        let decoded = model.decode().expect("decode");
        assert!(decoded.voxels.is_empty());
        assert!(decoded.palette.is_empty());
    }

    #[test]
    fn test_null_palette_slot() {
        let json = r#"{
            "size": { "x": 1, "y": 1, "z": 1 },
            "xyzi": { "values": [] },
            "rgba": { "values": [ null, { "r": 9, "g": 9, "b": 9, "a": 9 } ] }
        }"#;
        let model = SparseModel::from_json_slice(json.as_bytes()).expect("parse");
        let decoded = model.decode().expect("decode");
        assert_eq!(decoded.palette.get(0), None);
        assert_eq!(decoded.palette.get(1), Some(Rgba::new(9, 9, 9, 9)));
    }

    #[test]
    fn test_non_object_input_rejected() {
        let result = SparseModel::from_json_slice(b"[1, 2, 3]");
        assert!(matches!(result, Err(DecodeError::UnsupportedInput(_))));

        let result = SparseModel::from_json_slice(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(DecodeError::UnsupportedInput(_))));

        let result = SparseModel::from_json_slice(b"{ not json");
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_non_positive_size_is_validation_error() {
        let model = SparseModel::new(ModelSize { x: 4, y: 0, z: 4 }, vec![], vec![]);
        let err = model.decode().expect_err("zero height");
        assert_eq!(err.kind(), ErrorKind::InvalidGeometry);
    }

    #[test]
    fn test_wide_coordinate_is_out_of_bounds() {
        let model = SparseModel::new(
            ModelSize { x: 1, y: 1, z: 1 },
            vec![ModelVoxel {
                x: i64::from(i32::MAX) + 1,
                y: 0,
                z: 0,
                i: 0,
            }],
            vec![],
        );
        assert!(matches!(
            model.decode(),
            Err(ConvertError::Validation(ValidationError::VoxelOutOfBounds { index: 0, .. }))
        ));
    }

    #[test]
    fn test_decode_leaves_model_untouched() {
        let model = SparseModel::from_json_slice(TWO_VOXELS.as_bytes()).expect("parse");
        let before = model.clone();
        let _ = model.decode().expect("decode");
        assert_eq!(model, before);
    }
}
