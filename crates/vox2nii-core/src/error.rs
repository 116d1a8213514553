use thiserror::Error;

use crate::types::Axis;

/// Coarse classification of a failed conversion, for callers deciding
/// whether to abort or retry with different input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The decoded source model is missing data or has the wrong shape.
    MalformedModel,
    /// The geometry or a header field value is invalid.
    InvalidGeometry,
    /// The requested buffers would not fit in addressable memory.
    CapacityExceeded,
}

/// Errors raised while reading the decoded sparse model.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("decoded model has no size")]
    MissingSize,

    #[error("decoded model has no voxel list")]
    MissingVoxels,

    #[error("decoded model has no palette")]
    MissingPalette,

    #[error("failed to parse decoded model JSON: {0}")]
    Json(String),
}

/// Geometry and header field range violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{axis} must be positive, got {value}")]
    NonPositiveExtent { axis: Axis, value: i64 },

    #[error("{axis} {value} exceeds the maximum of {max}")]
    ExtentTooLarge { axis: Axis, value: i64, max: i64 },

    #[error(
        "voxel {index} at ({x}, {y}, {z}) lies outside the {width}x{height}x{depth} volume"
    )]
    VoxelOutOfBounds {
        index: usize,
        x: i64,
        y: i64,
        z: i64,
        width: u32,
        height: u32,
        depth: u32,
    },

    #[error("header field {field} value {value} does not fit its slot (max {max})")]
    FieldOverflow {
        field: &'static str,
        value: i64,
        max: i64,
    },

    #[error("header field {field} is {actual}, expected {expected}")]
    InconsistentField {
        field: &'static str,
        actual: String,
        expected: String,
    },
}

/// Allocation requests that exceed what the platform can address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("a {width}x{height}x{depth} RGBA volume exceeds addressable memory")]
    VolumeTooLarge { width: u32, height: u32, depth: u32 },

    #[error("header plus {payload} payload bytes exceeds addressable memory")]
    OutputTooLarge { payload: usize },
}

/// Errors raised while loading conversion settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse settings RON: {0}")]
    Parse(String),
}

/// Any failure of a conversion call. No partial output accompanies it.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("malformed source model: {0}")]
    InputDecode(#[from] DecodeError),

    #[error("invalid geometry: {0}")]
    Validation(#[from] ValidationError),

    #[error("capacity exceeded: {0}")]
    Capacity(#[from] CapacityError),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputDecode(_) => ErrorKind::MalformedModel,
            Self::Validation(_) => ErrorKind::InvalidGeometry,
            Self::Capacity(_) => ErrorKind::CapacityExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let decode: ConvertError = DecodeError::MissingSize.into();
        assert_eq!(decode.kind(), ErrorKind::MalformedModel);

        let validation: ConvertError = ValidationError::NonPositiveExtent {
            axis: Axis::X,
            value: 0,
        }
        .into();
        assert_eq!(validation.kind(), ErrorKind::InvalidGeometry);

        let capacity: ConvertError = CapacityError::OutputTooLarge { payload: 1 }.into();
        assert_eq!(capacity.kind(), ErrorKind::CapacityExceeded);
    }

    #[test]
    fn test_messages_name_the_failure_class() {
        let err: ConvertError = DecodeError::MissingPalette.into();
        assert_eq!(
            err.to_string(),
            "malformed source model: decoded model has no palette"
        );

        let err: ConvertError = ValidationError::NonPositiveExtent {
            axis: Axis::Z,
            value: -2,
        }
        .into();
        assert_eq!(err.to_string(), "invalid geometry: depth must be positive, got -2");
    }
}
