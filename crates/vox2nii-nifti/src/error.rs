/// Errors raised while inspecting an encoded header or combined image.
#[derive(Debug, thiserror::Error)]
pub enum HeaderReadError {
    #[error("buffer too small ({0} bytes, minimum {1})")]
    TooSmall(usize, usize),

    #[error("sizeof_hdr is {0} in either byte order, expected 348")]
    InvalidHeaderSize(i32),

    #[error("invalid magic bytes {0:?} (expected n+1 or ni1)")]
    InvalidMagic([u8; 4]),

    #[error("unknown {field} value {code}")]
    UnknownXformCode { field: &'static str, code: i16 },

    #[error("not a single-file image (magic {0:?})")]
    NotSingleFile([u8; 4]),

    #[error("unsupported datatype {datatype} with {bitpix} bits per voxel")]
    UnsupportedDatatype { datatype: i16, bitpix: i16 },

    #[error("expected {expected} spatial dimensions, found {actual}")]
    UnexpectedRank { expected: i16, actual: i16 },

    #[error("non-positive extent {0} in dim slot")]
    InvalidExtent(i16),

    #[error("vox_offset {0} does not match the header length")]
    InvalidVoxOffset(f32),

    #[error("payload length mismatch: expected {expected} bytes, got {actual}")]
    PayloadLength { expected: usize, actual: usize },
}
