//! Sparse palette-indexed voxel models to single-file NIfTI-1 RGBA volumes.

pub mod convert;
pub mod options;

pub use convert::{convert, convert_decoded, convert_json, convert_with};
pub use options::ConvertOptions;

pub use vox2nii_core::{ConvertError, DecodedModel, ErrorKind, SparseModel};
pub use vox2nii_nifti::{HeaderDefaults, VOX_OFFSET};
