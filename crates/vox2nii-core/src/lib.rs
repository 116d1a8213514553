pub mod constants;
pub mod error;
pub mod model;
pub mod types;

pub use error::{CapacityError, ConfigError, ConvertError, DecodeError, ErrorKind, ValidationError};
pub use model::{DecodedModel, ModelSize, ModelVoxel, SparseModel};
pub use types::{Axis, Dimensions, Palette, Rgba, SparseVoxel, VoxelCoord};
