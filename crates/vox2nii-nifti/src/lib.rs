pub mod compat;
pub mod decode;
pub mod defaults;
pub mod encode;
pub mod error;
pub mod format;
pub mod header;

pub use compat::validate_image;
pub use decode::decode_header;
pub use defaults::{HeaderDefaults, TransformCodes};
pub use encode::encode_header;
pub use error::HeaderReadError;
pub use format::{Endianness, XformCode, DT_RGBA32, VOX_OFFSET};
pub use header::{HeaderFields, Orientation};
