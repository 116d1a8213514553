pub mod dense;
pub mod rasterize;

pub use dense::{linear_index, DenseVolume};
pub use rasterize::{fill, rasterize, rasterize_with_stats, RasterStats};
