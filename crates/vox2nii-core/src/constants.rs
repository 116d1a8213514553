//! Constants shared by the rasterizer, the header encoder and the pipeline.

/// Bytes per dense voxel: one each for R, G, B and A.
pub const BYTES_PER_VOXEL: usize = 4;

/// Bits per dense voxel, as recorded in the header's bitpix slot.
pub const BITS_PER_VOXEL: i16 = (BYTES_PER_VOXEL * 8) as i16;
