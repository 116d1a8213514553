use vox2nii_core::{ConvertError, Dimensions, Palette, SparseVoxel, ValidationError};

use crate::dense::DenseVolume;

/// Per-call counters from a rasterization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Voxels whose color was written. Repeated coordinates count each time.
    pub written: usize,
    /// Voxels left transparent because their palette slot is empty or missing.
    pub unpaletted: usize,
}

/// Expand a sparse voxel list into a dense RGBA volume.
pub fn rasterize(
    dims: Dimensions,
    voxels: &[SparseVoxel],
    palette: &Palette,
) -> Result<DenseVolume, ConvertError> {
    rasterize_with_stats(dims, voxels, palette).map(|(volume, _)| volume)
}

/// Expand a sparse voxel list, reporting how many entries were written.
pub fn rasterize_with_stats(
    dims: Dimensions,
    voxels: &[SparseVoxel],
    palette: &Palette,
) -> Result<(DenseVolume, RasterStats), ConvertError> {
    let mut volume = DenseVolume::zeroed(dims)?;
    let stats = fill(&mut volume, voxels, palette)?;
    Ok((volume, stats))
}

/// Write a sparse voxel list into an already allocated volume.
///
/// Entries are applied in input order, so a later entry at the same
/// coordinate replaces an earlier one. Any out-of-bounds coordinate fails
/// the whole call, even when its palette slot is empty; the caller should
/// drop the partially filled buffer.
pub fn fill(
    volume: &mut DenseVolume,
    voxels: &[SparseVoxel],
    palette: &Palette,
) -> Result<RasterStats, ConvertError> {
    let dims = volume.dims();
    let mut stats = RasterStats::default();

    for (index, voxel) in voxels.iter().enumerate() {
        let coord = dims
            .checked_coord(voxel.coord)
            .ok_or(ValidationError::VoxelOutOfBounds {
                index,
                x: i64::from(voxel.coord.x),
                y: i64::from(voxel.coord.y),
                z: i64::from(voxel.coord.z),
                width: dims.width(),
                height: dims.height(),
                depth: dims.depth(),
            })?;

        match palette.get(voxel.index) {
            Some(color) => {
                volume.write(coord, color);
                stats.written += 1;
            }
            None => stats.unpaletted += 1,
        }
    }

    log::debug!(
        "Rasterized {} volume: {} voxels written, {} without palette entry",
        dims,
        stats.written,
        stats.unpaletted
    );

    Ok(stats)
}
