use vox2nii_core::{ConvertError, DecodedModel, SparseModel};
use vox2nii_nifti::{HeaderFields, VOX_OFFSET};
use vox2nii_volume::{fill, DenseVolume};

use crate::options::ConvertOptions;

/// Convert a decoded sparse model with default options.
pub fn convert(model: &SparseModel) -> Result<Vec<u8>, ConvertError> {
    convert_with(model, &ConvertOptions::default())
}

/// Convert a decoded sparse model into header bytes followed by the
/// dense RGBA payload. On error nothing is returned.
pub fn convert_with(model: &SparseModel, options: &ConvertOptions) -> Result<Vec<u8>, ConvertError> {
    let result = model
        .decode()
        .and_then(|decoded| convert_decoded(&decoded, options));
    if let Err(e) = &result {
        log::warn!("Voxel model conversion failed ({:?}): {}", e.kind(), e);
    }
    result
}

/// Parse the decoder's JSON output, then convert it.
pub fn convert_json(bytes: &[u8], options: &ConvertOptions) -> Result<Vec<u8>, ConvertError> {
    let model = match SparseModel::from_json_slice(bytes) {
        Ok(model) => model,
        Err(e) => {
            log::warn!("Could not read voxel model: {}", e);
            return Err(e.into());
        }
    };
    convert_with(&model, options)
}

/// Convert an already validated model.
///
/// The header is derived first, so an extent the header cannot record
/// fails before the volume is allocated. The payload is then rasterized
/// behind reserved header room and returned as one buffer.
pub fn convert_decoded(
    model: &DecodedModel,
    options: &ConvertOptions,
) -> Result<Vec<u8>, ConvertError> {
    if options.verbose {
        log::info!("Loaded voxel model: {}", model.dims);
    }

    let fields = HeaderFields::from_defaults(model.dims, &options.header.with_rgba32())?;

    let mut volume = DenseVolume::with_header_room(model.dims, VOX_OFFSET)?;
    let stats = fill(&mut volume, &model.voxels, &model.palette)?;
    if stats.unpaletted > 0 {
        log::debug!(
            "{} of {} voxels reference empty palette slots",
            stats.unpaletted,
            model.voxels.len()
        );
    }

    volume
        .header_room_mut()
        .copy_from_slice(&fields.to_bytes());
    Ok(volume.into_bytes())
}
