//! Read-only inspection of an encoded header, used to verify output.

use crate::error::HeaderReadError;
use crate::format::{
    offsets, Endianness, Field, XformCode, HEADER_SIZE, MAGIC_PAIR, MAGIC_SINGLE_FILE,
};
use crate::header::{HeaderFields, Orientation};

/// Parse the fields this system writes from the start of `bytes`.
///
/// Byte order is detected from `sizeof_hdr`, which must read 348 in one
/// of the two orders.
pub fn decode_header(bytes: &[u8]) -> Result<HeaderFields, HeaderReadError> {
    if bytes.len() < HEADER_SIZE {
        return Err(HeaderReadError::TooSmall(bytes.len(), HEADER_SIZE));
    }

    let raw: [u8; 4] = fixed(bytes, offsets::SIZEOF_HDR);
    let endianness = if i32::from_le_bytes(raw) == HEADER_SIZE as i32 {
        Endianness::Little
    } else if i32::from_be_bytes(raw) == HEADER_SIZE as i32 {
        Endianness::Big
    } else {
        return Err(HeaderReadError::InvalidHeaderSize(i32::from_le_bytes(raw)));
    };
    log::debug!("Header byte order: {:?}", endianness);

    let magic: [u8; 4] = fixed(bytes, offsets::MAGIC);
    if magic != MAGIC_SINGLE_FILE && magic != MAGIC_PAIR {
        return Err(HeaderReadError::InvalidMagic(magic));
    }

    let r = FieldReader { bytes, endianness };

    let mut dim = [0i16; 8];
    for (i, slot) in dim.iter_mut().enumerate() {
        *slot = r.i16_at(offsets::DIM.offset + i * 2);
    }
    let mut pixdim = [0f32; 8];
    for (i, slot) in pixdim.iter_mut().enumerate() {
        *slot = r.f32_at(offsets::PIXDIM.offset + i * 4);
    }

    Ok(HeaderFields {
        endianness,
        dim,
        datatype: r.i16(offsets::DATATYPE),
        bitpix: r.i16(offsets::BITPIX),
        pixdim,
        vox_offset: r.f32(offsets::VOX_OFFSET),
        scl_slope: r.f32(offsets::SCL_SLOPE),
        scl_inter: r.f32(offsets::SCL_INTER),
        xyzt_units: bytes[offsets::XYZT_UNITS.offset],
        qform_code: r.xform(offsets::QFORM_CODE)?,
        sform_code: r.xform(offsets::SFORM_CODE)?,
        orientation: Orientation {
            quatern: [
                r.f32(offsets::QUATERN_B),
                r.f32(offsets::QUATERN_C),
                r.f32(offsets::QUATERN_D),
            ],
            qoffset: [
                r.f32(offsets::QOFFSET_X),
                r.f32(offsets::QOFFSET_Y),
                r.f32(offsets::QOFFSET_Z),
            ],
            srow_x: r.row(offsets::SROW_X),
            srow_y: r.row(offsets::SROW_Y),
            srow_z: r.row(offsets::SROW_Z),
        },
        descrip: fixed(bytes, offsets::DESCRIP),
        aux_file: fixed(bytes, offsets::AUX_FILE),
        magic,
    })
}

fn fixed<const N: usize>(bytes: &[u8], field: Field) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[field.offset..field.offset + N]);
    out
}

struct FieldReader<'a> {
    bytes: &'a [u8],
    endianness: Endianness,
}

impl FieldReader<'_> {
    fn i16(&self, field: Field) -> i16 {
        self.i16_at(field.offset)
    }

    fn f32(&self, field: Field) -> f32 {
        self.f32_at(field.offset)
    }

    fn i16_at(&self, offset: usize) -> i16 {
        let raw = [self.bytes[offset], self.bytes[offset + 1]];
        match self.endianness {
            Endianness::Little => i16::from_le_bytes(raw),
            Endianness::Big => i16::from_be_bytes(raw),
        }
    }

    fn f32_at(&self, offset: usize) -> f32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.bytes[offset..offset + 4]);
        match self.endianness {
            Endianness::Little => f32::from_le_bytes(raw),
            Endianness::Big => f32::from_be_bytes(raw),
        }
    }

    fn row(&self, field: Field) -> [f32; 4] {
        [0, 1, 2, 3].map(|i| self.f32_at(field.offset + i * 4))
    }

    fn xform(&self, field: Field) -> Result<XformCode, HeaderReadError> {
        let code = self.i16(field);
        XformCode::from_code(code).ok_or(HeaderReadError::UnknownXformCode {
            field: field.name,
            code,
        })
    }
}
