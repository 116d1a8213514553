use vox2nii_core::{Dimensions, ValidationError};

use crate::defaults::HeaderDefaults;
use crate::format::{offsets, Endianness, Field, HEADER_SIZE, VOX_OFFSET};
use crate::header::HeaderFields;

/// Build the 352-byte single-file header for an RGBA volume.
pub fn encode_header(
    dims: Dimensions,
    defaults: &HeaderDefaults,
) -> Result<[u8; VOX_OFFSET], ValidationError> {
    Ok(HeaderFields::from_defaults(dims, defaults)?.to_bytes())
}

impl HeaderFields {
    /// Serialize every field at its documented offset.
    ///
    /// The buffer starts zeroed, so fields this record does not carry
    /// (intent, slice timing, calibration, extension flag) encode as zero.
    pub fn to_bytes(&self) -> [u8; VOX_OFFSET] {
        let mut buf = [0u8; VOX_OFFSET];
        let mut w = FieldWriter {
            buf: &mut buf,
            endianness: self.endianness,
        };

        w.i32(offsets::SIZEOF_HDR, HEADER_SIZE as i32);
        w.i16_array(offsets::DIM, &self.dim);
        w.i16(offsets::DATATYPE, self.datatype);
        w.i16(offsets::BITPIX, self.bitpix);
        w.f32_array(offsets::PIXDIM, &self.pixdim);
        w.f32(offsets::VOX_OFFSET, self.vox_offset);
        w.f32(offsets::SCL_SLOPE, self.scl_slope);
        w.f32(offsets::SCL_INTER, self.scl_inter);
        w.bytes(offsets::XYZT_UNITS, &[self.xyzt_units]);
        w.bytes(offsets::DESCRIP, &self.descrip);
        w.bytes(offsets::AUX_FILE, &self.aux_file);
        w.i16(offsets::QFORM_CODE, self.qform_code.code());
        w.i16(offsets::SFORM_CODE, self.sform_code.code());

        let o = &self.orientation;
        w.f32(offsets::QUATERN_B, o.quatern[0]);
        w.f32(offsets::QUATERN_C, o.quatern[1]);
        w.f32(offsets::QUATERN_D, o.quatern[2]);
        w.f32(offsets::QOFFSET_X, o.qoffset[0]);
        w.f32(offsets::QOFFSET_Y, o.qoffset[1]);
        w.f32(offsets::QOFFSET_Z, o.qoffset[2]);
        w.f32_array(offsets::SROW_X, &o.srow_x);
        w.f32_array(offsets::SROW_Y, &o.srow_y);
        w.f32_array(offsets::SROW_Z, &o.srow_z);

        w.bytes(offsets::MAGIC, &self.magic);
        w.bytes(offsets::EXTENSION, &[0; 4]);

        buf
    }
}

/// Writes numeric fields in one byte order at fixed offsets.
struct FieldWriter<'a> {
    buf: &'a mut [u8; VOX_OFFSET],
    endianness: Endianness,
}

impl FieldWriter<'_> {
    fn bytes(&mut self, field: Field, value: &[u8]) {
        debug_assert_eq!(field.width, value.len(), "{}", field.name);
        self.buf[field.range()].copy_from_slice(value);
    }

    fn at(&mut self, offset: usize, value: &[u8]) {
        self.buf[offset..offset + value.len()].copy_from_slice(value);
    }

    fn i16(&mut self, field: Field, value: i16) {
        debug_assert_eq!(field.width, 2, "{}", field.name);
        self.put_i16(field.offset, value);
    }

    fn i32(&mut self, field: Field, value: i32) {
        debug_assert_eq!(field.width, 4, "{}", field.name);
        let bytes = match self.endianness {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        };
        self.at(field.offset, &bytes);
    }

    fn f32(&mut self, field: Field, value: f32) {
        debug_assert_eq!(field.width, 4, "{}", field.name);
        self.put_f32(field.offset, value);
    }

    fn i16_array(&mut self, field: Field, values: &[i16]) {
        debug_assert_eq!(field.width, values.len() * 2, "{}", field.name);
        for (i, &v) in values.iter().enumerate() {
            self.put_i16(field.offset + i * 2, v);
        }
    }

    fn f32_array(&mut self, field: Field, values: &[f32]) {
        debug_assert_eq!(field.width, values.len() * 4, "{}", field.name);
        for (i, &v) in values.iter().enumerate() {
            self.put_f32(field.offset + i * 4, v);
        }
    }

    fn put_i16(&mut self, offset: usize, value: i16) {
        let bytes = match self.endianness {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        };
        self.at(offset, &bytes);
    }

    fn put_f32(&mut self, offset: usize, value: f32) {
        let bytes = match self.endianness {
            Endianness::Little => value.to_le_bytes(),
            Endianness::Big => value.to_be_bytes(),
        };
        self.at(offset, &bytes);
    }
}
