// Declarative field layouts of the container
//
// Each table lists the fields of one region in file order. Integer fields
// are byte-order sensitive; raw fields (tags, hashes) are copied verbatim.
// The transcoder walks these tables instead of spelling out every field.

use std::io;

use crate::utils::io::{EndianReader, EndianWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    Raw(usize),
}

impl FieldKind {
    pub const fn width(self) -> usize {
        match self {
            FieldKind::U8 => 1,
            FieldKind::U16 => 2,
            FieldKind::U32 => 4,
            FieldKind::Raw(len) => len,
        }
    }

    pub const fn endian_sensitive(self) -> bool {
        matches!(self, FieldKind::U16 | FieldKind::U32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> Field {
    Field { name, kind }
}

pub const RIFF_HEADER: &[Field] = &[
    field("magic", FieldKind::Raw(4)),
    field("riff_size", FieldKind::U32),
    field("form_type", FieldKind::Raw(4)),
];

pub const FMT_HEADER: &[Field] = &[
    field("fmt_magic", FieldKind::Raw(4)),
    field("fmt_length", FieldKind::U32),
];

/// Leading fields shared by both fmt layouts
pub const FMT_COMMON_BODY: &[Field] = &[
    field("format_tag", FieldKind::U16),
    field("channels", FieldKind::U16),
    field("samples_per_sec", FieldKind::U32),
    field("avg_bytes_per_sec", FieldKind::U32),
    field("block_align", FieldKind::U16),
    field("bits_per_sample", FieldKind::U16),
    field("cb_size", FieldKind::U16),
    field("samples_per_block", FieldKind::U16),
    field("channel_mask", FieldKind::U32),
];

/// The 66-byte fmt body with the vorb fields inlined
pub const FMT_CURRENT_BODY: &[Field] = &[
    field("format_tag", FieldKind::U16),
    field("channels", FieldKind::U16),
    field("samples_per_sec", FieldKind::U32),
    field("avg_bytes_per_sec", FieldKind::U32),
    field("block_align", FieldKind::U16),
    field("bits_per_sample", FieldKind::U16),
    field("cb_size", FieldKind::U16),
    field("samples_per_block", FieldKind::U16),
    field("channel_mask", FieldKind::U32),
    field("total_pcm_frames", FieldKind::U32),
    field("loop_start_packet_offset", FieldKind::U32),
    field("loop_end_packet_offset", FieldKind::U32),
    field("loop_begin_extra", FieldKind::U16),
    field("loop_end_extra", FieldKind::U16),
    field("seek_table_size", FieldKind::U32),
    field("vorbis_data_offset", FieldKind::U32),
    field("max_packet_size", FieldKind::U16),
    field("last_granule_extra", FieldKind::U16),
    field("decode_alloc_size", FieldKind::U32),
    field("decode_x64_alloc_size", FieldKind::U32),
    field("hash_codebook", FieldKind::Raw(4)),
    field("block_size_0", FieldKind::U8),
    field("block_size_1", FieldKind::U8),
];

pub const VORB_HEADER: &[Field] = &[
    field("vorb_magic", FieldKind::Raw(4)),
    field("vorb_length", FieldKind::U32),
];

pub const DATA_HEADER: &[Field] = &[
    field("data_magic", FieldKind::Raw(4)),
    field("data_size", FieldKind::U32),
];

/// Everything a platform swap re-serializes before the data payload
pub const SWAP_HEADER: &[&[Field]] = &[RIFF_HEADER, FMT_HEADER, FMT_CURRENT_BODY, DATA_HEADER];

pub fn table_width(fields: &[Field]) -> usize {
    fields.iter().map(|f| f.kind.width()).sum()
}

/// Byte offset of a named field within a table
pub fn offset_of(fields: &[Field], name: &str) -> Option<usize> {
    let mut offset = 0;
    for f in fields {
        if f.name == name {
            return Some(offset);
        }
        offset += f.kind.width();
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Int(u32),
    Raw(&'a [u8]),
}

/// Field values read from a table, in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues<'a> {
    entries: Vec<(&'static str, FieldValue<'a>)>,
}

impl<'a> FieldValues<'a> {
    pub fn get(&self, name: &str) -> Option<FieldValue<'a>> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn int(&self, name: &str) -> Option<u32> {
        match self.get(name)? {
            FieldValue::Int(v) => Some(v),
            FieldValue::Raw(_) => None,
        }
    }

    pub fn raw(&self, name: &str) -> Option<&'a [u8]> {
        match self.get(name)? {
            FieldValue::Raw(v) => Some(v),
            FieldValue::Int(_) => None,
        }
    }

    /// Replace the value of an existing field
    pub fn set(&mut self, name: &str, value: FieldValue<'a>) -> bool {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => {
                entry.1 = value;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, FieldValue<'a>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read every field of `fields` in the reader's byte order
pub fn read_table<'a>(
    reader: &mut EndianReader<'a>,
    fields: &[Field],
    values: &mut FieldValues<'a>,
) -> io::Result<()> {
    for f in fields {
        let value = match f.kind {
            FieldKind::U8 => FieldValue::Int(reader.read_u8()? as u32),
            FieldKind::U16 => FieldValue::Int(reader.read_u16()? as u32),
            FieldKind::U32 => FieldValue::Int(reader.read_u32()?),
            FieldKind::Raw(len) => FieldValue::Raw(reader.read_slice(len)?),
        };
        values.entries.push((f.name, value));
    }
    Ok(())
}

/// Write the values of `fields` in the writer's byte order.
///
/// Fails with `InvalidData` when a field has no value of the matching kind,
/// which happens only if `values` was read from different tables.
pub fn write_table(
    writer: &mut EndianWriter,
    fields: &[Field],
    values: &FieldValues<'_>,
) -> io::Result<()> {
    for f in fields {
        match (f.kind, values.get(f.name)) {
            (FieldKind::U8, Some(FieldValue::Int(v))) => writer.write_u8(v as u8),
            (FieldKind::U16, Some(FieldValue::Int(v))) => writer.write_u16(v as u16),
            (FieldKind::U32, Some(FieldValue::Int(v))) => writer.write_u32(v),
            (FieldKind::Raw(len), Some(FieldValue::Raw(bytes))) if bytes.len() == len => {
                writer.write_bytes(bytes)
            }
            (kind, value) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("field {} ({:?}) has no matching value: {:?}", f.name, kind, value),
                ))
            }
        }
    }
    Ok(())
}
