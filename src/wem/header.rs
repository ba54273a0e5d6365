// Container header validation and inspection

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{FormatError, Result};
use crate::utils::io::EndianReader;
use crate::wem::platform::source_order;
use crate::wem::schema::{self, FieldValue, FieldValues};
use crate::wem::{
    detect_platform, ByteOrder, Platform, CURRENT_CB_SIZE, DATA_MAGIC, FMT_BODY_OFFSET,
    FMT_CURRENT_LEN, FMT_LEGACY_LEN, FMT_LENGTH_OFFSET, FMT_MAGIC, FORMAT_TAG_EXTENSIBLE,
    LEGACY_CB_SIZE, RIFF_SIZE_OFFSET, VORB_LEN, VORB_MAGIC, WAVE_FORM,
};

/// Which of the two known fmt layouts a container uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FmtShape {
    /// fmt length 24 plus a separate vorb chunk
    Legacy,
    /// fmt length 66 with the vorb fields inlined
    Current,
}

impl FmtShape {
    pub fn from_length(length: u32) -> Option<Self> {
        match length {
            FMT_LEGACY_LEN => Some(FmtShape::Legacy),
            FMT_CURRENT_LEN => Some(FmtShape::Current),
            _ => None,
        }
    }

    /// Offset of the data chunk header from the start of the file
    pub fn data_offset(self) -> u64 {
        match self {
            FmtShape::Legacy => FMT_BODY_OFFSET + (FMT_LEGACY_LEN + 8 + VORB_LEN) as u64,
            FmtShape::Current => FMT_BODY_OFFSET + FMT_CURRENT_LEN as u64,
        }
    }
}

/// Summary of a validated container
#[derive(Debug, Clone, Serialize)]
pub struct ContainerInfo {
    pub platform: Platform,
    pub byte_order: ByteOrder,
    pub file_size: u64,
    pub riff_size: u32,
    pub fmt_length: u32,
    pub shape: FmtShape,
    /// Integer fmt (and, for legacy files, vorb) fields by name
    pub fields: BTreeMap<String, u32>,
    pub hash_codebook: Option<String>,
    pub data_size: Option<u32>,
    pub seek_entries: Option<u32>,
    pub codebook_size: Option<u16>,
}

fn ensure(reader: &EndianReader<'_>, count: u64) -> std::result::Result<(), FormatError> {
    if reader.remaining() < count {
        return Err(FormatError::ShortHeader {
            needed: reader.position() + count,
            len: reader.len(),
        });
    }
    Ok(())
}

/// Check the chunk layout of a container against the two known fmt layouts.
///
/// Every failure names the offending field and the value that was expected,
/// since these errors are how broken output from external tools is diagnosed.
pub fn validate_container(data: &[u8]) -> Result<()> {
    let (platform, order) = source_order(data)?;
    let mut reader = EndianReader::new(data, order);

    reader.seek_to(RIFF_SIZE_OFFSET);
    ensure(&reader, 4)?;
    let declared = reader.read_u32()?;
    let expected = reader.len().saturating_sub(8);
    if declared as u64 != expected {
        return Err(FormatError::SizeMismatch { declared, expected }.into());
    }

    ensure(&reader, 4)?;
    let form = reader.read_fourcc()?;
    if &form != WAVE_FORM {
        return Err(FormatError::FormType {
            found: FormatError::tag(&form),
        }
        .into());
    }

    ensure(&reader, 4)?;
    let fmt = reader.read_fourcc()?;
    if &fmt != FMT_MAGIC {
        return Err(FormatError::FmtTag {
            found: FormatError::tag(&fmt),
        }
        .into());
    }

    ensure(&reader, 4)?;
    let fmt_length = reader.read_u32()?;
    let shape = FmtShape::from_length(fmt_length)
        .ok_or(FormatError::FmtLength { found: fmt_length })?;

    if shape == FmtShape::Legacy {
        ensure(&reader, 2)?;
        let format_tag = reader.read_u16()?;
        if format_tag != FORMAT_TAG_EXTENSIBLE {
            return Err(FormatError::FormatTag { found: format_tag }.into());
        }

        ensure(&reader, 16)?;
        reader.skip(14)?;
        let cb_size = reader.read_u16()?;
        if cb_size != LEGACY_CB_SIZE {
            return Err(FormatError::CbSize { found: cb_size }.into());
        }

        ensure(&reader, 10)?;
        reader.skip(6)?;
        let vorb = reader.read_fourcc()?;
        if &vorb != VORB_MAGIC {
            return Err(FormatError::VorbTag {
                found: FormatError::tag(&vorb),
            }
            .into());
        }

        ensure(&reader, 4)?;
        let vorb_length = reader.read_u32()?;
        if vorb_length != VORB_LEN {
            return Err(FormatError::VorbLength { found: vorb_length }.into());
        }
    }

    debug!(%platform, fmt_length, "container header ok");
    Ok(())
}

/// True when the fmt chunk uses the legacy 24-byte layout.
///
/// Unknown platforms and inputs too short to hold the fmt length are never
/// candidates.
pub fn needs_legacy_strip(data: &[u8]) -> bool {
    let Some(order) = detect_platform(data).byte_order() else {
        return false;
    };
    let mut reader = EndianReader::new(data, order);
    reader.seek_to(FMT_LENGTH_OFFSET);
    matches!(reader.read_u32(), Ok(FMT_LEGACY_LEN))
}

/// Validate a container and decode its header fields
pub fn inspect(data: &[u8]) -> Result<ContainerInfo> {
    validate_container(data)?;
    let (platform, order) = source_order(data)?;
    let mut reader = EndianReader::new(data, order);

    let mut values = FieldValues::default();
    schema::read_table(&mut reader, schema::RIFF_HEADER, &mut values)?;
    schema::read_table(&mut reader, schema::FMT_HEADER, &mut values)?;

    let fmt_length = values.int("fmt_length").unwrap_or_default();
    let shape = FmtShape::from_length(fmt_length).ok_or(FormatError::FmtLength { found: fmt_length })?;

    // A validated header may still be cut short inside the fmt body
    let body = match shape {
        FmtShape::Current => vec![schema::FMT_CURRENT_BODY],
        FmtShape::Legacy => vec![
            schema::FMT_COMMON_BODY,
            schema::VORB_HEADER,
            &schema::FMT_CURRENT_BODY[schema::FMT_COMMON_BODY.len()..],
        ],
    };
    for table in body {
        ensure(&reader, schema::table_width(table) as u64)?;
        schema::read_table(&mut reader, table, &mut values)?;
    }

    let mut fields = BTreeMap::new();
    let mut hash_codebook = None;
    for (name, value) in values.iter() {
        match value {
            FieldValue::Int(v) => {
                fields.insert(name.to_string(), *v);
            }
            FieldValue::Raw(bytes) if *name == "hash_codebook" => {
                hash_codebook = Some(bytes.iter().map(|b| format!("{:02x}", b)).collect());
            }
            FieldValue::Raw(_) => {}
        }
    }
    for name in ["riff_size", "fmt_length", "vorb_length"] {
        fields.remove(name);
    }

    let mut info = ContainerInfo {
        platform,
        byte_order: order,
        file_size: data.len() as u64,
        riff_size: values.int("riff_size").unwrap_or_default(),
        fmt_length,
        shape,
        fields,
        hash_codebook,
        data_size: None,
        seek_entries: None,
        codebook_size: None,
    };

    reader.seek_to(shape.data_offset());
    if let (Ok(tag), Ok(size)) = (reader.read_fourcc(), reader.read_u32()) {
        if &tag == DATA_MAGIC {
            info.data_size = Some(size);
            let seek_table_size = values.int("seek_table_size").unwrap_or_default();
            if seek_table_size % 4 == 0 {
                info.seek_entries = Some(seek_table_size / 4);
                if reader.skip(seek_table_size as u64).is_ok() {
                    info.codebook_size = reader.read_u16().ok();
                }
            }
        }
    }

    if shape == FmtShape::Current && values.int("cb_size") != Some(CURRENT_CB_SIZE as u32) {
        debug!(cb_size = ?values.int("cb_size"), "unusual cbSize for the current layout");
    }

    Ok(info)
}
