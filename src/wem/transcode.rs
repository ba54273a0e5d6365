// Container transcoding
//
// All transforms read an immutable input buffer and build a fresh output
// buffer. Nothing is written back into the input.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{FormatError, Result, WemError};
use crate::utils::io::{write_atomic, EndianReader, EndianWriter};
use crate::wem::platform::source_order;
use crate::wem::schema::{self, FieldValue, FieldValues};
use crate::wem::{
    needs_legacy_strip, validate_container, ByteOrder, Platform, CURRENT_CB_SIZE, DATA_MAGIC,
    DOWNGRADE_FIELD_OFFSET, DOWNGRADE_FIELD_VALUE, FMT_CURRENT_LEN, LEGACY_VORB_HEADER_LEN,
};

// Bytes read by the legacy strip before it copies the remainder verbatim:
// RIFF header, fmt header, 16 fmt bytes, cbSize, 6 fmt bytes, vorb header
const LEGACY_STRIP_MIN_LEN: usize = 12 + 8 + 16 + 2 + 6 + LEGACY_VORB_HEADER_LEN;

/// Remove the separate vorb chunk header from a legacy container.
///
/// The RIFF size shrinks by 8, the fmt length becomes 66 and cbSize becomes
/// 48; every other byte is copied unchanged. Callers decide whether the input
/// needs it (see [`needs_legacy_strip`]).
pub fn strip_legacy(data: &[u8]) -> Result<Vec<u8>> {
    let (platform, order) = source_order(data)?;
    if data.len() < LEGACY_STRIP_MIN_LEN {
        return Err(FormatError::ShortHeader {
            needed: LEGACY_STRIP_MIN_LEN as u64,
            len: data.len() as u64,
        }
        .into());
    }

    let mut reader = EndianReader::new(data, order);
    let mut writer = EndianWriter::with_capacity(data.len() - LEGACY_VORB_HEADER_LEN, order);

    writer.write_bytes(reader.read_slice(4)?);
    let riff_size = reader.read_u32()?;
    let stripped_size = riff_size
        .checked_sub(LEGACY_VORB_HEADER_LEN as u32)
        .ok_or(FormatError::SizeMismatch {
            declared: riff_size,
            expected: data.len() as u64 - 8,
        })?;
    writer.write_u32(stripped_size);

    // form type + fmt magic
    writer.write_bytes(reader.read_slice(8)?);
    reader.skip(4)?;
    writer.write_u32(FMT_CURRENT_LEN);

    writer.write_bytes(reader.read_slice(16)?);
    reader.skip(2)?;
    writer.write_u16(CURRENT_CB_SIZE);

    writer.write_bytes(reader.read_slice(6)?);
    reader.skip(LEGACY_VORB_HEADER_LEN as u64)?;
    writer.write_bytes(reader.read_rest());

    debug!(%platform, riff_size, stripped_size, "stripped legacy vorb header");
    Ok(writer.into_inner())
}

/// Strip the legacy vorb header only when the container still has one
pub fn convert_legacy_if_needed(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    if needs_legacy_strip(data) {
        Ok(Cow::Owned(strip_legacy(data)?))
    } else {
        Ok(Cow::Borrowed(data))
    }
}

/// Force the 4-byte field at offset 40 to 3.
///
/// The chunk layout is validated first, but the field itself is written
/// blind: whatever value sits at that offset is replaced.
pub fn downgrade_schema_field(data: &[u8]) -> Result<Vec<u8>> {
    validate_container(data)?;
    let (_, order) = source_order(data)?;

    let end = DOWNGRADE_FIELD_OFFSET + 4;
    if data.len() < end {
        return Err(FormatError::ShortHeader {
            needed: end as u64,
            len: data.len() as u64,
        }
        .into());
    }

    let mut out = data.to_vec();
    let mut reader = EndianReader::new(data, order);
    reader.seek_to(DOWNGRADE_FIELD_OFFSET as u64);
    let current = reader.read_u32()?;
    if current != DOWNGRADE_FIELD_VALUE {
        let value = match order {
            ByteOrder::Little => DOWNGRADE_FIELD_VALUE.to_le_bytes(),
            ByteOrder::Big => DOWNGRADE_FIELD_VALUE.to_be_bytes(),
        };
        out[DOWNGRADE_FIELD_OFFSET..end].copy_from_slice(&value);
        debug!(from = current, to = DOWNGRADE_FIELD_VALUE, "downgraded field at offset 40");
    }
    Ok(out)
}

/// Progress of a platform swap. Each state is entered only after the
/// previous region has been fully consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStage {
    Start,
    MagicSwapped,
    HeaderFieldsSwapped,
    SeekTableCopied,
    CodebookCopied,
    PacketStreamCopied,
    Done,
}

impl fmt::Display for SwapStage {
    // Describes the work pending in each state
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending = match self {
            SwapStage::Start => "reading the RIFF header",
            SwapStage::MagicSwapped => "copying the fmt and data headers",
            SwapStage::HeaderFieldsSwapped => "copying the seek table",
            SwapStage::SeekTableCopied => "copying the codebook",
            SwapStage::CodebookCopied => "copying the packet stream",
            SwapStage::PacketStreamCopied => "finishing the output",
            SwapStage::Done => "done",
        };
        f.write_str(pending)
    }
}

struct PlatformSwap<'a> {
    reader: EndianReader<'a>,
    writer: EndianWriter,
    target: Platform,
    stage: SwapStage,
}

impl<'a> PlatformSwap<'a> {
    fn new(data: &'a [u8], source: Platform, order: ByteOrder) -> Self {
        PlatformSwap {
            reader: EndianReader::new(data, order),
            writer: EndianWriter::with_capacity(data.len(), order.flipped()),
            target: source.opposite(),
            stage: SwapStage::Start,
        }
    }

    fn advance(&mut self, next: SwapStage) {
        debug!(from = ?self.stage, to = ?next, at = self.reader.position(), "swap stage");
        self.stage = next;
    }

    fn fail(&self, offset: u64, err: io::Error) -> WemError {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            WemError::IncompleteAudio {
                stage: self.stage,
                offset,
            }
        } else {
            WemError::Io(err)
        }
    }

    fn read_u16(&mut self) -> Result<u16> {
        let at = self.reader.position();
        self.reader.read_u16().map_err(|e| self.fail(at, e))
    }

    fn read_slice(&mut self, count: usize) -> Result<&'a [u8]> {
        let at = self.reader.position();
        self.reader.read_slice(count).map_err(|e| self.fail(at, e))
    }

    fn read_table(&mut self, fields: &[schema::Field], values: &mut FieldValues<'a>) -> Result<()> {
        let at = self.reader.position();
        schema::read_table(&mut self.reader, fields, values).map_err(|e| self.fail(at, e))
    }

    fn run(mut self) -> Result<Vec<u8>> {
        let mut values = FieldValues::default();

        self.read_table(schema::RIFF_HEADER, &mut values)?;
        if let Some(magic) = self.target.magic() {
            values.set("magic", FieldValue::Raw(magic));
        }
        schema::write_table(&mut self.writer, schema::RIFF_HEADER, &values)?;
        self.advance(SwapStage::MagicSwapped);

        self.read_table(schema::FMT_HEADER, &mut values)?;
        let fmt_length = values.int("fmt_length").unwrap_or_default();
        if fmt_length != FMT_CURRENT_LEN {
            return Err(WemError::UnsupportedSchema { fmt_length });
        }
        self.read_table(schema::FMT_CURRENT_BODY, &mut values)?;
        self.read_table(schema::DATA_HEADER, &mut values)?;
        if let Some(tag) = values.raw("data_magic").filter(|tag| *tag != &DATA_MAGIC[..]) {
            return Err(FormatError::DataTag {
                found: FormatError::tag(tag),
            }
            .into());
        }

        let start = values.int("loop_start_packet_offset").unwrap_or_default();
        let end = values.int("loop_end_packet_offset").unwrap_or_default();
        let seek_table_size = values.int("seek_table_size").unwrap_or_default();
        if seek_table_size % 4 != 0 {
            return Err(FormatError::SeekTableSize {
                found: seek_table_size,
            }
            .into());
        }
        if end < start {
            return Err(FormatError::LoopRange { start, end }.into());
        }

        for table in &schema::SWAP_HEADER[1..] {
            schema::write_table(&mut self.writer, table, &values)?;
        }
        self.advance(SwapStage::HeaderFieldsSwapped);

        for _ in 0..seek_table_size / 4 {
            let granularity = self.read_u16()?;
            self.writer.write_u16(granularity);
            let value = self.read_u16()?;
            self.writer.write_u16(value);
        }
        self.advance(SwapStage::SeekTableCopied);

        let codebook_size = self.read_u16()?;
        self.writer.write_u16(codebook_size);
        let codebook = self.read_slice(codebook_size as usize)?;
        self.writer.write_bytes(codebook);
        self.advance(SwapStage::CodebookCopied);

        let budget = (end - start) as u64;
        let mut consumed = 0u64;
        let mut packets = 0usize;
        while consumed < budget {
            let size = self.read_u16()?;
            self.writer.write_u16(size);
            let payload = self.read_slice(size as usize)?;
            self.writer.write_bytes(payload);
            consumed += 2 + size as u64;
            packets += 1;
            trace!(packet = packets, size, consumed, "copied packet");
        }
        self.advance(SwapStage::PacketStreamCopied);

        // Bytes past the packet budget are copied untouched; the declared
        // RIFF and data sizes cover them
        let trailing = self.reader.read_rest();
        if !trailing.is_empty() {
            debug!(bytes = trailing.len(), "copying bytes after the packet stream");
            self.writer.write_bytes(trailing);
        }
        debug!(packets, target = %self.target, "platform swap complete");
        self.advance(SwapStage::Done);
        Ok(self.writer.into_inner())
    }
}

/// Convert a container between PC (RIFF, little endian) and console (RIFX,
/// big endian).
///
/// Every integer field is re-serialized in the opposite byte order; tags,
/// the codebook hash, the block sizes, the codebook and packet payloads are
/// copied verbatim, as are any bytes after the packet stream. Only the
/// current 66-byte fmt layout is supported.
pub fn swap_platform(data: &[u8]) -> Result<Vec<u8>> {
    let (platform, order) = source_order(data)?;
    validate_container(data)?;
    debug!(source = %platform, "swapping platform");
    PlatformSwap::new(data, platform, order).run()
}

/// Apply `transform` to the file at `input` and write the result to `output`.
///
/// The destination is only replaced once the whole transform succeeded.
pub fn transcode_file<F>(input: &Path, output: &Path, transform: F) -> Result<()>
where
    F: FnOnce(&[u8]) -> Result<Vec<u8>>,
{
    let data = std::fs::read(input)?;
    let out = transform(&data)?;
    write_atomic(output, &out)?;
    debug!(input = %input.display(), output = %output.display(), bytes = out.len(), "wrote container");
    Ok(())
}
