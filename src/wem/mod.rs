// Wwise RIFF/RIFX container support
//
// Container Structure:
// - RIFF header (12 bytes)
//   - Magic: "RIFF" (little endian, PC) or "RIFX" (big endian, console)
//   - Declared size: file length - 8 (4 bytes, platform byte order)
//   - Form type: "WAVE" (4 bytes)
// - fmt chunk
//   - Magic: "fmt " (4 bytes)
//   - Declared length: 24 (legacy) or 66 (current)
//   - Body: 24 bytes followed by a "vorb" chunk of length 42 (legacy), or
//     66 bytes with the vorb fields inlined (current)
// - data chunk
//   - Magic: "data" (4 bytes) + declared size
//   - Seek table: seek_table_size / 4 pairs of u16
//   - Codebook: u16 length + raw bytes
//   - Packet stream: u16 length + raw bytes, until loop_end - loop_start
//     bytes have been consumed

pub mod header;
pub mod platform;
pub mod schema;
pub mod transcode;

#[cfg(test)]
pub(crate) mod fixtures;

pub use header::{inspect, needs_legacy_strip, validate_container, ContainerInfo, FmtShape};
pub use platform::{detect_platform, ByteOrder, Platform};
pub use transcode::{
    convert_legacy_if_needed, downgrade_schema_field, strip_legacy, swap_platform, SwapStage,
};

pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const RIFX_MAGIC: &[u8; 4] = b"RIFX";
pub const WAVE_FORM: &[u8; 4] = b"WAVE";
pub const FMT_MAGIC: &[u8; 4] = b"fmt ";
pub const VORB_MAGIC: &[u8; 4] = b"vorb";
pub const DATA_MAGIC: &[u8; 4] = b"data";

/// fmt chunk length of the legacy (Wwise 2010) layout
pub const FMT_LEGACY_LEN: u32 = 24;
/// fmt chunk length of the current layout with inlined vorb fields
pub const FMT_CURRENT_LEN: u32 = 66;
/// Declared length of the legacy vorb chunk
pub const VORB_LEN: u32 = 42;

/// WAVE_FORMAT_EXTENSIBLE-style tag used by Wwise vorbis
pub const FORMAT_TAG_EXTENSIBLE: u16 = 0xFFFF;
pub const LEGACY_CB_SIZE: u16 = 6;
pub const CURRENT_CB_SIZE: u16 = 48;

// Absolute offsets shared by both layouts
pub(crate) const RIFF_SIZE_OFFSET: u64 = 4;
pub(crate) const FMT_LENGTH_OFFSET: u64 = 16;
pub(crate) const FMT_BODY_OFFSET: u64 = 20;

/// Offset of the field normalized by [`downgrade_schema_field`]
pub const DOWNGRADE_FIELD_OFFSET: usize = 40;
pub const DOWNGRADE_FIELD_VALUE: u32 = 3;

/// Size of the region ("vorb" + length) dropped by [`strip_legacy`]
pub(crate) const LEGACY_VORB_HEADER_LEN: usize = 8;
