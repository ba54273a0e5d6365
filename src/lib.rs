// wemkit - Wwise RIFF/RIFX audio container toolkit
//
// Validates Wwise vorbis containers, removes the legacy vorb chunk header,
// normalizes the downgrade field and converts containers between the PC
// (RIFF, little endian) and console (RIFX, big endian) byte orders.

pub mod error;
pub mod tools;
pub mod wem;

mod utils;

#[cfg(feature = "python")]
mod python;

use std::path::Path;

pub use error::{FormatError, Result, WemError};
pub use tools::{decode_to_ogg, AudioTool, ProcessTool, WwiseVersion};
pub use wem::transcode::transcode_file;
pub use wem::{
    convert_legacy_if_needed, detect_platform, downgrade_schema_field, inspect,
    needs_legacy_strip, strip_legacy, swap_platform, validate_container, ByteOrder,
    ContainerInfo, FmtShape, Platform, SwapStage,
};

/// Read a container from disk and validate its header
pub fn validate_file(path: &Path) -> Result<()> {
    let data = std::fs::read(path)?;
    validate_container(&data)
}

/// Strip the legacy vorb header from `input` if it has one; otherwise copy it
pub fn strip_legacy_file(input: &Path, output: &Path) -> Result<()> {
    transcode_file(input, output, |data| {
        convert_legacy_if_needed(data).map(|out| out.into_owned())
    })
}

pub fn downgrade_file(input: &Path, output: &Path) -> Result<()> {
    transcode_file(input, output, downgrade_schema_field)
}

pub fn swap_platform_file(input: &Path, output: &Path) -> Result<()> {
    transcode_file(input, output, swap_platform)
}
