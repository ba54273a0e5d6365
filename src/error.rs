// Error types for container operations

use thiserror::Error;

use crate::wem::SwapStage;

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, WemError>;

/// Structural problems found while reading a container header.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("file truncated: declared RIFF size {declared}, expected {expected} (file length - 8)")]
    SizeMismatch { declared: u32, expected: u64 },

    #[error("file truncated: header needs {needed} bytes, file has {len}")]
    ShortHeader { needed: u64, len: u64 },

    #[error("unexpected form type: expected \"WAVE\", found {found:?}")]
    FormType { found: String },

    #[error("unexpected fmt tag: expected \"fmt \", found {found:?}")]
    FmtTag { found: String },

    #[error("unexpected fmt length: expected 24 or 66, found {found}")]
    FmtLength { found: u32 },

    #[error("unexpected format tag: expected 0xFFFF, found {found:#06X}")]
    FormatTag { found: u16 },

    #[error("unexpected cbSize: expected 6, found {found}")]
    CbSize { found: u16 },

    #[error("unexpected vorb tag: expected \"vorb\", found {found:?}")]
    VorbTag { found: String },

    #[error("unexpected vorb length: expected 42, found {found}")]
    VorbLength { found: u32 },

    #[error("unexpected data tag: expected \"data\", found {found:?}")]
    DataTag { found: String },

    #[error("unexpected seek table size: {found} is not a multiple of 4")]
    SeekTableSize { found: u32 },

    #[error("unexpected loop range: loop end {end} is before loop start {start}")]
    LoopRange { start: u32, end: u32 },
}

impl FormatError {
    pub(crate) fn tag(found: &[u8]) -> String {
        String::from_utf8_lossy(found).into_owned()
    }
}

/// Errors surfaced by the transcoder and its collaborators.
#[derive(Debug, Error)]
pub enum WemError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("unsupported platform: magic {magic:?} is neither \"RIFF\" nor \"RIFX\"")]
    UnsupportedPlatform { magic: String },

    #[error("unsupported fmt length {fmt_length} for platform conversion, expected 66")]
    UnsupportedSchema { fmt_length: u32 },

    #[error(
        "incomplete or corrupt audio: input ended at byte {offset} while {stage}. \
         The file was probably damaged by an earlier conversion; regenerate the PC \
         package, import it and build the console package from that, or remaster \
         the audio for console"
    )]
    IncompleteAudio { stage: SwapStage, offset: u64 },

    #[error("audio file not supported: {extension:?}")]
    UnsupportedVersion { extension: String },

    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WemError {
    pub(crate) fn unsupported_platform(magic: &[u8]) -> Self {
        Self::UnsupportedPlatform {
            magic: FormatError::tag(magic),
        }
    }

    pub(crate) fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
