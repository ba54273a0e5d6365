// Platform detection from the container magic

use serde::Serialize;

use crate::error::{Result, WemError};
use crate::wem::{RIFF_MAGIC, RIFX_MAGIC};

/// Byte order of every multi-byte field in a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn flipped(self) -> Self {
        match self {
            ByteOrder::Little => ByteOrder::Big,
            ByteOrder::Big => ByteOrder::Little,
        }
    }
}

/// Target platform family of a container.
///
/// `Unknown` is returned for any magic other than "RIFF"/"RIFX"; it is not
/// an error on its own, but every transform refuses to run on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// "RIFF", little endian
    Pc,
    /// "RIFX", big endian
    Console,
    Unknown,
}

impl Platform {
    pub fn byte_order(self) -> Option<ByteOrder> {
        match self {
            Platform::Pc => Some(ByteOrder::Little),
            Platform::Console => Some(ByteOrder::Big),
            Platform::Unknown => None,
        }
    }

    pub fn is_console(self) -> bool {
        self == Platform::Console
    }

    pub fn is_known(self) -> bool {
        self != Platform::Unknown
    }

    pub fn magic(self) -> Option<&'static [u8; 4]> {
        match self {
            Platform::Pc => Some(RIFF_MAGIC),
            Platform::Console => Some(RIFX_MAGIC),
            Platform::Unknown => None,
        }
    }

    /// The platform a swap converts to
    pub fn opposite(self) -> Self {
        match self {
            Platform::Pc => Platform::Console,
            Platform::Console => Platform::Pc,
            Platform::Unknown => Platform::Unknown,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Pc => write!(f, "PC (RIFF, little endian)"),
            Platform::Console => write!(f, "console (RIFX, big endian)"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a container by its first four bytes.
///
/// Inputs shorter than four bytes are `Unknown`.
pub fn detect_platform(data: &[u8]) -> Platform {
    match data.get(..4) {
        Some(tag) if tag == RIFF_MAGIC => Platform::Pc,
        Some(tag) if tag == RIFX_MAGIC => Platform::Console,
        _ => Platform::Unknown,
    }
}

/// Platform and byte order of a container, or `UnsupportedPlatform` for an
/// unrecognized magic
pub(crate) fn source_order(data: &[u8]) -> Result<(Platform, ByteOrder)> {
    let platform = detect_platform(data);
    match platform.byte_order() {
        Some(order) => Ok((platform, order)),
        None => Err(WemError::unsupported_platform(&data[..data.len().min(4)])),
    }
}
