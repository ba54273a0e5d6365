// I/O utilities for reading and writing containers

use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::Path;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::wem::ByteOrder;

/// Reader over an immutable input buffer with a runtime byte order
pub struct EndianReader<'a> {
    cursor: Cursor<&'a [u8]>,
    order: ByteOrder,
}

impl<'a> EndianReader<'a> {
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        EndianReader {
            cursor: Cursor::new(data),
            order,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    pub fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    pub fn remaining(&self) -> u64 {
        self.len().saturating_sub(self.position())
    }

    pub fn seek_to(&mut self, position: u64) {
        self.cursor.set_position(position);
    }

    pub fn skip(&mut self, count: u64) -> io::Result<()> {
        if self.remaining() < count {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("cannot skip {} bytes, {} left", count, self.remaining()),
            ));
        }
        self.cursor.set_position(self.position() + count);
        Ok(())
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.cursor.read_u8()
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        match self.order {
            ByteOrder::Little => self.cursor.read_u16::<LittleEndian>(),
            ByteOrder::Big => self.cursor.read_u16::<BigEndian>(),
        }
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        match self.order {
            ByteOrder::Little => self.cursor.read_u32::<LittleEndian>(),
            ByteOrder::Big => self.cursor.read_u32::<BigEndian>(),
        }
    }

    pub fn read_fourcc(&mut self) -> io::Result<[u8; 4]> {
        let mut tag = [0u8; 4];
        self.cursor.read_exact(&mut tag)?;
        Ok(tag)
    }

    /// Borrow the next `count` bytes without copying them
    pub fn read_slice(&mut self, count: usize) -> io::Result<&'a [u8]> {
        let start = self.position() as usize;
        let data: &'a [u8] = *self.cursor.get_ref();
        let end = start
            .checked_add(count)
            .filter(|&end| end <= data.len())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("need {} bytes at offset {}, {} left", count, start, self.remaining()),
                )
            })?;
        self.cursor.set_position(end as u64);
        Ok(&data[start..end])
    }

    /// Borrow everything from the current position to the end
    pub fn read_rest(&mut self) -> &'a [u8] {
        let start = (self.position() as usize).min(self.cursor.get_ref().len());
        let data: &'a [u8] = *self.cursor.get_ref();
        self.cursor.set_position(data.len() as u64);
        &data[start..]
    }
}

/// Writer into a freshly allocated output buffer
pub struct EndianWriter {
    buffer: Vec<u8>,
    order: ByteOrder,
}

impl EndianWriter {
    pub fn with_capacity(capacity: usize, order: ByteOrder) -> Self {
        EndianWriter {
            buffer: Vec::with_capacity(capacity),
            order,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        match self.order {
            ByteOrder::Little => self.buffer.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::Big => self.buffer.extend_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn write_u32(&mut self, value: u32) {
        match self.order {
            ByteOrder::Little => self.buffer.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::Big => self.buffer.extend_from_slice(&value.to_be_bytes()),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

/// Write `data` to `path` through a temporary sibling so a failure never
/// leaves a partial destination behind
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = (|| {
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(data)?;
        f.sync_all()?;
        drop(f);

        #[cfg(windows)]
        {
            if path.exists() {
                // Windows rename fails if destination exists.
                fs::remove_file(path)?;
            }
        }

        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
