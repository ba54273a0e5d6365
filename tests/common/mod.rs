// Hand-assembled containers shared by the integration tests

#![allow(dead_code)]

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Little,
    Big,
}

/// Byte buffer that writes integers in a fixed byte order
pub struct Bytes {
    order: Order,
    pub buf: Vec<u8>,
}

impl Bytes {
    pub fn new(order: Order) -> Self {
        Bytes { order, buf: Vec::new() }
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        match self.order {
            Order::Little => self.buf.extend_from_slice(&v.to_le_bytes()),
            Order::Big => self.buf.extend_from_slice(&v.to_be_bytes()),
        }
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        match self.order {
            Order::Little => self.buf.extend_from_slice(&v.to_le_bytes()),
            Order::Big => self.buf.extend_from_slice(&v.to_be_bytes()),
        }
        self
    }

    pub fn raw(&mut self, v: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(v);
        self
    }
}

pub fn put_u32(data: &mut [u8], offset: usize, value: u32, order: Order) {
    let bytes = match order {
        Order::Little => value.to_le_bytes(),
        Order::Big => value.to_be_bytes(),
    };
    data[offset..offset + 4].copy_from_slice(&bytes);
}

pub fn get_u32(data: &[u8], offset: usize, order: Order) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    match order {
        Order::Little => u32::from_le_bytes(bytes),
        Order::Big => u32::from_be_bytes(bytes),
    }
}

pub fn get_u16(data: &[u8], offset: usize, order: Order) -> u16 {
    let bytes = [data[offset], data[offset + 1]];
    match order {
        Order::Little => u16::from_le_bytes(bytes),
        Order::Big => u16::from_be_bytes(bytes),
    }
}

/// Rewrite the RIFF size so it matches the buffer length
pub fn fix_riff_size(data: &mut [u8], order: Order) {
    let size = data.len() as u32 - 8;
    put_u32(data, 4, size, order);
}

const PACKETS: &[&[u8]] = &[&[0x01, 0x02, 0x03, 0x04], &[0x05], &[0x06, 0x07]];
const CODEBOOK: &[u8] = &[0xC0, 0xDE, 0xB0, 0x0C];
const SEEK: &[(u16, u16)] = &[(0x0040, 0x0002), (0x0080, 0x0009), (0x00C0, 0x000C)];

fn packet_len() -> u32 {
    PACKETS.iter().map(|p| 2 + p.len() as u32).sum()
}

fn common_fields(b: &mut Bytes, cb_size: u16) {
    b.u16(0xFFFF) // format tag
        .u16(1) // channels
        .u32(44100)
        .u32(16000)
        .u16(0)
        .u16(0)
        .u16(cb_size)
        .u16(0)
        .u32(4); // channel mask, the downgrade slot
}

fn vorb_fields(b: &mut Bytes, loop_start: u32) {
    b.u32(441000) // sample count
        .u32(loop_start)
        .u32(loop_start + packet_len())
        .u16(0)
        .u16(0)
        .u32(SEEK.len() as u32 * 4)
        .u32(0x30)
        .u16(0x0200)
        .u16(0x0020)
        .u32(0x7700)
        .u32(0x8800)
        .raw(&[0x10, 0x20, 0x30, 0x40])
        .u8(8)
        .u8(11);
}

fn data_chunk(b: &mut Bytes) {
    let size = SEEK.len() as u32 * 4 + 2 + CODEBOOK.len() as u32 + packet_len();
    b.raw(b"data").u32(size);
    for &(g, v) in SEEK {
        b.u16(g).u16(v);
    }
    b.u16(CODEBOOK.len() as u16).raw(CODEBOOK);
    for p in PACKETS {
        b.u16(p.len() as u16).raw(p);
    }
}

fn magic(order: Order) -> &'static [u8] {
    match order {
        Order::Little => b"RIFF",
        Order::Big => b"RIFX",
    }
}

/// Container with the 66-byte fmt chunk
pub fn current(order: Order) -> Vec<u8> {
    let mut b = Bytes::new(order);
    b.raw(magic(order)).u32(0).raw(b"WAVE").raw(b"fmt ").u32(66);
    common_fields(&mut b, 48);
    vorb_fields(&mut b, 0);
    data_chunk(&mut b);
    let mut out = b.buf;
    fix_riff_size(&mut out, order);
    out
}

/// Container with a 24-byte fmt chunk and a separate 42-byte vorb chunk
pub fn legacy(order: Order) -> Vec<u8> {
    let mut b = Bytes::new(order);
    b.raw(magic(order)).u32(0).raw(b"WAVE").raw(b"fmt ").u32(24);
    common_fields(&mut b, 6);
    b.raw(b"vorb").u32(42);
    vorb_fields(&mut b, 0);
    data_chunk(&mut b);
    let mut out = b.buf;
    fix_riff_size(&mut out, order);
    out
}
