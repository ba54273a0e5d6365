// Synthetic containers for unit tests

use crate::utils::io::EndianWriter;
use crate::wem::{ByteOrder, FMT_CURRENT_LEN, FMT_LEGACY_LEN, FORMAT_TAG_EXTENSIBLE, VORB_LEN};

pub(crate) struct ContainerBuilder {
    pub order: ByteOrder,
    pub channels: u16,
    pub sample_rate: u32,
    pub channel_mask: u32,
    pub loop_start: u32,
    pub seek_table: Vec<(u16, u16)>,
    pub codebook: Vec<u8>,
    pub packets: Vec<Vec<u8>>,
    pub trailing: Vec<u8>,
}

impl ContainerBuilder {
    pub fn new(order: ByteOrder) -> Self {
        ContainerBuilder {
            order,
            channels: 2,
            sample_rate: 48000,
            channel_mask: 3,
            loop_start: 0,
            seek_table: vec![(0x0100, 0x0010), (0x0200, 0x0020)],
            codebook: vec![0xDE, 0xAD, 0xBE, 0xEF, 0x01],
            packets: vec![vec![0x11, 0x22, 0x33], vec![0x44], vec![0x55, 0x66]],
            trailing: Vec::new(),
        }
    }

    pub fn packet_bytes(&self) -> u32 {
        self.packets.iter().map(|p| 2 + p.len() as u32).sum()
    }

    fn magic(&self) -> &'static [u8; 4] {
        match self.order {
            ByteOrder::Little => b"RIFF",
            ByteOrder::Big => b"RIFX",
        }
    }

    fn write_common(&self, w: &mut EndianWriter, cb_size: u16) {
        w.write_u16(FORMAT_TAG_EXTENSIBLE);
        w.write_u16(self.channels);
        w.write_u32(self.sample_rate);
        w.write_u32(24000);
        w.write_u16(0);
        w.write_u16(0);
        w.write_u16(cb_size);
        w.write_u16(0);
        w.write_u32(self.channel_mask);
    }

    // The 42 bytes that follow the common fields in the current layout
    fn write_vorb_fields(&self, w: &mut EndianWriter) {
        w.write_u32(96000);
        w.write_u32(self.loop_start);
        w.write_u32(self.loop_start + self.packet_bytes());
        w.write_u16(0);
        w.write_u16(0);
        w.write_u32(self.seek_table.len() as u32 * 4);
        w.write_u32(0x2A);
        w.write_u16(0x0180);
        w.write_u16(0x0010);
        w.write_u32(0x1000);
        w.write_u32(0x2000);
        w.write_bytes(&[0xAB, 0xCD, 0xEF, 0x12]);
        w.write_u8(8);
        w.write_u8(11);
    }

    fn write_data(&self, w: &mut EndianWriter) {
        let data_size = self.seek_table.len() as u32 * 4
            + 2
            + self.codebook.len() as u32
            + self.packet_bytes()
            + self.trailing.len() as u32;
        w.write_bytes(b"data");
        w.write_u32(data_size);
        for &(a, b) in &self.seek_table {
            w.write_u16(a);
            w.write_u16(b);
        }
        w.write_u16(self.codebook.len() as u16);
        w.write_bytes(&self.codebook);
        for p in &self.packets {
            w.write_u16(p.len() as u16);
            w.write_bytes(p);
        }
        w.write_bytes(&self.trailing);
    }

    fn finish(&self, w: EndianWriter) -> Vec<u8> {
        let mut out = w.into_inner();
        let riff_size = out.len() as u32 - 8;
        let size = match self.order {
            ByteOrder::Little => riff_size.to_le_bytes(),
            ByteOrder::Big => riff_size.to_be_bytes(),
        };
        out[4..8].copy_from_slice(&size);
        out
    }

    /// fmt length 66 with inlined vorb fields
    pub fn build_current(&self) -> Vec<u8> {
        let mut w = EndianWriter::with_capacity(256, self.order);
        w.write_bytes(self.magic());
        w.write_u32(0);
        w.write_bytes(b"WAVE");
        w.write_bytes(b"fmt ");
        w.write_u32(FMT_CURRENT_LEN);
        self.write_common(&mut w, 48);
        self.write_vorb_fields(&mut w);
        self.write_data(&mut w);
        self.finish(w)
    }

    /// fmt length 24 followed by a separate vorb chunk
    pub fn build_legacy(&self) -> Vec<u8> {
        let mut w = EndianWriter::with_capacity(256, self.order);
        w.write_bytes(self.magic());
        w.write_u32(0);
        w.write_bytes(b"WAVE");
        w.write_bytes(b"fmt ");
        w.write_u32(FMT_LEGACY_LEN);
        self.write_common(&mut w, 6);
        w.write_bytes(b"vorb");
        w.write_u32(VORB_LEN);
        self.write_vorb_fields(&mut w);
        self.write_data(&mut w);
        self.finish(w)
    }
}

/// Overwrite a u32 at `offset` in the given byte order
pub(crate) fn put_u32(data: &mut [u8], offset: usize, value: u32, order: ByteOrder) {
    let bytes = match order {
        ByteOrder::Little => value.to_le_bytes(),
        ByteOrder::Big => value.to_be_bytes(),
    };
    data[offset..offset + 4].copy_from_slice(&bytes);
}

pub(crate) fn put_u16(data: &mut [u8], offset: usize, value: u16, order: ByteOrder) {
    let bytes = match order {
        ByteOrder::Little => value.to_le_bytes(),
        ByteOrder::Big => value.to_be_bytes(),
    };
    data[offset..offset + 2].copy_from_slice(&bytes);
}
