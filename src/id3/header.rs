use byteorder::{BigEndian, ByteOrder};

use crate::common::error::{TagError, Result};

/// Largest value a 4-byte synchsafe integer can hold (128^4 - 1).
pub const MAX_SYNCHSAFE: u32 = (1 << 28) - 1;

/// ID3v2 header length in bytes.
pub const HEADER_LEN: usize = 10;

/// Length of the optional ID3v2.4 footer (`"3DI"` + copy of the header).
pub const FOOTER_LEN: usize = 10;

const FLAG_FOOTER: u8 = 0x10;

/// `"ID3"`, version 2.3.0, no flags.
pub const DEFAULT_HEADER_PREFIX: [u8; 6] = [b'I', b'D', b'3', 3, 0, 0];

/// Encode `n` as a 4-byte synchsafe integer (7 significant bits per byte).
pub fn encode_synchsafe(n: u32) -> Result<[u8; 4]> {
    if n > MAX_SYNCHSAFE {
        return Err(TagError::EncodingOverflow {
            value: n as u64,
            limit: MAX_SYNCHSAFE as u64,
        });
    }
    let mut out = [0u8; 4];
    let mut rest = n;
    for (i, byte) in out.iter_mut().enumerate() {
        let place = 128u32.pow(3 - i as u32);
        *byte = (rest / place) as u8;
        rest %= place;
    }
    Ok(out)
}

/// Decode a 4-byte synchsafe integer.
///
/// Bytes are accumulated as `value * 128 + byte`. A set top bit is kept.
pub fn decode_synchsafe(data: &[u8; 4]) -> u32 {
    data.iter().fold(0u32, |acc, &b| acc * 128 + b as u32)
}

/// Encode a frame length as a plain 4-byte big-endian integer.
pub fn encode_frame_length(n: usize) -> Result<[u8; 4]> {
    let n = u32::try_from(n).map_err(|_| TagError::EncodingOverflow {
        value: n as u64,
        limit: u32::MAX as u64,
    })?;
    let mut out = [0u8; 4];
    BigEndian::write_u32(&mut out, n);
    Ok(out)
}

pub fn decode_frame_length(data: &[u8; 4]) -> u32 {
    BigEndian::read_u32(data)
}

/// Parsed ID3v2 header (10 bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ID3Header {
    pub version: (u8, u8),
    pub flags: u8,
    /// Tag size excluding the 10-byte header.
    pub size: u32,
}

impl ID3Header {
    /// Parse the header at the start of `data`, `None` if there is no `"ID3"` magic.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < HEADER_LEN || &data[0..3] != b"ID3" {
            return None;
        }
        let mut size = [0u8; 4];
        size.copy_from_slice(&data[6..10]);
        Some(ID3Header {
            version: (data[3], data[4]),
            flags: data[5],
            size: decode_synchsafe(&size),
        })
    }

    /// Only ID3v2.4 defines the footer flag.
    pub fn has_footer(&self) -> bool {
        self.version.0 == 4 && self.flags & FLAG_FOOTER != 0
    }

    /// End of the tag body, i.e. header plus `size`.
    pub fn body_end(&self) -> usize {
        HEADER_LEN + self.size as usize
    }

    /// Full tag size including the header and any footer.
    pub fn full_size(&self) -> usize {
        let mut s = self.body_end();
        if self.has_footer() {
            s += FOOTER_LEN;
        }
        s
    }

    /// Prefix for a rewritten tag.
    ///
    /// Frames are always written in the v2.3 layout, so only a v2.3 header is
    /// kept as-is (with flags cleared); anything else gets the default prefix.
    pub fn rewrite_prefix(&self) -> [u8; 6] {
        if self.version.0 == 3 {
            [b'I', b'D', b'3', self.version.0, self.version.1, 0]
        } else {
            DEFAULT_HEADER_PREFIX
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synchsafe_zero() {
        assert_eq!(encode_synchsafe(0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(decode_synchsafe(&[0, 0, 0, 0]), 0);
    }

    #[test]
    fn synchsafe_known_values() {
        assert_eq!(encode_synchsafe(1024).unwrap(), [0, 0, 8, 0]);
        assert_eq!(encode_synchsafe(127).unwrap(), [0, 0, 0, 127]);
        assert_eq!(encode_synchsafe(128).unwrap(), [0, 0, 1, 0]);
        assert_eq!(encode_synchsafe(MAX_SYNCHSAFE).unwrap(), [127, 127, 127, 127]);
    }

    #[test]
    fn synchsafe_never_sets_top_bit() {
        for n in [1u32, 255, 4096, 65_535, 2_000_000, 99_999_999, MAX_SYNCHSAFE] {
            let bytes = encode_synchsafe(n).unwrap();
            assert!(bytes.iter().all(|b| b & 0x80 == 0), "{n}: {bytes:?}");
            assert_eq!(decode_synchsafe(&bytes), n);
        }
    }

    #[test]
    fn synchsafe_overflow() {
        let err = encode_synchsafe(MAX_SYNCHSAFE + 1).unwrap_err();
        assert!(matches!(err, TagError::EncodingOverflow { limit, .. } if limit == MAX_SYNCHSAFE as u64));
    }

    #[test]
    fn frame_length_is_base_256() {
        assert_eq!(encode_frame_length(0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(encode_frame_length(5).unwrap(), [0, 0, 0, 5]);
        assert_eq!(encode_frame_length(256).unwrap(), [0, 0, 1, 0]);
        assert_eq!(encode_frame_length(0x0102_0304).unwrap(), [1, 2, 3, 4]);
        assert_eq!(decode_frame_length(&[0xFF, 0xFF, 0xFF, 0xFF]), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn frame_length_overflow() {
        let err = encode_frame_length(u32::MAX as usize + 1).unwrap_err();
        assert!(matches!(err, TagError::EncodingOverflow { .. }));
    }

    #[test]
    fn header_parse() {
        let data = [b'I', b'D', b'3', 4, 0, 0x80, 0, 0, 8, 0, 0xAA];
        let h = ID3Header::parse(&data).unwrap();
        assert_eq!(h.version, (4, 0));
        assert_eq!(h.flags, 0x80);
        assert_eq!(h.size, 1024);
        assert_eq!(h.full_size(), 1034);
        assert_eq!(h.rewrite_prefix(), DEFAULT_HEADER_PREFIX);
    }

    #[test]
    fn synchsafe_top_bit_not_masked() {
        assert_eq!(decode_synchsafe(&[0, 0, 0x80, 0]), 16_384);
        assert_eq!(decode_synchsafe(&[0, 0, 0, 0xFF]), 255);
    }

    #[test]
    fn v24_footer_counted() {
        let data = [b'I', b'D', b'3', 4, 0, 0x10, 0, 0, 0, 20];
        let h = ID3Header::parse(&data).unwrap();
        assert!(h.has_footer());
        assert_eq!(h.body_end(), 30);
        assert_eq!(h.full_size(), 40);
    }

    #[test]
    fn footer_flag_ignored_before_v24() {
        let data = [b'I', b'D', b'3', 3, 0, 0x10, 0, 0, 0, 20];
        let h = ID3Header::parse(&data).unwrap();
        assert!(!h.has_footer());
        assert_eq!(h.full_size(), 30);
    }

    #[test]
    fn v23_prefix_kept_without_flags() {
        let data = [b'I', b'D', b'3', 3, 1, 0x40, 0, 0, 0, 10];
        let h = ID3Header::parse(&data).unwrap();
        assert_eq!(h.rewrite_prefix(), [b'I', b'D', b'3', 3, 1, 0]);
    }

    #[test]
    fn no_magic_no_header() {
        assert!(ID3Header::parse(b"\xFF\xFB\x90\x00 audio data").is_none());
        assert!(ID3Header::parse(b"ID3").is_none());
    }
}
