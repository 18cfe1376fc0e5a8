use byteorder::{BigEndian, ByteOrder};

use crate::common::error::{Result, TagError};

/// Largest value a 4-byte syncsafe integer can hold (28 bits).
pub const SYNCSAFE_MAX: u32 = (1 << 28) - 1;

/// Size of the tag header, and of every frame header in v2.3.
pub const HEADER_SIZE: usize = 10;

/// Syncsafe integer encoding used in the ID3v2 tag header.
/// Each byte uses only 7 bits (MSB is always 0).
pub struct Syncsafe;

impl Syncsafe {
    /// Decode 4 syncsafe bytes, most significant first. High bits are ignored.
    pub fn decode(data: [u8; 4]) -> u32 {
        data.iter()
            .fold(0u32, |acc, &b| (acc << 7) | (b & 0x7F) as u32)
    }

    /// Encode a value as 4 syncsafe bytes. Values above 28 bits are rejected.
    pub fn encode(value: u32) -> Result<[u8; 4]> {
        if value > SYNCSAFE_MAX {
            return Err(TagError::TagTooLarge { size: value as u64 });
        }
        Ok([
            ((value >> 21) & 0x7F) as u8,
            ((value >> 14) & 0x7F) as u8,
            ((value >> 7) & 0x7F) as u8,
            (value & 0x7F) as u8,
        ])
    }
}

/// Plain 32-bit big-endian integers, used for v2.3 frame sizes.
pub struct BigEndianU32;

impl BigEndianU32 {
    pub fn decode(data: [u8; 4]) -> u32 {
        BigEndian::read_u32(&data)
    }

    pub fn encode(value: u32) -> [u8; 4] {
        let mut out = [0u8; 4];
        BigEndian::write_u32(&mut out, value);
        out
    }
}

/// Parsed ID3v2 header (10 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub version: (u8, u8), // (major, revision), (3, 0) for ID3v2.3
    pub flags: u8,         // kept as-is, never interpreted
    pub size: u32,         // tag size excluding the 10-byte header
}

impl TagHeader {
    /// Check for the "ID3" signature. Shorter input never matches.
    pub fn has_signature(data: &[u8]) -> bool {
        data.len() >= 3 && &data[0..3] == b"ID3"
    }

    /// Parse the 10-byte header. The signature is checked before the length,
    /// so a short non-ID3 file reports a missing header rather than truncation.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if !Self::has_signature(data) {
            return Err(TagError::NoHeader);
        }
        if data.len() < HEADER_SIZE {
            return Err(TagError::TruncatedHeader(data.len()));
        }

        Ok(TagHeader {
            version: (data[3], data[4]),
            flags: data[5],
            size: Syncsafe::decode([data[6], data[7], data[8], data[9]]),
        })
    }

    /// Offset of the first byte after the tag, where the audio starts.
    pub fn full_size(&self) -> u64 {
        HEADER_SIZE as u64 + self.size as u64
    }

    /// Serialize with a new body size, keeping signature, version and flags.
    pub fn render(&self, size: u32) -> Result<[u8; HEADER_SIZE]> {
        let size_bytes = Syncsafe::encode(size)?;
        let mut out = [0u8; HEADER_SIZE];
        out[0..3].copy_from_slice(b"ID3");
        out[3] = self.version.0;
        out[4] = self.version.1;
        out[5] = self.flags;
        out[6..10].copy_from_slice(&size_bytes);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syncsafe_known_values() {
        assert_eq!(Syncsafe::decode([0x00, 0x00, 0x00, 0x0D]), 13);
        assert_eq!(Syncsafe::decode([0x00, 0x00, 0x02, 0x01]), 257);
        assert_eq!(Syncsafe::decode([0x7F, 0x7F, 0x7F, 0x7F]), SYNCSAFE_MAX);
        assert_eq!(Syncsafe::encode(257).unwrap(), [0x00, 0x00, 0x02, 0x01]);
    }

    #[test]
    fn syncsafe_ignores_high_bits() {
        assert_eq!(Syncsafe::decode([0x80, 0x80, 0x80, 0x81]), 1);
    }

    #[test]
    fn syncsafe_round_trip_across_range() {
        let mut v = 0u32;
        while v <= SYNCSAFE_MAX {
            let bytes = Syncsafe::encode(v).unwrap();
            assert!(bytes.iter().all(|b| b & 0x80 == 0));
            assert_eq!(Syncsafe::decode(bytes), v);
            v = v * 3 + 1;
        }
        assert_eq!(Syncsafe::decode(Syncsafe::encode(SYNCSAFE_MAX).unwrap()), SYNCSAFE_MAX);
    }

    #[test]
    fn syncsafe_rejects_overflow() {
        let err = Syncsafe::encode(SYNCSAFE_MAX + 1).unwrap_err();
        assert!(matches!(err, TagError::TagTooLarge { .. }));
    }

    #[test]
    fn big_endian() {
        assert_eq!(BigEndianU32::decode([0x00, 0x00, 0x01, 0x02]), 258);
        assert_eq!(BigEndianU32::encode(0x0A0B0C0D), [0x0A, 0x0B, 0x0C, 0x0D]);
    }

    #[test]
    fn parse_header() {
        let h = TagHeader::parse(b"ID3\x03\x00\x40\x00\x00\x02\x01").unwrap();
        assert_eq!(h.version, (3, 0));
        assert_eq!(h.flags, 0x40);
        assert_eq!(h.size, 257);
        assert_eq!(h.full_size(), 267);
    }

    #[test]
    fn parse_rejects_bad_signature_and_short_input() {
        assert!(matches!(
            TagHeader::parse(b"TAG\x03\x00\x00\x00\x00\x00\x00"),
            Err(TagError::NoHeader)
        ));
        assert!(matches!(TagHeader::parse(b"ID"), Err(TagError::NoHeader)));
        assert!(matches!(
            TagHeader::parse(b"ID3\x03\x00"),
            Err(TagError::TruncatedHeader(5))
        ));
    }

    #[test]
    fn render_keeps_version_and_flags() {
        let h = TagHeader {
            version: (3, 1),
            flags: 0x20,
            size: 999,
        };
        let out = h.render(13).unwrap();
        assert_eq!(&out, b"ID3\x03\x01\x20\x00\x00\x00\x0D");
    }
}
