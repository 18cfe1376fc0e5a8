use std::fmt;

use crate::common::error::{Result, TagError};
use crate::id3::header::{BigEndianU32, HEADER_SIZE};

/// Language code written into every comment frame built by an edit.
pub const COMMENT_LANG: &[u8; 3] = b"eng";

/// Raw 4-byte frame identifier as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub [u8; 4]);

impl FrameId {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl From<KnownFrame> for FrameId {
    fn from(k: KnownFrame) -> Self {
        k.id()
    }
}

/// The six frames this crate can show and edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownFrame {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Comment,
}

impl KnownFrame {
    pub const ALL: [KnownFrame; 6] = [
        KnownFrame::Title,
        KnownFrame::Artist,
        KnownFrame::Album,
        KnownFrame::Year,
        KnownFrame::Genre,
        KnownFrame::Comment,
    ];

    pub fn id(self) -> FrameId {
        FrameId(*match self {
            KnownFrame::Title => b"TIT2",
            KnownFrame::Artist => b"TPE1",
            KnownFrame::Album => b"TALB",
            KnownFrame::Year => b"TYER",
            KnownFrame::Genre => b"TCON",
            KnownFrame::Comment => b"COMM",
        })
    }

    pub fn from_id(id: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.id().as_bytes() == id.as_bytes())
            .ok_or_else(|| TagError::UnknownFrame(id.to_string()))
    }

    /// Display label used in view output and edit confirmations.
    pub fn label(self) -> &'static str {
        match self {
            KnownFrame::Title => "Title",
            KnownFrame::Artist => "Artist",
            KnownFrame::Album => "Album",
            KnownFrame::Year => "Year",
            KnownFrame::Genre => "Genre",
            KnownFrame::Comment => "Comment",
        }
    }

    /// Build the payload an edit writes for this frame: Latin-1 encoding byte,
    /// then the value bytes. Comments also get the language and an empty
    /// description.
    pub fn build_payload(self, value: &str) -> Vec<u8> {
        let text = value.as_bytes();
        match self {
            KnownFrame::Comment => {
                let mut data = Vec::with_capacity(5 + text.len());
                data.push(0);
                data.extend_from_slice(COMMENT_LANG);
                data.push(0);
                data.extend_from_slice(text);
                data
            }
            _ => {
                let mut data = Vec::with_capacity(1 + text.len());
                data.push(0);
                data.extend_from_slice(text);
                data
            }
        }
    }
}

impl fmt::Display for KnownFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id().fmt(f)
    }
}

/// A v2.3 frame: id, opaque flags and the raw payload it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: FrameId,
    pub flags: u16,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(id: FrameId, data: Vec<u8>) -> Self {
        Frame { id, flags: 0, data }
    }

    /// Payload size as stored in the frame header.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Bytes this frame occupies in a tag body, header included.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.data.len()
    }

    /// Append the frame header and payload to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.id.as_bytes());
        out.extend_from_slice(&BigEndianU32::encode(self.data.len() as u32));
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(&self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids() {
        assert_eq!(KnownFrame::Title.id().to_string(), "TIT2");
        assert_eq!(KnownFrame::Comment.to_string(), "COMM");
        assert_eq!(KnownFrame::from_id("TYER").unwrap(), KnownFrame::Year);
        assert!(matches!(
            KnownFrame::from_id("TRCK"),
            Err(TagError::UnknownFrame(_))
        ));
    }

    #[test]
    fn text_payload() {
        assert_eq!(KnownFrame::Album.build_payload("AB"), vec![0, b'A', b'B']);
    }

    #[test]
    fn comment_payload() {
        assert_eq!(
            KnownFrame::Comment.build_payload("Hi"),
            vec![0, b'e', b'n', b'g', 0, b'H', b'i']
        );
    }

    #[test]
    fn write_frame_bytes() {
        let mut frame = Frame::new(KnownFrame::Title.id(), vec![0, b'A', b'B']);
        frame.flags = 0x0040;
        let mut out = Vec::new();
        frame.write_to(&mut out);
        assert_eq!(out, b"TIT2\x00\x00\x00\x03\x00\x40\x00AB");
        assert_eq!(frame.encoded_len(), out.len());
    }
}
