use log::debug;

use crate::id3::frames::{Frame, FrameId};
use crate::id3::header::{BigEndianU32, HEADER_SIZE};

/// Ordered list of frames read from one tag.
///
/// Order on disk is preserved. Duplicate ids are kept, but lookups and
/// replacements only ever address the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameTable {
    frames: Vec<Frame>,
}

impl FrameTable {
    pub fn new() -> Self {
        FrameTable { frames: Vec::new() }
    }

    /// Parse frames from a tag body using the v2.3 frame layout.
    ///
    /// Parsing stops quietly at padding (a zero id byte) or at a frame whose
    /// declared size runs past the end of the body. Frames read before that
    /// point are kept.
    pub fn parse(body: &[u8]) -> Self {
        let mut frames = Vec::with_capacity(16);
        let mut offset = 0usize;

        while offset + HEADER_SIZE <= body.len() {
            let head = &body[offset..offset + HEADER_SIZE];
            if head[0] == 0 {
                debug!("padding at offset {}, {} bytes dropped", offset, body.len() - offset);
                break;
            }

            let id = FrameId([head[0], head[1], head[2], head[3]]);
            let size = BigEndianU32::decode([head[4], head[5], head[6], head[7]]) as usize;
            let flags = u16::from_be_bytes([head[8], head[9]]);

            let remaining = body.len() - offset - HEADER_SIZE;
            if size > remaining {
                debug!(
                    "frame {} at offset {} declares {} bytes, only {} left; stopping",
                    id, offset, size, remaining
                );
                break;
            }

            let start = offset + HEADER_SIZE;
            frames.push(Frame {
                id,
                flags,
                data: body[start..start + size].to_vec(),
            });
            offset = start + size;
        }

        debug!("parsed {} frames from {} byte tag body", frames.len(), body.len());
        FrameTable { frames }
    }

    /// First frame with the given id.
    pub fn get(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == id)
    }

    /// First frame whose id is exactly the 4-character string `id`.
    pub fn lookup(&self, id: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id.as_bytes().as_slice() == id.as_bytes())
    }

    pub fn position(&self, id: FrameId) -> Option<usize> {
        self.frames.iter().position(|f| f.id == id)
    }

    /// Replace the payload of the first frame with `id`, keeping its position
    /// and flags, or append a new frame with zero flags.
    /// Returns true if a frame was appended.
    pub fn set(&mut self, id: FrameId, data: Vec<u8>) -> bool {
        match self.frames.iter_mut().find(|f| f.id == id) {
            Some(frame) => {
                frame.data = data;
                false
            }
            None => {
                self.frames.push(Frame::new(id, data));
                true
            }
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Size of the tag body these frames render to: sum of header + payload.
    pub fn encoded_len(&self) -> u64 {
        self.frames.iter().map(|f| f.encoded_len() as u64).sum()
    }

    /// Serialize all frames in order, with no padding.
    pub fn render(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.encoded_len() as usize);
        for frame in &self.frames {
            frame.write_to(&mut data);
        }
        data
    }
}

impl<'a> IntoIterator for &'a FrameTable {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
