use std::io::Write;
use std::path::Path;

use log::debug;

use crate::common::error::{Result, TagError};
use crate::common::util;
use crate::id3::frames::KnownFrame;
use crate::id3::header::{TagHeader, HEADER_SIZE, SYNCSAFE_MAX};
use crate::id3::tags::FrameTable;

/// Longest accepted value: one payload byte is reserved for the encoding.
pub const MAX_VALUE_LEN: usize = 254;

/// A validated request to set one frame to a new value. An empty value
/// clears the frame's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagData {
    frame: KnownFrame,
    value: String,
}

impl TagData {
    pub fn new(frame: KnownFrame, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() > MAX_VALUE_LEN {
            return Err(TagError::ValueTooLong {
                len: value.len(),
                max: MAX_VALUE_LEN,
            });
        }
        Ok(TagData { frame, value })
    }

    pub fn frame(&self) -> KnownFrame {
        self.frame
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Apply an edit to a frame table: the first frame with the target id gets
/// the new payload in place, or a new frame is appended at the end.
/// The flag is true when the frame was appended.
pub fn mutate(mut table: FrameTable, edit: &TagData) -> (FrameTable, bool) {
    let payload = edit.frame.build_payload(&edit.value);
    let size = payload.len();
    let appended = table.set(edit.frame.id(), payload);
    if appended {
        debug!("appended {} frame ({} bytes)", edit.frame, size);
    } else {
        debug!("replaced {} frame ({} bytes)", edit.frame, size);
    }
    (table, appended)
}

/// Build a complete tag (header + frames, no padding) from a frame table,
/// keeping the signature, version and flags of `header`.
pub fn render_tag(header: &TagHeader, table: &FrameTable) -> Result<Vec<u8>> {
    let size = table.encoded_len();
    if size > SYNCSAFE_MAX as u64 {
        return Err(TagError::TagTooLarge { size });
    }

    let mut tag = Vec::with_capacity(HEADER_SIZE + size as usize);
    tag.extend_from_slice(&header.render(size as u32)?);
    for frame in table {
        frame.write_to(&mut tag);
    }
    Ok(tag)
}

/// Rewrite the file at `path` as the rebuilt tag followed by the original
/// audio, which starts right after the tag described by `header`.
///
/// The new file replaces the old one with a single rename; if anything fails
/// before that the original is left untouched.
pub fn serialize_and_commit(table: &FrameTable, header: &TagHeader, path: &Path) -> Result<()> {
    let tag = render_tag(header, table)?;
    let mut src = util::open_ro(path)?;
    let audio_offset = header.full_size();

    util::replace_file(path, move |out: &mut dyn Write| {
        out.write_all(&tag)?;
        let copied = util::copy_tail(&mut src, audio_offset, out)?;
        debug!(
            "wrote {} byte tag and {} audio bytes from offset {}",
            tag.len(),
            copied,
            audio_offset
        );
        Ok(())
    })
}
