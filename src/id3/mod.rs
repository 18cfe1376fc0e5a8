pub mod header;
pub mod specs;
pub mod frames;
pub mod tags;
pub mod writer;

use std::io::Read;
use std::path::Path;

use log::{info, warn};

use crate::common::error::{Result, TagError};
use crate::common::util::open_ro;
use crate::id3::frames::{Frame, KnownFrame};
use crate::id3::header::{TagHeader, HEADER_SIZE};
use crate::id3::specs::{decode_comment_with, decode_text_with, DecodeMode};
use crate::id3::tags::FrameTable;
use crate::id3::writer::TagData;

/// A tag read from the start of a file: its header and the frames in order.
#[derive(Debug, Clone)]
pub struct Id3Tag {
    pub header: TagHeader,
    pub frames: FrameTable,
}

impl Id3Tag {
    pub fn get(&self, frame: KnownFrame) -> Option<&Frame> {
        self.frames.get(frame.id())
    }

    /// Display value of a recognized frame, if present and non-empty.
    pub fn value(&self, frame: KnownFrame, mode: DecodeMode) -> Option<String> {
        let f = self.get(frame)?;
        match frame {
            KnownFrame::Comment => decode_comment_with(f, mode),
            _ => decode_text_with(f, mode),
        }
    }
}

/// Read the tag header and body from `reader` and parse the frames.
///
/// Frames are always read with the v2.3 layout; other versions only warn.
pub fn read_tag<R: Read>(reader: &mut R) -> Result<Id3Tag> {
    let mut head = Vec::with_capacity(HEADER_SIZE);
    reader.by_ref().take(HEADER_SIZE as u64).read_to_end(&mut head)?;
    let header = TagHeader::parse(&head)?;

    if header.version.0 != 3 {
        warn!(
            "ID3v2.{}.{} tag, reading frames as v2.3",
            header.version.0, header.version.1
        );
    }

    let mut body = Vec::new();
    reader.by_ref().take(header.size as u64).read_to_end(&mut body)?;
    if body.len() < header.size as usize {
        return Err(TagError::TruncatedTag {
            declared: header.size,
            available: body.len() as u64,
        });
    }

    let frames = FrameTable::parse(&body);
    Ok(Id3Tag { header, frames })
}

/// Load the ID3v2 tag at the start of the file at `path`.
pub fn load_tag(path: &Path) -> Result<Id3Tag> {
    let mut file = open_ro(path)?;
    read_tag(&mut file)
}

/// Load a tag from a byte slice (used when data is already in memory).
pub fn load_tag_from_data(mut data: &[u8]) -> Result<Id3Tag> {
    read_tag(&mut data)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub mode: DecodeMode,
}

/// Decoded values of the recognized frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagView {
    pub version: (u8, u8),
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub comment: Option<String>,
}

impl TagView {
    pub fn from_tag(tag: &Id3Tag, options: ViewOptions) -> Self {
        let value = |k| tag.value(k, options.mode);
        TagView {
            version: tag.header.version,
            title: value(KnownFrame::Title),
            artist: value(KnownFrame::Artist),
            album: value(KnownFrame::Album),
            year: value(KnownFrame::Year),
            genre: value(KnownFrame::Genre),
            comment: value(KnownFrame::Comment),
        }
    }

    pub fn get(&self, frame: KnownFrame) -> Option<&str> {
        match frame {
            KnownFrame::Title => self.title.as_deref(),
            KnownFrame::Artist => self.artist.as_deref(),
            KnownFrame::Album => self.album.as_deref(),
            KnownFrame::Year => self.year.as_deref(),
            KnownFrame::Genre => self.genre.as_deref(),
            KnownFrame::Comment => self.comment.as_deref(),
        }
    }
}

pub fn view_tag(path: &Path, options: ViewOptions) -> Result<TagView> {
    let tag = load_tag(path)?;
    Ok(TagView::from_tag(&tag, options))
}

/// What an edit did to the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    pub frame: KnownFrame,
    pub appended: bool,
    pub old_tag_size: u32,
    pub new_tag_size: u32,
}

/// Set one recognized frame in the file at `path` and rewrite the file.
///
/// The source is fully read and validated before anything is written.
pub fn edit_tag(path: &Path, edit: &TagData) -> Result<EditOutcome> {
    let tag = load_tag(path)?;
    let (frames, appended) = writer::mutate(tag.frames, edit);
    writer::serialize_and_commit(&frames, &tag.header, path)?;

    let outcome = EditOutcome {
        frame: edit.frame(),
        appended,
        old_tag_size: tag.header.size,
        new_tag_size: frames.encoded_len() as u32,
    };
    info!(
        "updated {} in {} (tag {} -> {} bytes)",
        outcome.frame,
        path.display(),
        outcome.old_tag_size,
        outcome.new_tag_size
    );
    Ok(outcome)
}
