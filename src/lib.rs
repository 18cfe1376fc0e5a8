pub mod cli;
pub mod common;
pub mod id3;

pub use common::error::{ErrorKind, Result, TagError};
pub use id3::frames::{Frame, FrameId, KnownFrame};
pub use id3::header::{BigEndianU32, Syncsafe, TagHeader};
pub use id3::specs::{decode_comment, decode_text, DecodeMode};
pub use id3::tags::FrameTable;
pub use id3::writer::{mutate, serialize_and_commit, TagData};
pub use id3::{edit_tag, load_tag, load_tag_from_data, view_tag, EditOutcome, Id3Tag, TagView, ViewOptions};
