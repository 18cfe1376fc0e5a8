//! Command line surface: argument shapes, modifier mapping and the fixed
//! text layout printed for views and edits.

use std::fmt::Write as _;
use std::path::PathBuf;

use structopt::StructOpt;

use crate::common::error::{Result, TagError};
use crate::id3::frames::KnownFrame;
use crate::id3::specs::DecodeMode;
use crate::id3::writer::TagData;
use crate::id3::{self, EditOutcome, TagView, ViewOptions};

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";
const BANNER: &str = "                  MP3 TAG READER & EDITOR                   ";

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mp3tag",
    about = "Read and edit ID3v2.3 tags in MP3 files",
    after_help = "Modifiers:\n  -t  Title\n  -A  Artist\n  -a  Album\n  -y  Year\n  -G  Genre\n  -c  Comment"
)]
pub struct Opt {
    /// View the tags of FILE
    #[structopt(
        short = "v",
        long = "view",
        parse(from_os_str),
        value_name = "FILE",
        conflicts_with = "edit"
    )]
    pub view: Option<PathBuf>,

    /// Set one tag: -e <MODIFIER> <NEW_VALUE> <FILE>
    #[structopt(
        short = "e",
        long = "edit",
        number_of_values = 3,
        allow_hyphen_values = true,
        value_names = &["MODIFIER", "NEW_VALUE", "FILE"]
    )]
    pub edit: Option<Vec<String>>,

    /// Decode wide text properly instead of the legacy byte narrowing
    #[structopt(short = "u", long = "unicode")]
    pub unicode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    View { path: PathBuf, options: ViewOptions },
    Edit { path: PathBuf, data: TagData },
}

impl Opt {
    pub fn operation(self) -> Result<Operation> {
        if let Some(path) = self.view {
            let mode = if self.unicode {
                DecodeMode::Unicode
            } else {
                DecodeMode::Legacy
            };
            return Ok(Operation::View {
                path,
                options: ViewOptions { mode },
            });
        }

        match self.edit.as_deref() {
            Some([modifier, value, file]) => {
                let frame = frame_for_modifier(modifier)?;
                Ok(Operation::Edit {
                    path: PathBuf::from(file),
                    data: TagData::new(frame, value.as_str())?,
                })
            }
            Some(_) => Err(TagError::MissingArgument("-e <MODIFIER> <NEW_VALUE> <FILE>")),
            None => Err(TagError::MissingArgument("-v <FILE> or -e <MODIFIER> <NEW_VALUE> <FILE>")),
        }
    }
}

/// Map an edit modifier flag to the frame it changes.
pub fn frame_for_modifier(modifier: &str) -> Result<KnownFrame> {
    match modifier {
        "-t" => Ok(KnownFrame::Title),
        "-A" => Ok(KnownFrame::Artist),
        "-a" => Ok(KnownFrame::Album),
        "-y" => Ok(KnownFrame::Year),
        "-G" | "-g" => Ok(KnownFrame::Genre),
        "-c" => Ok(KnownFrame::Comment),
        other => Err(TagError::UnsupportedModifier(other.to_string())),
    }
}

/// Execute an operation and return the text to print.
pub fn run(op: Operation) -> Result<String> {
    match op {
        Operation::View { path, options } => {
            let view = id3::view_tag(&path, options)?;
            Ok(render_view(&view))
        }
        Operation::Edit { path, data } => {
            let outcome = id3::edit_tag(&path, &data)?;
            Ok(render_edit(&outcome))
        }
    }
}

pub fn render_view(view: &TagView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Version ID : {}.{}", view.version.0, view.version.1);
    let _ = writeln!(out, "{}", THIN_RULE);
    for frame in [
        KnownFrame::Title,
        KnownFrame::Album,
        KnownFrame::Year,
        KnownFrame::Genre,
        KnownFrame::Artist,
        KnownFrame::Comment,
    ] {
        let _ = writeln!(out, "{:<10} : {}", frame.label(), view.get(frame).unwrap_or(""));
    }
    let _ = writeln!(out);
    // Artwork is not extracted; the line is kept for output compatibility.
    let _ = writeln!(out, "Extracting Album Art - Done");
    let _ = writeln!(out, "{}", RULE);
    out
}

pub fn render_edit(outcome: &EditOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "{} Modification - Done", outcome.frame.label());
    let _ = writeln!(out, "{}", RULE);
    out
}
