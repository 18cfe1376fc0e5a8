use std::borrow::Cow;

use memchr::memchr;

use crate::id3::frames::Frame;

/// Offset of the comment description: encoding byte + 3-byte language.
const COMMENT_DESC_START: usize = 4;

/// How text payloads are turned into display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Byte-oriented decoding kept for output compatibility. Wide text is
    /// narrowed by keeping every second byte after the order mark, which
    /// corrupts anything outside the single-byte range.
    #[default]
    Legacy,
    /// Proper decoding of all four ID3v2 text encodings.
    Unicode,
}

/// Text encoding types used in ID3v2 frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Encoding {
    Latin1 = 0,
    Utf16 = 1,
    Utf16Be = 2,
    Utf8 = 3,
}

impl Encoding {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Encoding::Latin1),
            1 => Some(Encoding::Utf16),
            2 => Some(Encoding::Utf16Be),
            3 => Some(Encoding::Utf8),
            _ => None,
        }
    }

    fn is_wide(self) -> bool {
        matches!(self, Encoding::Utf16 | Encoding::Utf16Be)
    }
}

/// Decode a text information frame (TIT2, TPE1, ...) with the legacy rules.
pub fn decode_text(frame: &Frame) -> Option<String> {
    decode_text_with(frame, DecodeMode::Legacy)
}

/// Decode a COMM frame's text with the legacy rules.
pub fn decode_comment(frame: &Frame) -> Option<String> {
    decode_comment_with(frame, DecodeMode::Legacy)
}

/// Decode a text information frame. Returns `None` when the payload holds
/// no text beyond the encoding byte.
pub fn decode_text_with(frame: &Frame, mode: DecodeMode) -> Option<String> {
    let data = &frame.data;
    if data.len() <= 1 {
        return None;
    }
    let (enc, rest) = (data[0], &data[1..]);

    match (mode, Encoding::from_byte(enc)) {
        (DecodeMode::Unicode, Some(encoding)) => {
            non_empty(decode_with(rest, encoding).trim_end_matches('\0'))
        }
        _ => Some(bytes_to_string(&legacy_text_bytes(enc, rest))),
    }
}

/// Decode a comment frame: encoding, language, terminated description, text.
///
/// Returns `None` when there is no description terminator or nothing after it.
pub fn decode_comment_with(frame: &Frame, mode: DecodeMode) -> Option<String> {
    let data = &frame.data;
    if data.len() <= COMMENT_DESC_START {
        return None;
    }
    let desc = &data[COMMENT_DESC_START..];

    match (mode, Encoding::from_byte(data[0])) {
        (DecodeMode::Unicode, Some(encoding)) => {
            let term = find_null_terminator(desc, encoding)?;
            let text = desc.get(term + null_terminator_size(encoding)..)?;
            non_empty(decode_with(text, encoding).trim_end_matches('\0'))
        }
        _ => {
            let term = memchr(0, desc)?;
            let text_start = term + 1;
            if text_start >= desc.len() {
                return None;
            }
            Some(bytes_to_string(&desc[text_start..]))
        }
    }
}

/// The legacy byte selection: for wide text with an order mark, skip the mark
/// and keep every second byte; otherwise keep the bytes as they are.
fn legacy_text_bytes(enc: u8, rest: &[u8]) -> Cow<'_, [u8]> {
    if enc == 1 && rest.len() >= 2 && matches!(rest[0], 0xFF | 0xFE) {
        let body = rest.get(2..).unwrap_or_default();
        return Cow::Owned(body.iter().step_by(2).copied().collect());
    }
    Cow::Borrowed(rest)
}

/// Bytes shown verbatim: valid UTF-8 is kept as such, anything else maps
/// each byte to the Latin-1 character of the same value.
fn bytes_to_string(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(s) => s.to_string(),
        Err(_) => data.iter().map(|&b| b as char).collect(),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Decode text from bytes using the specified encoding.
pub fn decode_with(data: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Latin1 => data.iter().map(|&b| b as char).collect(),
        Encoding::Utf16 => {
            if data.len() < 2 {
                return String::new();
            }
            let (decoder, start) = if data[0] == 0xFF && data[1] == 0xFE {
                (encoding_rs::UTF_16LE, 2)
            } else if data[0] == 0xFE && data[1] == 0xFF {
                (encoding_rs::UTF_16BE, 2)
            } else {
                // No BOM: assume little endian
                (encoding_rs::UTF_16LE, 0)
            };
            let (result, _) = decoder.decode_without_bom_handling(&data[start..]);
            result.into_owned()
        }
        Encoding::Utf16Be => {
            let (result, _) = encoding_rs::UTF_16BE.decode_without_bom_handling(data);
            result.into_owned()
        }
        Encoding::Utf8 => String::from_utf8_lossy(data).into_owned(),
    }
}

/// Find the null terminator for the given encoding.
/// Wide terminators are two zero bytes on an even offset.
pub fn find_null_terminator(data: &[u8], encoding: Encoding) -> Option<usize> {
    if !encoding.is_wide() {
        return memchr(0, data);
    }
    data.chunks_exact(2)
        .position(|pair| pair == [0, 0])
        .map(|i| i * 2)
}

pub fn null_terminator_size(encoding: Encoding) -> usize {
    if encoding.is_wide() {
        2
    } else {
        1
    }
}
