//! Text decoding with an ordered list of fallback encodings.
//!
//! The encoding that decoded a file travels with its text so the annotated
//! content is written back byte-compatible with the original.

use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encodings tried when reading a file, in priority order
pub const DECODE_ORDER: [TextEncoding; 4] = [
    TextEncoding::Utf8,
    TextEncoding::Utf8Bom,
    TextEncoding::Latin1,
    TextEncoding::Windows1252,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Plain UTF-8 without a byte-order mark
    Utf8,
    /// UTF-8 preceded by a byte-order mark, kept on write
    Utf8Bom,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
    Windows1252,
}

impl TextEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Bom => "utf-8-sig",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "cp1252",
        }
    }

    /// Strict decode, `None` when the bytes are not valid in this encoding.
    ///
    /// Plain UTF-8 declines input that starts with a byte-order mark so the
    /// BOM is handled by [`TextEncoding::Utf8Bom`] instead of leaking into
    /// the first line.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                if bytes.starts_with(UTF8_BOM) {
                    return None;
                }
                std::str::from_utf8(bytes).ok().map(str::to_owned)
            }
            TextEncoding::Utf8Bom => {
                let body = bytes.strip_prefix(UTF8_BOM)?;
                std::str::from_utf8(body).ok().map(str::to_owned)
            }
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
            TextEncoding::Windows1252 => WINDOWS_1252
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
        }
    }

    /// Strict encode, `None` when the text holds a character this encoding
    /// cannot represent.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            TextEncoding::Utf8 => Some(text.as_bytes().to_vec()),
            TextEncoding::Utf8Bom => {
                let mut out = Vec::with_capacity(UTF8_BOM.len() + text.len());
                out.extend_from_slice(UTF8_BOM);
                out.extend_from_slice(text.as_bytes());
                Some(out)
            }
            TextEncoding::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
            TextEncoding::Windows1252 => {
                let (bytes, _, had_unmappable) = WINDOWS_1252.encode(text);
                if had_unmappable {
                    None
                } else {
                    Some(bytes.into_owned())
                }
            }
        }
    }
}

/// File content together with the encoding that decoded it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
}

/// Try every encoding of [`DECODE_ORDER`]; the first success wins
pub fn decode(bytes: &[u8]) -> Option<DecodedText> {
    DECODE_ORDER.iter().find_map(|encoding| {
        encoding.decode(bytes).map(|text| DecodedText {
            text,
            encoding: *encoding,
        })
    })
}
