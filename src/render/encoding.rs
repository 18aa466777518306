use crate::error::{Error, Result};

pub fn scalar(cp: u32) -> Result<char> {
    char::from_u32(cp).ok_or_else(|| {
        Error::DataConsistency(format!("U+{:04X} is not a Unicode scalar value", cp))
    })
}

pub fn utf8(ch: char) -> String {
    let mut buf = [0u8; 4];
    ch.encode_utf8(&mut buf)
        .bytes()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn utf16(ch: char) -> String {
    let mut buf = [0u16; 2];
    ch.encode_utf16(&mut buf)
        .iter()
        .map(|u| format!("0x{:04X}", u))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn utf32(ch: char) -> String {
    format!("0x{:08X}", ch as u32)
}

/// `&#65;`
pub fn numeric_reference(cp: u32) -> String {
    format!("&#{};", cp)
}

/// Python-style string literal: `u"\u0041"` or `u"\U0001F600"`.
pub fn escape_snippet(cp: u32) -> String {
    if cp <= 0xFFFF {
        format!("u\"\\u{:04X}\"", cp)
    } else {
        format!("u\"\\U{:08X}\"", cp)
    }
}

// ── Tests ──
