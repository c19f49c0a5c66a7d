//! Preconfigured alphabets
//!
//! Two declarative catalogs used to assemble the default cipher sets:
//! ASCII character categories (control, whitespace, digits, letters,
//! symbols) and named Unicode blocks. Block alphabets are built by
//! enumerating every code point of the block's inclusive range and
//! encoding it to UTF-8; surrogate halves are skipped. Every listed
//! block stays within one UTF-8 width class, so the resulting sets
//! satisfy the uniform-width rule.

use crate::glyph_cipher::GlyphFPECipher;
use crate::glyph_set::IndexedGlyphSet;
use crate::result::Result;

/// Named alphabet catalogs accepted by the cipher constructors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetPreset {
    /// ASCII split into control / whitespace / digits / letters / symbols
    Ascii,
    /// One alphabet per named Unicode block
    UnicodeBlocks,
}

/// Control characters: non-printable, non-whitespace
pub fn ascii_control() -> Result<IndexedGlyphSet> {
    let mut glyphs = Vec::<u8>::new();
    glyphs.extend(0x00u8..=0x08);
    glyphs.extend(0x0Eu8..=0x1F);
    glyphs.push(0x7F);
    IndexedGlyphSet::new("ascii-control", &glyphs)
}

/// Whitespace: tab, LF, VT, FF, CR, space
pub fn ascii_whitespace() -> Result<IndexedGlyphSet> {
    IndexedGlyphSet::new("ascii-whitespace", b"\t\n\x0B\x0C\r ")
}

/// Digits: '0'-'9'
pub fn ascii_digits() -> Result<IndexedGlyphSet> {
    IndexedGlyphSet::new("ascii-digits", b"0123456789")
}

/// Letters: 'A'-'Z', 'a'-'z'
pub fn ascii_letters() -> Result<IndexedGlyphSet> {
    IndexedGlyphSet::new(
        "ascii-letters",
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
    )
}

/// Symbols: printable, non-alphanumeric, non-space
pub fn ascii_symbols() -> Result<IndexedGlyphSet> {
    IndexedGlyphSet::new("ascii-symbols", b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~")
}

/// A named inclusive code point range
pub struct UnicodeBlock {
    pub name: &'static str,
    pub first: u32,
    pub last: u32,
}

/// The Unicode blocks covered by [`AlphabetPreset::UnicodeBlocks`]
///
/// Ranges must be pairwise disjoint; [`block_overlaps`] reports any
/// configuration slip.
pub const UNICODE_BLOCKS: &[UnicodeBlock] = &[
    UnicodeBlock { name: "Basic Latin", first: 0x0000, last: 0x007F },
    UnicodeBlock { name: "Latin-1 Supplement", first: 0x0080, last: 0x00FF },
    UnicodeBlock { name: "Latin Extended-A", first: 0x0100, last: 0x017F },
    UnicodeBlock { name: "Latin Extended-B", first: 0x0180, last: 0x024F },
    UnicodeBlock { name: "IPA Extensions", first: 0x0250, last: 0x02AF },
    UnicodeBlock { name: "Greek and Coptic", first: 0x0370, last: 0x03FF },
    UnicodeBlock { name: "Cyrillic", first: 0x0400, last: 0x04FF },
    UnicodeBlock { name: "Cyrillic Supplement", first: 0x0500, last: 0x052F },
    UnicodeBlock { name: "Armenian", first: 0x0530, last: 0x058F },
    UnicodeBlock { name: "Hebrew", first: 0x0590, last: 0x05FF },
    UnicodeBlock { name: "Arabic", first: 0x0600, last: 0x06FF },
    UnicodeBlock { name: "Devanagari", first: 0x0900, last: 0x097F },
    UnicodeBlock { name: "Bengali", first: 0x0980, last: 0x09FF },
    UnicodeBlock { name: "Tamil", first: 0x0B80, last: 0x0BFF },
    UnicodeBlock { name: "Thai", first: 0x0E00, last: 0x0E7F },
    UnicodeBlock { name: "Georgian", first: 0x10A0, last: 0x10FF },
    UnicodeBlock { name: "Hiragana", first: 0x3040, last: 0x309F },
    UnicodeBlock { name: "Katakana", first: 0x30A0, last: 0x30FF },
    UnicodeBlock { name: "CJK Unified Ideographs", first: 0x4E00, last: 0x9FFF },
    UnicodeBlock { name: "Hangul Syllables", first: 0xAC00, last: 0xD7AF },
    UnicodeBlock { name: "Emoticons", first: 0x1F600, last: 0x1F64F },
];

/// Alphabet of every code point in a block, surrogates skipped
pub fn block_glyph_set(block: &UnicodeBlock) -> Result<IndexedGlyphSet> {
    let mut glyphs = String::new();
    for cp in block.first..=block.last {
        // surrogate halves have no UTF-8 encoding
        if let Some(ch) = char::from_u32(cp) {
            glyphs.push(ch);
        }
    }

    IndexedGlyphSet::new(block.name, glyphs.as_bytes())
}

/// Glyph ciphers for the five ASCII categories, in registration order
pub fn ascii_ciphers(key: &[u8], tweak: &[u8]) -> Result<Vec<GlyphFPECipher>> {
    let sets = [
        ascii_control()?,
        ascii_whitespace()?,
        ascii_digits()?,
        ascii_letters()?,
        ascii_symbols()?,
    ];

    sets.into_iter()
        .map(|set| GlyphFPECipher::new(set, key, tweak))
        .collect()
}

/// Glyph ciphers for every block in [`UNICODE_BLOCKS`]
pub fn unicode_block_ciphers(key: &[u8], tweak: &[u8]) -> Result<Vec<GlyphFPECipher>> {
    UNICODE_BLOCKS
        .iter()
        .map(|block| GlyphFPECipher::new(block_glyph_set(block)?, key, tweak))
        .collect()
}

/// Glyph ciphers for a named preset
pub fn preset_ciphers(
    preset: AlphabetPreset,
    key: &[u8],
    tweak: &[u8],
) -> Result<Vec<GlyphFPECipher>> {
    match preset {
        AlphabetPreset::Ascii => ascii_ciphers(key, tweak),
        AlphabetPreset::UnicodeBlocks => unicode_block_ciphers(key, tweak),
    }
}

/// Code points claimed by two blocks at once, with both block names
///
/// A non-empty result is a configuration error in [`UNICODE_BLOCKS`].
/// Surfaced diagnostically rather than failing the build; the test
/// suite asserts it stays empty.
pub fn block_overlaps() -> Vec<(u32, &'static str, &'static str)> {
    let mut overlaps = Vec::new();

    for (i, a) in UNICODE_BLOCKS.iter().enumerate() {
        for b in &UNICODE_BLOCKS[i + 1..] {
            if a.first <= b.last && b.first <= a.last {
                overlaps.push((a.first.max(b.first), a.name, b.name));
            }
        }
    }

    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_category_sizes() {
        assert_eq!(ascii_control().unwrap().size(), 28);
        assert_eq!(ascii_whitespace().unwrap().size(), 6);
        assert_eq!(ascii_digits().unwrap().size(), 10);
        assert_eq!(ascii_letters().unwrap().size(), 52);
        assert_eq!(ascii_symbols().unwrap().size(), 32);
    }

    #[test]
    fn ascii_categories_are_disjoint() {
        let sets = [
            ascii_control().unwrap(),
            ascii_whitespace().unwrap(),
            ascii_digits().unwrap(),
            ascii_letters().unwrap(),
            ascii_symbols().unwrap(),
        ];

        let mut seen = std::collections::HashSet::new();
        for set in &sets {
            for glyph in set.iter() {
                assert!(seen.insert(glyph.to_string()), "{:?} claimed twice", glyph);
            }
        }
    }

    #[test]
    fn every_block_builds_a_set() {
        for block in UNICODE_BLOCKS {
            let set = block_glyph_set(block).unwrap();
            assert!(set.size() >= 2, "{} too small", block.name);
        }
    }

    #[test]
    fn blocks_are_disjoint() {
        let overlaps = block_overlaps();
        assert!(overlaps.is_empty(), "overlapping blocks: {:?}", overlaps);
    }
}
