//! Whole-string FPE over mixed alphabets
//!
//! The dispatcher splits an input string into one bucket per alphabet,
//! ciphers each bucket as a single FF1 message (the security claim
//! applies per bucket, not per glyph), and reassembles the output by
//! replaying the original glyph order. Output byte length always
//! equals input byte length, and every glyph stays inside the alphabet
//! that claimed it.
//!
//! A completed cipher is immutable; shared references may encrypt and
//! decrypt from any number of threads concurrently.

use crate::error::{Error, ErrorKind};
use crate::glyph_cipher::GlyphFPECipher;
use crate::glyph_set::IndexedGlyphSet;
use crate::presets;
use crate::presets::AlphabetPreset;
use crate::result::Result;
use crate::router::UnicodeGlyphCipherIndex;

/// Format-preserving cipher over arbitrary UTF-8 text
pub struct UnicodeFPECipher {
    index: UnicodeGlyphCipherIndex,
}

impl UnicodeFPECipher {
    pub fn new(index: UnicodeGlyphCipherIndex) -> Self {
        UnicodeFPECipher { index }
    }

    /// Build a cipher from an ordered list of (name, alphabet) pairs
    ///
    /// Each alphabet is a flat buffer of equal-width UTF-8 glyphs; all
    /// share the same key and tweak. Order matters when alphabets
    /// overlap: the first one to claim a code point keeps it.
    pub fn with_alphabets(key: &[u8], tweak: &[u8], alphabets: &[(&str, &str)]) -> Result<Self> {
        let mut ciphers = Vec::<GlyphFPECipher>::with_capacity(alphabets.len());
        for (name, glyphs) in alphabets {
            let set = IndexedGlyphSet::new(name, glyphs.as_bytes())?;
            ciphers.push(GlyphFPECipher::new(set, key, tweak)?);
        }

        Ok(UnicodeFPECipher::new(UnicodeGlyphCipherIndex::new(
            ciphers,
        )?))
    }

    /// Build a cipher from one of the named alphabet catalogs
    pub fn from_preset(preset: AlphabetPreset, key: &[u8], tweak: &[u8]) -> Result<Self> {
        Ok(UnicodeFPECipher::new(UnicodeGlyphCipherIndex::new(
            presets::preset_ciphers(preset, key, tweak)?,
        )?))
    }

    pub fn cipher_index(&self) -> &UnicodeGlyphCipherIndex {
        &self.index
    }

    /// Encrypt a string, preserving byte length and alphabet class
    pub fn encrypt(&self, input: &str) -> Result<String> {
        let (tags, buckets) = self.parse_and_bucket(input);

        let mut processed = Vec::<String>::with_capacity(buckets.len());
        for (b, buf) in buckets.iter().enumerate() {
            processed.push(self.index.cipher_at(b).encrypt(buf)?);
        }

        Ok(reassemble(&tags, &processed, input.len()))
    }

    /// Decrypt a string produced by [`UnicodeFPECipher::encrypt`]
    pub fn decrypt(&self, input: &str) -> Result<String> {
        let (tags, buckets) = self.parse_and_bucket(input);

        let mut processed = Vec::<String>::with_capacity(buckets.len());
        for (b, buf) in buckets.iter().enumerate() {
            processed.push(self.index.cipher_at(b).decrypt(buf)?);
        }

        Ok(reassemble(&tags, &processed, input.len()))
    }

    /// Encrypt raw bytes that must be valid UTF-8
    ///
    /// Fails with `InvalidUtf8` carrying the byte offset of the first
    /// malformed or truncated sequence. Embedding layers that receive
    /// unvalidated buffers go through here.
    pub fn encrypt_bytes(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(self.encrypt(utf8_checked(input)?)?.into_bytes())
    }

    /// Decrypt raw bytes that must be valid UTF-8
    pub fn decrypt_bytes(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(self.decrypt(utf8_checked(input)?)?.into_bytes())
    }

    // pass 1 sizes every bucket so pass 2 appends into exactly-sized
    // buffers; the tag vector replays the glyph order at reassembly
    fn parse_and_bucket(&self, input: &str) -> (Vec<u32>, Vec<String>) {
        let bucket_count = self.index.bucket_count();

        let mut sizes = vec![0usize; bucket_count];
        let mut glyph_count = 0usize;
        for ch in input.chars() {
            sizes[self.index.bucket_of(ch)] += ch.len_utf8();
            glyph_count += 1;
        }

        let mut buckets: Vec<String> = sizes.iter().map(|&n| String::with_capacity(n)).collect();
        let mut tags = Vec::<u32>::with_capacity(glyph_count);
        for ch in input.chars() {
            let b = self.index.bucket_of(ch);
            buckets[b].push(ch);
            tags.push(b as u32);
        }

        (tags, buckets)
    }
}

fn utf8_checked(input: &[u8]) -> Result<&str> {
    std::str::from_utf8(input).map_err(|e| {
        Error::new(
            ErrorKind::InvalidUtf8,
            &format!(
                "input is not valid UTF-8 at byte offset {}",
                e.valid_up_to()
            ),
        )
    })
}

fn reassemble(tags: &[u32], buckets: &[String], total_len: usize) -> String {
    let mut offsets = vec![0usize; buckets.len()];
    let mut out = String::with_capacity(total_len);

    for &tag in tags {
        let b = tag as usize;
        let rest = &buckets[b][offsets[b]..];
        // the passthrough bucket mixes glyph widths, so the width of
        // the next glyph comes from its UTF-8 lead byte rather than
        // from the bucket's alphabet
        let w = utf8_width(rest.as_bytes()[0]);
        out.push_str(&rest[..w]);
        offsets[b] += w;
    }

    out
}

fn utf8_width(lead: u8) -> usize {
    if lead < 0x80 {
        1
    } else if lead >> 5 == 0b110 {
        2
    } else if lead >> 4 == 0b1110 {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::utf8_width;

    #[test]
    fn widths_by_lead_byte() {
        assert_eq!(utf8_width(b'a'), 1);
        assert_eq!(utf8_width("à".as_bytes()[0]), 2);
        assert_eq!(utf8_width("あ".as_bytes()[0]), 3);
        assert_eq!(utf8_width("😀".as_bytes()[0]), 4);
    }
}
