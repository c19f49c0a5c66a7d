//! Code point to cipher routing
//!
//! A dense table over the whole Unicode scalar range maps every code
//! point to the glyph cipher whose alphabet claimed it first. Code
//! points no alphabet claims route to a distinguished noop cipher, so
//! lookups always yield a usable cipher. The table trades ~4 MB for
//! branchless O(1) dispatch in the per-glyph hot path.

use crate::error::{Error, ErrorKind};
use crate::glyph_cipher::GlyphFPECipher;
use crate::glyph_set::IndexedGlyphSet;
use crate::result::Result;

/// One past the largest Unicode code point
pub const CODEPOINT_TABLE_LEN: usize = 0x110000;

// sentinel for "no alphabet claims this code point"
const NO_CIPHER: u32 = u32::MAX;

/// Owns the glyph ciphers, the passthrough cipher, and the routing table
#[derive(Debug)]
pub struct UnicodeGlyphCipherIndex {
    ciphers: Vec<GlyphFPECipher>,
    noop: GlyphFPECipher,
    table: Box<[u32]>,
}

impl UnicodeGlyphCipherIndex {
    /// Build the routing table from an ordered list of glyph ciphers
    ///
    /// When several alphabets contain the same code point, the first
    /// registration wins; later claims are ignored. Registration order
    /// therefore fixes the routing deterministically.
    pub fn new(ciphers: Vec<GlyphFPECipher>) -> Result<Self> {
        if ciphers.is_empty() {
            return Err(Error::new(
                ErrorKind::EmptyOrSingleton,
                "at least one glyph cipher is required",
            ));
        }

        let mut table = vec![NO_CIPHER; CODEPOINT_TABLE_LEN].into_boxed_slice();

        for (idx, cipher) in ciphers.iter().enumerate() {
            for ch in cipher.glyphs().as_str().chars() {
                let cp = ch as usize;
                if table[cp] == NO_CIPHER {
                    table[cp] = idx as u32;
                }
            }
        }

        let noop = GlyphFPECipher::noop(IndexedGlyphSet::new("noop", b" \n\r")?)?;

        Ok(UnicodeGlyphCipherIndex {
            ciphers,
            noop,
            table,
        })
    }

    /// Bucket index for a code point
    ///
    /// Real ciphers occupy buckets `0..len`; the passthrough cipher
    /// sits in the extra bucket at index `len`.
    pub fn bucket_of(&self, cp: char) -> usize {
        match self.table[cp as usize] {
            NO_CIPHER => self.ciphers.len(),
            idx => idx as usize,
        }
    }

    /// Cipher occupying a bucket
    pub fn cipher_at(&self, bucket: usize) -> &GlyphFPECipher {
        if bucket == self.ciphers.len() {
            &self.noop
        } else {
            &self.ciphers[bucket]
        }
    }

    /// Cipher covering a code point, or the passthrough cipher
    pub fn cipher_for(&self, cp: char) -> &GlyphFPECipher {
        self.cipher_at(self.bucket_of(cp))
    }

    /// Number of buckets, passthrough included
    pub fn bucket_count(&self) -> usize {
        self.ciphers.len() + 1
    }

    pub fn glyph_ciphers(&self) -> &[GlyphFPECipher] {
        &self.ciphers
    }

    pub fn noop_cipher(&self) -> &GlyphFPECipher {
        &self.noop
    }
}
