//! Indexed UTF-8 alphabets
//!
//! An alphabet is a flat buffer of concatenated UTF-8 glyphs, all of
//! the same byte width. Construction sorts the glyphs, rejects
//! duplicates, and fixes a dense index for each glyph; the sorted
//! order makes indices stable for a given glyph multiset and lets the
//! glyph lookup run as a binary search over fixed-width records.

use crate::error::{Error, ErrorKind};
use crate::result::Result;

/// A uniform-width UTF-8 alphabet with bidirectional glyph <-> index lookup
#[derive(Debug)]
pub struct IndexedGlyphSet {
    name: String,
    glyph_size: usize,
    // sorted concatenation; index i owns bytes [i * w, (i + 1) * w)
    glyphs: String,
}

impl IndexedGlyphSet {
    /// Build an alphabet from a flat buffer of concatenated UTF-8 glyphs
    ///
    /// Every glyph must have the byte width inferred from the first
    /// one, the buffer must hold at least two glyphs, and no glyph may
    /// appear twice. The duplicate diagnostic names the input positions
    /// of both occurrences along with the glyph bytes in hex.
    pub fn new(name: &str, flat_glyphs: &[u8]) -> Result<Self> {
        let s = std::str::from_utf8(flat_glyphs).map_err(|e| {
            Error::new(
                ErrorKind::InvalidUtf8,
                &format!(
                    "glyph buffer is not valid UTF-8 at byte offset {}",
                    e.valid_up_to()
                ),
            )
        })?;

        let glyph_size = match s.chars().next() {
            Some(c) => c.len_utf8(),
            None => {
                return Err(Error::new(
                    ErrorKind::EmptyOrSingleton,
                    "glyph buffer is empty",
                ))
            }
        };

        // full scan: every glyph checked against the inferred width,
        // not just the first
        let mut chars = Vec::<(char, usize)>::new();
        for (pos, c) in s.chars().enumerate() {
            if c.len_utf8() != glyph_size {
                return Err(Error::new(
                    ErrorKind::NonUniformWidth,
                    &format!(
                        "glyph at position {} is {} bytes wide, expected {}",
                        pos,
                        c.len_utf8(),
                        glyph_size
                    ),
                ));
            }
            chars.push((c, pos));
        }

        if chars.len() < 2 {
            return Err(Error::new(
                ErrorKind::EmptyOrSingleton,
                "an indexed set requires at least two glyphs",
            ));
        }

        // stable sort keeps input order among equal glyphs, so a
        // duplicate can be reported by its original positions
        chars.sort_by_key(|&(c, _)| c);

        for i in 1..chars.len() {
            if chars[i].0 == chars[i - 1].0 {
                let mut buf = [0u8; 4];
                let bytes = chars[i].0.encode_utf8(&mut buf).as_bytes();
                return Err(Error::new(
                    ErrorKind::DuplicateGlyph,
                    &format!(
                        "duplicate glyph at indices {} and {}, glyph bytes (hex): {}",
                        chars[i - 1].1,
                        chars[i].1,
                        hex::encode_upper(bytes)
                    ),
                ));
            }
        }

        let glyphs: String = chars.into_iter().map(|(c, _)| c).collect();

        Ok(IndexedGlyphSet {
            name: name.to_string(),
            glyph_size,
            glyphs,
        })
    }

    /// Number of glyphs in the set
    pub fn size(&self) -> usize {
        self.glyphs.len() / self.glyph_size
    }

    /// Byte width shared by every glyph
    pub fn glyph_size(&self) -> usize {
        self.glyph_size
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The backing buffer, glyphs concatenated in sorted order
    pub fn as_str(&self) -> &str {
        &self.glyphs
    }

    /// Index of a glyph, or `UnknownGlyph` if the set does not contain it
    pub fn to_index(&self, glyph: &str) -> Result<u32> {
        match self.index_of(glyph.as_bytes()) {
            Some(i) => Ok(i),
            None => Err(Error::new(
                ErrorKind::UnknownGlyph,
                &format!(
                    "glyph bytes (hex) {} not found in alphabet {:?}",
                    hex::encode_upper(glyph.as_bytes()),
                    self.name
                ),
            )),
        }
    }

    /// Glyph at an index, or `IndexOutOfRange` past the set size
    pub fn from_index(&self, index: u32) -> Result<&str> {
        let i = index as usize;
        if i >= self.size() {
            return Err(Error::new(
                ErrorKind::IndexOutOfRange,
                &format!("no glyph at index {} in a set of {}", index, self.size()),
            ));
        }

        Ok(&self.glyphs[i * self.glyph_size..(i + 1) * self.glyph_size])
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.index_of(glyph.as_bytes()).is_some()
    }

    /// Glyphs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let w = self.glyph_size;
        (0..self.size()).map(move |i| &self.glyphs[i * w..(i + 1) * w])
    }

    // binary search over the fixed-width records of the backing buffer.
    // UTF-8 byte order is code point order, so the sorted buffer is
    // ordered under byte comparison as well.
    pub(crate) fn index_of(&self, glyph: &[u8]) -> Option<u32> {
        if glyph.len() != self.glyph_size {
            return None;
        }

        let bytes = self.glyphs.as_bytes();
        let w = self.glyph_size;
        let mut lo = 0usize;
        let mut hi = self.size();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match bytes[mid * w..(mid + 1) * w].cmp(glyph) {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
                std::cmp::Ordering::Equal => return Some(mid as u32),
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::IndexedGlyphSet;
    use crate::error::ErrorKind;
    use crate::result::Result;

    #[test]
    fn indices_follow_sorted_order() -> Result<()> {
        let set = IndexedGlyphSet::new("test", b"cba")?;

        assert_eq!(set.to_index("a")?, 0);
        assert_eq!(set.to_index("b")?, 1);
        assert_eq!(set.to_index("c")?, 2);

        Ok(())
    }

    #[test]
    fn lookup_misses() -> Result<()> {
        let set = IndexedGlyphSet::new("test", b"abc")?;

        assert!(!set.contains("d"));
        // a lookup with the wrong width cannot match
        assert!(!set.contains("ab"));
        assert_eq!(set.to_index("d").unwrap_err().kind(), ErrorKind::UnknownGlyph);

        Ok(())
    }
}
