//! Accent- and case-folding for matching
//!
//! Folding may change the character count (`ß` becomes `ss`, a combining
//! accent disappears), so the folded view keeps an explicit index back to the
//! original text instead of assuming the two line up.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Letters that have no canonical decomposition but are still transliterated
fn transliterate(c: char) -> Option<&'static str> {
    let folded = match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'þ' => "th",
        'ø' => "o",
        'ł' => "l",
        'đ' | 'ð' => "d",
        'ħ' => "h",
        'ı' => "i",
        _ => return None,
    };
    Some(folded)
}

/// Fold a single character, handing every produced character to `push`.
///
/// The character is decomposed (NFD), stripped of combining marks, lowercased
/// and transliterated. It may produce no characters at all.
pub fn fold_char(c: char, mut push: impl FnMut(char)) {
    for base in std::iter::once(c).nfd() {
        if is_combining_mark(base) {
            continue;
        }
        for lower in base.to_lowercase() {
            if is_combining_mark(lower) {
                continue;
            }
            match transliterate(lower) {
                Some(s) => s.chars().for_each(&mut push),
                None => push(lower),
            }
        }
    }
}

/// Fold a whole string
pub fn fold(s: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        fold_char(c, |f| out.push(f));
    }
    out
}

/// Folded view of a text, positionally linked to the original.
#[derive(Debug, Clone)]
pub struct NormalizedText {
    chars: Vec<char>,
    /// `origin[i]` is the original character offset that produced `chars[i]`
    origin: Vec<usize>,
    /// Length of the original text in characters
    source_len: usize,
}

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut origin = Vec::with_capacity(text.len());
        let mut source_len = 0;

        for (idx, c) in text.chars().enumerate() {
            fold_char(c, |f| {
                chars.push(f);
                origin.push(idx);
            });
            source_len = idx + 1;
        }

        Self {
            chars,
            origin,
            source_len,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Length of the original text in characters
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Find `needle` at or after folded position `from`
    pub fn find_from(&self, needle: &[char], from: usize) -> Option<usize> {
        if needle.is_empty() || from >= self.chars.len() {
            return None;
        }
        self.chars[from..]
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|i| from + i)
    }

    /// Map the folded span `[pos, pos + len)` to original character offsets.
    ///
    /// Returns `(start, end)` with `end` exclusive. The span always covers
    /// whole original characters, and swallows original characters right
    /// after it that folded to nothing (stray combining marks).
    pub fn source_span(&self, pos: usize, len: usize) -> (usize, usize) {
        debug_assert!(len > 0 && pos + len <= self.chars.len());
        let start = self.origin[pos];
        let last = self.origin[pos + len - 1];
        let next = self
            .origin
            .get(pos + len)
            .copied()
            .unwrap_or(self.source_len);
        (start, next.max(last + 1))
    }
}
