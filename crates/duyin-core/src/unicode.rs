//! Character-level Unicode classification for Chinese word lists.

/// CJK Unified Ideographs, Extension A and Extension B.
///
/// The `pinyin` data covers all three blocks, so anything outside them is
/// treated as a non-ideograph even when it renders like one (radicals,
/// compatibility ideographs).
pub fn is_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// True when every character of `s` is an ideograph. Empty strings are not.
pub fn is_ideograph_text(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_ideograph)
}
