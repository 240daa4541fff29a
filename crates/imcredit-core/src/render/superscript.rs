//! Unicode superscript digits for footnote markers

const SUPERSCRIPT_DIGITS: [char; 10] = [
    '\u{2070}', '\u{00B9}', '\u{00B2}', '\u{00B3}', '\u{2074}', '\u{2075}', '\u{2076}',
    '\u{2077}', '\u{2078}', '\u{2079}',
];

/// Separator placed between the superscripts of one author
pub const MARK_SEPARATOR: char = '\u{00B7}';

/// Render a number with superscript digits, one glyph per decimal digit.
pub fn to_superscript(n: usize) -> String {
    n.to_string()
        .chars()
        .filter_map(|d| d.to_digit(10))
        .map(|d| SUPERSCRIPT_DIGITS[d as usize])
        .collect()
}
