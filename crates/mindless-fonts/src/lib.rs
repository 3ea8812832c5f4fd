//! Block letter font for the mindless wordmark.
//!
//! Glyphs are 5 pixels tall and drawn with half-block characters, so a line
//! of text occupies three terminal rows.

/// Height of every glyph bitmap in pixels.
pub const GLYPH_HEIGHT: usize = 5;

/// Terminal rows needed for one line of block art.
pub const ART_ROWS: usize = GLYPH_HEIGHT.div_ceil(2);

/// Blank columns between adjacent glyphs.
pub const LETTER_SPACING: usize = 1;

type Glyph = [&'static str; GLYPH_HEIGHT];

const A: Glyph = [" ### ", "#   #", "#####", "#   #", "#   #"];
const B: Glyph = ["#### ", "#   #", "#### ", "#   #", "#### "];
const C: Glyph = [" ####", "#    ", "#    ", "#    ", " ####"];
const D: Glyph = ["#### ", "#   #", "#   #", "#   #", "#### "];
const E: Glyph = ["#####", "#    ", "#### ", "#    ", "#####"];
const F: Glyph = ["#####", "#    ", "#### ", "#    ", "#    "];
const G: Glyph = [" ####", "#    ", "#  ##", "#   #", " ####"];
const H: Glyph = ["#   #", "#   #", "#####", "#   #", "#   #"];
const I: Glyph = ["#####", "  #  ", "  #  ", "  #  ", "#####"];
const J: Glyph = ["#####", "   # ", "   # ", "#  # ", " ##  "];
const K: Glyph = ["#   #", "#  # ", "###  ", "#  # ", "#   #"];
const L: Glyph = ["#    ", "#    ", "#    ", "#    ", "#####"];
const M: Glyph = ["#   #", "## ##", "# # #", "#   #", "#   #"];
const N: Glyph = ["#   #", "##  #", "# # #", "#  ##", "#   #"];
const O: Glyph = [" ### ", "#   #", "#   #", "#   #", " ### "];
const P: Glyph = ["#### ", "#   #", "#### ", "#    ", "#    "];
const Q: Glyph = [" ### ", "#   #", "# # #", "#  # ", " ## #"];
const R: Glyph = ["#### ", "#   #", "#### ", "#  # ", "#   #"];
const S: Glyph = [" ####", "#    ", " ### ", "    #", "#### "];
const T: Glyph = ["#####", "  #  ", "  #  ", "  #  ", "  #  "];
const U: Glyph = ["#   #", "#   #", "#   #", "#   #", " ### "];
const V: Glyph = ["#   #", "#   #", "#   #", " # # ", "  #  "];
const W: Glyph = ["#   #", "#   #", "# # #", "## ##", "#   #"];
const X: Glyph = ["#   #", " # # ", "  #  ", " # # ", "#   #"];
const Y: Glyph = ["#   #", " # # ", "  #  ", "  #  ", "  #  "];
const Z: Glyph = ["#####", "   # ", "  #  ", " #   ", "#####"];

const DIGITS: [Glyph; 10] = [
    [" ### ", "#  ##", "# # #", "##  #", " ### "],
    ["  #  ", " ##  ", "  #  ", "  #  ", " ### "],
    ["#### ", "    #", " ### ", "#    ", "#####"],
    ["#### ", "    #", " ### ", "    #", "#### "],
    ["#   #", "#   #", "#####", "    #", "    #"],
    ["#####", "#    ", "#### ", "    #", "#### "],
    [" ### ", "#    ", "#### ", "#   #", " ### "],
    ["#####", "    #", "   # ", "  #  ", "  #  "],
    [" ### ", "#   #", " ### ", "#   #", " ### "],
    [" ### ", "#   #", " ####", "    #", " ### "],
];

const PERIOD: Glyph = [" ", " ", " ", " ", "#"];
const COLON: Glyph = [" ", "#", " ", "#", " "];
const BANG: Glyph = ["#", "#", "#", " ", "#"];
const DASH: Glyph = ["   ", "   ", "###", "   ", "   "];
const UNDERSCORE: Glyph = ["    ", "    ", "    ", "    ", "####"];
const PROMPT: Glyph = ["#  ", " # ", "  #", " # ", "#  "];
const QUESTION: Glyph = ["### ", "   #", " ## ", "    ", " #  "];
const SPACE: Glyph = ["   ", "   ", "   ", "   ", "   "];

/// Bitmap rows for a character. Unknown characters render as `?`.
pub fn glyph(ch: char) -> &'static Glyph {
    match ch.to_ascii_uppercase() {
        'A' => &A,
        'B' => &B,
        'C' => &C,
        'D' => &D,
        'E' => &E,
        'F' => &F,
        'G' => &G,
        'H' => &H,
        'I' => &I,
        'J' => &J,
        'K' => &K,
        'L' => &L,
        'M' => &M,
        'N' => &N,
        'O' => &O,
        'P' => &P,
        'Q' => &Q,
        'R' => &R,
        'S' => &S,
        'T' => &T,
        'U' => &U,
        'V' => &V,
        'W' => &W,
        'X' => &X,
        'Y' => &Y,
        'Z' => &Z,
        d @ '0'..='9' => &DIGITS[d as usize - '0' as usize],
        '.' => &PERIOD,
        ':' => &COLON,
        '!' => &BANG,
        '-' => &DASH,
        '_' => &UNDERSCORE,
        '>' => &PROMPT,
        ' ' => &SPACE,
        _ => &QUESTION,
    }
}

/// Width of a glyph in pixels.
pub fn glyph_width(ch: char) -> usize {
    glyph(ch)[0].chars().count()
}

/// Whether the glyph pixel at `(x, y)` is set. Out of range is unset.
pub fn glyph_pixel(ch: char, x: usize, y: usize) -> bool {
    glyph(ch)
        .get(y)
        .and_then(|row| row.as_bytes().get(x))
        .is_some_and(|&b| b == b'#')
}

/// Width in terminal columns of `text` rendered as block art.
pub fn block_width(text: &str) -> usize {
    let glyphs: usize = text.chars().map(glyph_width).sum();
    let gaps = text.chars().count().saturating_sub(1) * LETTER_SPACING;
    glyphs + gaps
}

/// Build block art for `text`.
///
/// # Returns
/// [`ART_ROWS`] strings of equal width ([`block_width`] characters), using
/// `█`, `▀`, `▄` and spaces.
pub fn build_block_art(text: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(ART_ROWS);

    for row in 0..ART_ROWS {
        let top = row * 2;
        let bottom = top + 1;
        let mut line = String::new();

        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                line.extend(std::iter::repeat_n(' ', LETTER_SPACING));
            }
            for x in 0..glyph_width(ch) {
                line.push(half_block(
                    glyph_pixel(ch, x, top),
                    glyph_pixel(ch, x, bottom),
                ));
            }
        }

        lines.push(line);
    }

    lines
}

fn half_block(top: bool, bottom: bool) -> char {
    match (top, bottom) {
        (true, true) => '█',
        (true, false) => '▀',
        (false, true) => '▄',
        (false, false) => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_glyph_is_rectangular() {
        let sample = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.:!-_> ?";
        for ch in sample.chars() {
            let g = glyph(ch);
            let w = g[0].chars().count();
            assert!(w > 0);
            for row in g {
                assert_eq!(row.chars().count(), w, "glyph {ch:?} is ragged");
            }
        }
    }

    #[test]
    fn art_has_three_rows_of_equal_width() {
        let art = build_block_art("MINDLESS.PR");
        assert_eq!(art.len(), ART_ROWS);
        let width = block_width("MINDLESS.PR");
        for line in &art {
            assert_eq!(line.chars().count(), width);
        }
        // 10 five-wide letters, a one-wide period and 10 gaps
        assert_eq!(width, 10 * 5 + 1 + 10);
    }

    #[test]
    fn half_blocks_encode_pixel_pairs() {
        let art = build_block_art("I");
        assert_eq!(art[0], "▀▀█▀▀");
        assert_eq!(art[1], "  █  ");
        assert_eq!(art[2], "▀▀▀▀▀");
    }

    #[test]
    fn lowercase_and_unknown_characters() {
        assert_eq!(glyph('m'), glyph('M'));
        assert_eq!(glyph('~'), glyph('?'));
        assert!(block_width("").eq(&0));
    }

    #[test]
    fn glyph_pixel_out_of_range_is_unset() {
        assert!(glyph_pixel('M', 0, 0));
        assert!(!glyph_pixel('M', 9, 0));
        assert!(!glyph_pixel('M', 0, 5));
    }
}
