//! Sixel glyph codec.
//!
//! A glyph in a DECDLD font definition is a run of printable sixel
//! characters, one character per column, each encoding six vertically
//! stacked pixel bits (`char - 0x3F`). Bands of six rows are separated
//! by `/`. Anything outside the sixel range is formatting and is kept
//! around the re-encoded body so edits round-trip byte-exact.

/// Character encoding an all-zero sixel column.
pub const SIXEL_BLANK: u8 = b'?';

pub(crate) fn is_sixel_byte(ch: u8) -> bool {
    (b'?'..=b'~').contains(&ch)
}

fn is_non_blank_sixel_byte(ch: u8) -> bool {
    (b'@'..=b'~').contains(&ch)
}

/// One glyph of a soft font, stored in its wire form.
///
/// The cached used extents are the bounding box of the sixel data as
/// written: `used_width` is the widest row in columns, `used_height` is
/// six times the number of sixel rows. They feed the cell dimension
/// inference in [`crate::SoftFont`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    sixels: String,
    used_width: i32,
    used_height: i32,
}

impl Glyph {
    pub fn new(sixels: impl Into<String>) -> Self {
        let sixels = sixels.into();
        let mut used_width = 0;
        let mut used_height = 0;
        for row in sixels.split('/') {
            used_height += 6;
            used_width = used_width.max(row.bytes().filter(|&ch| is_sixel_byte(ch)).count() as i32);
        }
        Self {
            sixels,
            used_width,
            used_height,
        }
    }

    /// The raw sixel text, exactly as it appears in the font definition.
    pub fn as_str(&self) -> &str {
        &self.sixels
    }

    pub fn used_width(&self) -> i32 {
        self.used_width
    }

    pub fn used_height(&self) -> i32 {
        self.used_height
    }

    /// True if any pixel is set anywhere in the glyph.
    pub fn is_used(&self) -> bool {
        self.sixels.bytes().any(is_non_blank_sixel_byte)
    }

    /// Unpacks the sixel data into a `cell_width * cell_height` buffer of
    /// 0/1 cells, row-major. Data beyond the cell is dropped; missing
    /// data yields 0. Never fails: non-sixel bytes are formatting.
    pub fn to_pixels(&self, cell_width: i32, cell_height: i32) -> Vec<u8> {
        let mut pixels = vec![0; (cell_width * cell_height) as usize];
        let mut y = 0;
        for row in self.sixels.split('/') {
            let mut x = 0;
            for ch in row.bytes() {
                if is_sixel_byte(ch) {
                    if x >= cell_width {
                        break;
                    }
                    let mut value = ch - SIXEL_BLANK;
                    for i in 0..6 {
                        if y + i >= cell_height {
                            break;
                        }
                        pixels[((y + i) * cell_width + x) as usize] = value & 1;
                        value >>= 1;
                    }
                    x += 1;
                }
            }
            y += 6;
        }
        pixels
    }

    /// Re-encodes the glyph from a pixel buffer, preserving any non-sixel
    /// text before and after the original sixel content.
    pub fn set_pixels(&mut self, cell_width: i32, cell_height: i32, pixels: &[u8]) {
        let bytes = self.sixels.as_bytes();
        let start = bytes.iter().position(|&ch| is_sixel_byte(ch)).unwrap_or(bytes.len());
        let end = bytes.iter().rposition(|&ch| is_sixel_byte(ch)).map_or(start, |last| last + 1);
        let suffix = self.sixels[end..].to_string();

        let mut sixels = self.sixels[..start].to_string();
        let mut y = 0;
        while y < cell_height {
            if y > 0 {
                sixels.push('/');
            }
            for x in 0..cell_width {
                let mut value = SIXEL_BLANK;
                for i in 0..6 {
                    if y + i >= cell_height {
                        break;
                    }
                    if pixels[((y + i) * cell_width + x) as usize] != 0 {
                        value += 1 << i;
                    }
                }
                sixels.push(value as char);
            }
            y += 6;
        }
        sixels.push_str(&suffix);
        *self = Glyph::new(sixels);
    }
}
