use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};

/// Native glyph size of the bitmap font, in pixels.
pub(crate) const GLYPH_SIZE: u32 = 8;

/// Width assumed per character when no font could be resolved.
pub const ESTIMATED_CHAR_WIDTH: u32 = 8;

/// Handle to the built-in 8x8 bitmap font at an integer scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    scale: u32,
}

impl Font {
    /// Pick a font whose glyphs fit in `max_height`.
    ///
    /// Tries `preferred_scale` first, then scale 1. `None` means no text can
    /// be drawn in that space; callers still lay out with
    /// [`ESTIMATED_CHAR_WIDTH`].
    pub fn resolve(preferred_scale: u32, max_height: u32) -> Option<Font> {
        [preferred_scale, 1]
            .into_iter()
            .filter(|&scale| scale > 0)
            .find(|&scale| Self::glyph_height(scale).is_some_and(|h| h <= max_height))
            .map(|scale| Font { scale })
    }

    /// Glyph height at `scale`, or `None` if it overflows.
    pub fn glyph_height(scale: u32) -> Option<u32> {
        GLYPH_SIZE.checked_mul(scale)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn height(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    pub fn advance(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    pub fn measure(&self, text: &str) -> u32 {
        (text.chars().count() as u32).saturating_mul(self.advance())
    }

    /// Row bitmaps for `ch`, least significant bit leftmost. Characters
    /// outside basic Latin and Latin-1 render as `?`.
    pub(crate) fn glyph(&self, ch: char) -> [u8; 8] {
        BASIC_FONTS
            .get(ch)
            .or_else(|| LATIN_FONTS.get(ch))
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8])
    }
}

/// Width of `text` in pixels, estimated when there is no font.
pub fn text_width(font: Option<&Font>, text: &str) -> u32 {
    match font {
        Some(font) => font.measure(text),
        None => (text.chars().count() as u32).saturating_mul(ESTIMATED_CHAR_WIDTH),
    }
}
