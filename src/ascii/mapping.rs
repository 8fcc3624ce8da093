//! Brightness to character mapping.

use super::buffer::{PixelBuffer, RGB_CHANNELS};
use super::charset::GlyphRamp;
use super::error::AsciiError;

/// Resets all SGR attributes after a colored glyph.
pub const COLOR_RESET: &str = "\x1b[0m";

/// Compute ITU-R BT.709 luma, rounded to the nearest integer.
///
/// Y = 0.2126*R + 0.7152*G + 0.0722*B
///
/// The coefficients are scaled by 10000 so the whole computation stays in
/// integer math; they sum to exactly 10000, so white maps to 255.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 2126 * u32::from(r) + 7152 * u32::from(g) + 722 * u32::from(b);
    ((weighted + 5000) / 10000) as u8
}

/// Quantize a brightness value onto `levels` glyphs.
///
/// `0` maps to index 0 and `255` to `levels - 1`; the mapping is
/// non-decreasing in between.
#[inline]
pub fn glyph_index(brightness: u8, levels: usize) -> usize {
    (brightness as usize * levels.saturating_sub(1)) / 255
}

/// Maps downsampled RGB cells to lines of text.
#[derive(Debug, Clone, Default)]
pub struct GlyphMapper {
    /// Glyphs ordered darkest to brightest
    pub ramp: GlyphRamp,
    /// Prefix every glyph with a 24-bit foreground color escape
    pub color: bool,
    /// Invert brightness before choosing a glyph (for light terminals)
    pub invert: bool,
}

impl GlyphMapper {
    pub fn new(ramp: GlyphRamp, color: bool) -> Self {
        Self {
            ramp,
            color,
            invert: false,
        }
    }

    /// Glyph for a single RGB cell.
    pub fn glyph_for(&self, r: u8, g: u8, b: u8) -> char {
        let brightness = luminance(r, g, b);
        let brightness = if self.invert { 255 - brightness } else { brightness };
        self.ramp.glyph(glyph_index(brightness, self.ramp.len()))
    }

    /// Render an RGB buffer to one string per row.
    ///
    /// With `color` enabled every glyph is wrapped as
    /// `ESC[38;2;R;G;Bm<glyph>ESC[0m` using the cell's exact color, so color
    /// keeps full precision even though shape is quantized.
    ///
    /// # Errors
    /// * `AsciiError::InvalidChannelCount` - if the buffer is not RGB
    pub fn render(&self, buffer: &PixelBuffer) -> Result<Vec<String>, AsciiError> {
        if buffer.channels() != RGB_CHANNELS {
            return Err(AsciiError::InvalidChannelCount(buffer.channels()));
        }

        let row_len = buffer.width() as usize * RGB_CHANNELS;
        let lines = buffer
            .data()
            .chunks_exact(row_len)
            .map(|row| self.render_row(row))
            .collect();

        Ok(lines)
    }

    fn render_row(&self, row: &[u8]) -> String {
        let cells = row.len() / RGB_CHANNELS;
        // "\x1b[38;2;255;255;255m" + glyph + reset
        let per_cell = if self.color { 24 } else { 1 };
        let mut line = String::with_capacity(cells * per_cell);

        for px in row.chunks_exact(RGB_CHANNELS) {
            let (r, g, b) = (px[0], px[1], px[2]);
            let glyph = self.glyph_for(r, g, b);
            if self.color {
                line.push_str(&format!("\x1b[38;2;{};{};{}m", r, g, b));
                line.push(glyph);
                line.push_str(COLOR_RESET);
            } else {
                line.push(glyph);
            }
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::charset::CharSet;

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
    }

    #[test]
    fn test_luminance_primaries() {
        // 0.2126 * 255 = 54.21
        assert_eq!(luminance(255, 0, 0), 54);
        // 0.7152 * 255 = 182.38
        assert_eq!(luminance(0, 255, 0), 182);
        // 0.0722 * 255 = 18.41
        assert_eq!(luminance(0, 0, 255), 18);
    }

    #[test]
    fn test_luminance_rounds_half_up() {
        // 0.7152 * 100 + 0.0722 * 100 = 78.74 -> 79
        assert_eq!(luminance(0, 100, 100), 79);
        // 0.2126 * 200 = 42.52 -> 43
        assert_eq!(luminance(200, 0, 0), 43);
    }

    #[test]
    fn test_glyph_index_endpoints() {
        assert_eq!(glyph_index(0, 10), 0);
        assert_eq!(glyph_index(255, 10), 9);
        assert_eq!(glyph_index(254, 10), 8);
        assert_eq!(glyph_index(128, 10), 4);
        assert_eq!(glyph_index(255, 1), 0);
    }

    #[test]
    fn test_glyph_index_monotonic() {
        for levels in [1, 2, 4, 5, 10, 70] {
            let mut last = 0;
            for b in 0..=255u8 {
                let idx = glyph_index(b, levels);
                assert!(idx >= last);
                assert!(idx < levels);
                last = idx;
            }
            assert_eq!(last, levels - 1);
        }
    }

    #[test]
    fn test_render_plain() {
        let buf = PixelBuffer::rgb(vec![0, 0, 0, 255, 255, 255, 255, 255, 255, 0, 0, 0], 2, 2)
            .unwrap();
        let lines = GlyphMapper::default().render(&buf).unwrap();
        assert_eq!(lines, vec![" @".to_string(), "@ ".to_string()]);
    }

    #[test]
    fn test_render_color_uses_exact_rgb() {
        let buf = PixelBuffer::rgb(vec![12, 200, 7], 1, 1).unwrap();
        let mapper = GlyphMapper::new(GlyphRamp::default(), true);
        let lines = mapper.render(&buf).unwrap();
        // luminance = 2.55 + 143.04 + 0.51 = 146.1 -> 146 -> index 5 '+'
        assert_eq!(lines, vec!["\x1b[38;2;12;200;7m+\x1b[0m".to_string()]);
    }

    #[test]
    fn test_render_invert() {
        let buf = PixelBuffer::filled(3, 1, [255, 255, 255]).unwrap();
        let mapper = GlyphMapper {
            invert: true,
            ..GlyphMapper::default()
        };
        assert_eq!(mapper.render(&buf).unwrap(), vec!["   ".to_string()]);
    }

    #[test]
    fn test_render_custom_ramp() {
        let buf = PixelBuffer::filled(2, 1, [255, 255, 255]).unwrap();
        let mapper = GlyphMapper::new(CharSet::Blocks.ramp(), false);
        assert_eq!(mapper.render(&buf).unwrap(), vec!["██".to_string()]);
    }

    #[test]
    fn test_render_rejects_non_rgb() {
        let buf = PixelBuffer::new(vec![0; 4], 2, 2, 1).unwrap();
        assert_eq!(
            GlyphMapper::default().render(&buf).unwrap_err(),
            AsciiError::InvalidChannelCount(1)
        );
    }

    #[test]
    fn test_render_does_not_modify_input() {
        let buf = PixelBuffer::rgb((0..18).collect(), 3, 2).unwrap();
        let before = buf.clone();
        let _ = GlyphMapper::new(GlyphRamp::default(), true).render(&buf);
        assert_eq!(buf, before);
    }
}
