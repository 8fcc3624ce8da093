//! Scale-factor derivation for aspect-correct terminal rendering.

use std::fmt;

use super::error::AsciiError;

/// Default terminal character aspect ratio (cell width / cell height).
/// Terminal characters are typically ~2x taller than wide.
pub const DEFAULT_CHAR_ASPECT: f32 = 0.5;

/// Extra shrink added on top of the tight-fit scale.
///
/// Keeps the last row and column inside the terminal when the size changes
/// between measuring and drawing.
pub const DEFAULT_SCALE_MARGIN: u32 = 2;

/// Largest margin accepted from configuration or the command line.
pub const MAX_SCALE_MARGIN: u32 = 64;

/// How many source pixels are averaged into one output cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFactor {
    x: u32,
    y: u32,
}

impl ScaleFactor {
    /// Create a scale factor from explicit horizontal and vertical steps.
    ///
    /// # Errors
    /// * `AsciiError::InvalidScale` - if either step is zero
    pub fn new(x: u32, y: u32) -> Result<Self, AsciiError> {
        if x == 0 || y == 0 {
            return Err(AsciiError::InvalidScale { x, y });
        }
        Ok(Self { x, y })
    }

    /// Pair a horizontal step with a vertical step twice as large, so each
    /// cell covers a block shaped like a terminal character.
    ///
    /// A zero step is raised to 1 and huge steps are capped at
    /// `u32::MAX / 2`, so `y == 2 * x` always holds.
    pub fn from_horizontal(x: u32) -> Self {
        let x = x.clamp(1, u32::MAX / 2);
        Self { x, y: x * 2 }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Tunables for [`derive_scale_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOptions {
    /// Width / height of one terminal character cell
    pub char_aspect: f32,
    /// Added to the tight-fit scale
    pub margin: u32,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            char_aspect: DEFAULT_CHAR_ASPECT,
            margin: DEFAULT_SCALE_MARGIN,
        }
    }
}

impl ScaleOptions {
    /// Derive the full scale factor (`y = 2 * x`) for a source and terminal.
    pub fn scale_factor(
        &self,
        source_width: u32,
        source_height: u32,
        term_cols: u16,
        term_rows: u16,
    ) -> Result<ScaleFactor, AsciiError> {
        let x = derive_scale_with(source_width, source_height, term_cols, term_rows, *self)?;
        Ok(ScaleFactor::from_horizontal(x))
    }
}

/// Derive the horizontal scale step for the given source and terminal size.
///
/// The vertical step is twice this value (see [`ScaleFactor::from_horizontal`]).
///
/// # Arguments
/// * `source_width` - Width of the source image in pixels
/// * `source_height` - Height of the source image in pixels
/// * `term_cols` - Terminal width in characters
/// * `term_rows` - Terminal height in characters
/// * `char_aspect` - Character cell width / height (typically 0.5)
///
/// # Returns
/// A step of at least `1 + DEFAULT_SCALE_MARGIN`.
///
/// # Example
/// ```
/// use asciicam::ascii::derive_scale;
///
/// // 640 / 80 = 8 pixels per column, 480 / (24 / 0.5) = 10 per row
/// assert_eq!(derive_scale(640, 480, 80, 24, 0.5).unwrap(), 12);
/// ```
pub fn derive_scale(
    source_width: u32,
    source_height: u32,
    term_cols: u16,
    term_rows: u16,
    char_aspect: f32,
) -> Result<u32, AsciiError> {
    derive_scale_with(
        source_width,
        source_height,
        term_cols,
        term_rows,
        ScaleOptions {
            char_aspect,
            margin: DEFAULT_SCALE_MARGIN,
        },
    )
}

/// Derive the horizontal scale step with an explicit margin.
///
/// # Errors
/// * `AsciiError::NoTerminal` - if either terminal dimension is zero
/// * `AsciiError::InvalidAspect` - if `char_aspect` is not positive and finite
pub fn derive_scale_with(
    source_width: u32,
    source_height: u32,
    term_cols: u16,
    term_rows: u16,
    options: ScaleOptions,
) -> Result<u32, AsciiError> {
    if term_cols == 0 || term_rows == 0 {
        return Err(AsciiError::NoTerminal {
            cols: term_cols,
            rows: term_rows,
        });
    }
    if !options.char_aspect.is_finite() || options.char_aspect <= 0.0 {
        return Err(AsciiError::InvalidAspect(options.char_aspect));
    }

    let scale_x = f64::from(source_width) / f64::from(term_cols);
    let scale_y = f64::from(source_height) / (f64::from(term_rows) / f64::from(options.char_aspect));

    // `as` saturates, so huge ratios clamp to u32::MAX.
    let tight = scale_x.max(scale_y).floor() as u32;
    Ok(tight.max(1).saturating_add(options.margin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor_rejects_zero() {
        assert_eq!(
            ScaleFactor::new(0, 2).unwrap_err(),
            AsciiError::InvalidScale { x: 0, y: 2 }
        );
        assert!(ScaleFactor::new(3, 0).is_err());
    }

    #[test]
    fn test_from_horizontal_doubles_vertical() {
        let s = ScaleFactor::from_horizontal(5);
        assert_eq!((s.x(), s.y()), (5, 10));
        let s = ScaleFactor::from_horizontal(0);
        assert_eq!((s.x(), s.y()), (1, 2));
    }

    #[test]
    fn test_derive_scale_typical_webcam() {
        // 640/80 = 8, 480/48 = 10 -> 10 + 2
        assert_eq!(derive_scale(640, 480, 80, 24, 0.5).unwrap(), 12);
        // 1280/200 = 6.4, 720/120 = 6 -> 6 + 2
        assert_eq!(derive_scale(1280, 720, 200, 60, 0.5).unwrap(), 8);
    }

    #[test]
    fn test_derive_scale_small_source_floors_at_three() {
        assert_eq!(derive_scale(10, 10, 200, 100, 0.5).unwrap(), 3);
        assert_eq!(derive_scale(1, 1, u16::MAX, u16::MAX, 0.5).unwrap(), 3);
    }

    #[test]
    fn test_derive_scale_no_terminal() {
        assert_eq!(
            derive_scale(640, 480, 0, 24, 0.5).unwrap_err(),
            AsciiError::NoTerminal { cols: 0, rows: 24 }
        );
        assert!(derive_scale(640, 480, 80, 0, 0.5).is_err());
    }

    #[test]
    fn test_derive_scale_bad_aspect() {
        assert_eq!(
            derive_scale(640, 480, 80, 24, 0.0).unwrap_err(),
            AsciiError::InvalidAspect(0.0)
        );
        assert!(derive_scale(640, 480, 80, 24, f32::NAN).is_err());
    }

    #[test]
    fn test_zero_margin_still_at_least_one() {
        let options = ScaleOptions {
            char_aspect: 0.5,
            margin: 0,
        };
        assert_eq!(derive_scale_with(4, 4, 80, 24, options).unwrap(), 1);
    }

    #[test]
    fn test_monotonic_in_source_size() {
        let mut last = 0;
        for width in (0..4000).step_by(37) {
            let scale = derive_scale(width, width * 3 / 4, 120, 40, 0.5).unwrap();
            assert!(scale >= last, "scale dropped at width {}", width);
            assert!(scale >= 3);
            last = scale;
        }
    }

    #[test]
    fn test_from_horizontal_keeps_ratio_at_extremes() {
        let s = ScaleFactor::from_horizontal(u32::MAX);
        assert_eq!(s.y(), s.x() * 2);

        let options = ScaleOptions {
            char_aspect: 0.5,
            margin: u32::MAX,
        };
        let s = options.scale_factor(640, 480, 80, 24).unwrap();
        assert_eq!(s.y(), s.x() * 2);
    }

    #[test]
    fn test_options_scale_factor() {
        let s = ScaleOptions::default()
            .scale_factor(640, 480, 80, 24)
            .unwrap();
        assert_eq!(s, ScaleFactor::new(12, 24).unwrap());
    }
}
