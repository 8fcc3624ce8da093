//! Terminal geometry.

use std::fmt;

use crate::ascii::AsciiError;

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub cols: u16,
    pub rows: u16,
}

impl TerminalSize {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// True when both dimensions are non-zero.
    pub fn is_usable(&self) -> bool {
        self.cols > 0 && self.rows > 0
    }
}

impl fmt::Display for TerminalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Read the current size of the controlling terminal.
///
/// Returns `None` when stdout is not a terminal or the query fails.
pub fn query_size() -> Option<TerminalSize> {
    match crossterm::terminal::size() {
        Ok((cols, rows)) => Some(TerminalSize { cols, rows }),
        Err(e) => {
            log::debug!("terminal size query failed: {}", e);
            None
        }
    }
}

/// Pick the size to render into.
///
/// A usable measured size wins; otherwise a usable fallback is used.
///
/// # Errors
/// * `AsciiError::NoTerminal` - if neither size is usable
pub fn resolve_size(
    measured: Option<TerminalSize>,
    fallback: Option<TerminalSize>,
) -> Result<TerminalSize, AsciiError> {
    if let Some(size) = measured.filter(TerminalSize::is_usable) {
        return Ok(size);
    }

    if let Some(size) = fallback.filter(TerminalSize::is_usable) {
        log::debug!("using fallback terminal size {}", size);
        return Ok(size);
    }

    let reported = measured.unwrap_or(TerminalSize { cols: 0, rows: 0 });
    Err(AsciiError::NoTerminal {
        cols: reported.cols,
        rows: reported.rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_size_wins() {
        let size = resolve_size(
            Some(TerminalSize::new(120, 40)),
            Some(TerminalSize::new(80, 24)),
        )
        .unwrap();
        assert_eq!(size, TerminalSize::new(120, 40));
    }

    #[test]
    fn test_zero_size_uses_fallback() {
        let size = resolve_size(
            Some(TerminalSize::new(0, 0)),
            Some(TerminalSize::new(80, 24)),
        )
        .unwrap();
        assert_eq!(size, TerminalSize::new(80, 24));
    }

    #[test]
    fn test_missing_terminal_without_fallback() {
        assert_eq!(
            resolve_size(None, None).unwrap_err(),
            AsciiError::NoTerminal { cols: 0, rows: 0 }
        );
        assert_eq!(
            resolve_size(Some(TerminalSize::new(80, 0)), Some(TerminalSize::new(0, 10)))
                .unwrap_err(),
            AsciiError::NoTerminal { cols: 80, rows: 0 }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TerminalSize::new(80, 24).to_string(), "80x24");
    }
}
