//! Screen setup with panic-safe cleanup.

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::ResetColor;
use crossterm::terminal::{Clear, ClearType};
use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether the cursor is currently hidden (for the panic handler)
pub(crate) static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Guard that clears the screen and hides the cursor while frames are drawn.
/// The cursor and colors are restored on drop, including during a panic.
pub struct ScreenGuard {
    /// Whether this guard is responsible for cleanup
    active: bool,
}

impl ScreenGuard {
    /// Clear the screen, hide the cursor and return the restoring guard.
    ///
    /// # Errors
    /// Returns an error if writing the escape sequences fails
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        crossterm::execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0), Hide)?;
        SCREEN_ACTIVE.store(true, Ordering::SeqCst);

        Ok(Self { active: true })
    }

    /// Restore the terminal without dropping the guard.
    /// After calling this, the guard's drop will be a no-op.
    pub fn exit(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            SCREEN_ACTIVE.store(false, Ordering::SeqCst);
            restore(&mut io::stdout())?;
        }
        Ok(())
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        if self.active {
            SCREEN_ACTIVE.store(false, Ordering::SeqCst);
            // Best-effort cleanup - ignore errors during drop
            let _ = restore(&mut io::stdout());
        }
    }
}

fn restore(out: &mut impl io::Write) -> io::Result<()> {
    crossterm::execute!(out, ResetColor, Show)?;
    writeln!(out)
}

/// Install a panic hook that restores the cursor before the panic message.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if SCREEN_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = restore(&mut io::stdout());
        }

        original_hook(panic_info);
    }));
}
