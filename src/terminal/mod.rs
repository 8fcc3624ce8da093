//! Terminal management - geometry queries, screen guard, and in-place frame output.

mod screen;
mod size;
mod writer;

pub use screen::ScreenGuard;
pub use size::{query_size, resolve_size, TerminalSize};
pub use writer::FrameWriter;
