//! asciicam library crate.
//!
//! Renders a live webcam stream as ASCII art in the terminal. The modules
//! are exposed for integration testing.

pub mod ascii;
pub mod camera;
pub mod cli;
pub mod config;
pub mod player;
pub mod terminal;
