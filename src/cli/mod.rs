//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes defining commands, parsing arguments, handling user interaction
//! (prompts, menus) and rendering results for the terminal.

mod commands;
mod render;

pub use commands::*;
pub use render::*;
