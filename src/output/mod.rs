//! Output side of the interactive session.
//!
//! - [`terminal`] - text shown to the user, with colors
//! - [`clipboard`] - copying the generated address to the system clipboard

mod clipboard;
pub mod terminal;

pub use clipboard::{Clipboard, CommandClipboard, NoClipboard};
