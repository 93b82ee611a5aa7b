//! Random host address generator for IPv4 subnets.
//!
//! - [`models`] - [`models::Subnet`] parsing and the generation [`models::History`]
//! - [`processing`] - picking a random usable address
//! - [`output`] - terminal text and clipboard
//! - [`session`] - the interactive prompt

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;
pub mod session;

use output::{Clipboard, CommandClipboard, NoClipboard};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use error::SubnetError;

/// Random source for a session, seeded when the config asks for it.
pub fn make_rng(cfg: &config::Config) -> StdRng {
    match cfg.seed {
        Some(seed) => {
            log::info!("using fixed seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Clipboard for a session according to the config.
pub fn make_clipboard(cfg: &config::Config) -> Box<dyn Clipboard> {
    if !cfg.clipboard {
        log::info!("clipboard disabled");
        return Box::new(NoClipboard);
    }
    match &cfg.clipboard_cmd {
        Some(cmd) => Box::new(CommandClipboard::with_command(cmd)),
        None => Box::new(CommandClipboard::system()),
    }
}
