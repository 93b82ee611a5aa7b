//! Domain models for the random subnet address generator.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Subnet`] - IPv4 network parsed from CIDR notation
//! - [`History`] and [`HistoryEntry`] - in-memory record of generated addresses
//! - prefix arithmetic helpers shared by the above

mod history;
mod ipv4;
mod subnet;

// Re-export public types
pub use history::{History, HistoryEntry};
pub use ipv4::{block_size, broadcast_addr, cut_addr, get_cidr_mask, MAX_LENGTH};
pub use subnet::Subnet;
