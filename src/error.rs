//! Error types for subnet parsing and address selection.

use std::net::Ipv4Addr;
use thiserror::Error;

/// Errors returned by [`crate::models::Subnet::parse`] and
/// [`crate::processing::random_usable_address`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetError {
    /// Malformed CIDR string, octet out of range or prefix out of range.
    #[error("{0}")]
    InvalidSubnetFormat(String),
    /// The selectable range is empty. Only reachable through a bug.
    #[error("no usable hosts between {lo} and {hi}")]
    EmptyUsableRange { lo: Ipv4Addr, hi: Ipv4Addr },
}

impl SubnetError {
    pub(crate) fn format(msg: impl Into<String>) -> SubnetError {
        SubnetError::InvalidSubnetFormat(msg.into())
    }
}
