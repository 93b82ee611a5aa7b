//! IPv4 prefix arithmetic.
//!
//! Mask, network and broadcast calculations shared by [`super::Subnet`] and
//! the address selection in [`crate::processing`].

use crate::error::SubnetError;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

fn check_length(len: u8) -> Result<(), SubnetError> {
    if len > MAX_LENGTH {
        Err(SubnetError::format(format!(
            "Invalid subnet: prefix /{len} is longer than {MAX_LENGTH} bits"
        )))
    } else {
        Ok(())
    }
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_random_ip::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, SubnetError> {
    check_length(len)?;
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;

    // u64 so that a shift by 32 for /0 stays defined
    let mask = (all_bits >> right_len) << right_len;

    Ok(mask as u32)
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, SubnetError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, SubnetError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// Number of addresses covered by a prefix, 2^(32-len).
pub fn block_size(len: u8) -> Result<u64, SubnetError> {
    check_length(len)?;
    Ok(1u64 << (MAX_LENGTH - len))
}
