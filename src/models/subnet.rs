//! Validated IPv4 subnet parsed from CIDR notation.

use super::ipv4::{block_size, broadcast_addr, cut_addr, MAX_LENGTH};
use crate::error::SubnetError;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Shape check run before any numeric parsing, e.g. `192.168.1.0/24`.
static CIDR_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cidr_regex() -> &'static Regex {
    CIDR_REGEX.get_or_init(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}/\d{1,2}$").expect("Invalid Regex"))
}

const FORMAT_HINT: &str = "Invalid subnet format. Use notation like '192.168.1.0/24'";

/// IPv4 network in CIDR notation.
///
/// The address is always the network address: host bits given on input are
/// masked off by [`Subnet::parse`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Subnet {
    network: Ipv4Addr,
    prefix: u8,
}

impl Subnet {
    /// Parse a CIDR string (e.g. "10.0.0.0/24").
    ///
    /// Surrounding whitespace is ignored. `192.168.1.5/24` is accepted and
    /// normalized to `192.168.1.0/24`.
    ///
    /// # Returns
    /// * `Ok(Subnet)` - the normalized network
    /// * `Err(SubnetError::InvalidSubnetFormat)` - malformed input, octet > 255 or prefix > 32
    pub fn parse(input: &str) -> Result<Subnet, SubnetError> {
        let input = input.trim();
        if !get_cidr_regex().is_match(input) {
            return Err(SubnetError::format(FORMAT_HINT));
        }

        // The regex guarantees exactly one '/'
        let (addr_part, prefix_part) = input
            .split_once('/')
            .ok_or_else(|| SubnetError::format(FORMAT_HINT))?;

        let addr: Ipv4Addr = addr_part
            .parse()
            .map_err(|_| SubnetError::format(format!("Invalid subnet: bad address {addr_part}")))?;
        let prefix: u8 = prefix_part
            .parse()
            .map_err(|_| SubnetError::format(format!("Invalid subnet: bad prefix {prefix_part}")))?;

        Subnet::new(addr, prefix)
    }

    /// Build a subnet from an address and prefix, masking off host bits.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Subnet, SubnetError> {
        if prefix > MAX_LENGTH {
            return Err(SubnetError::format(format!(
                "Invalid subnet: prefix /{prefix} is longer than {MAX_LENGTH} bits"
            )));
        }
        let network = cut_addr(addr, prefix)?;
        if network != addr {
            log::debug!("normalized {addr}/{prefix} to network {network}/{prefix}");
        }
        Ok(Subnet { network, prefix })
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Total number of addresses, 2^(32-prefix).
    pub fn size(&self) -> u64 {
        // prefix is validated on construction
        block_size(self.prefix).unwrap_or(0)
    }

    /// The last address in the subnet.
    pub fn broadcast(&self) -> Ipv4Addr {
        broadcast_addr(self.network, self.prefix).unwrap_or(self.network)
    }

    /// Inclusive bounds of the addresses a host can be picked from.
    ///
    /// /31 and /32 keep every address; larger subnets drop the network and
    /// broadcast address.
    pub fn usable_range(&self) -> (Ipv4Addr, Ipv4Addr) {
        let lo = u32::from(self.network);
        let hi = u32::from(self.broadcast());
        if self.size() > 2 {
            (Ipv4Addr::from(lo + 1), Ipv4Addr::from(hi - 1))
        } else {
            (Ipv4Addr::from(lo), Ipv4Addr::from(hi))
        }
    }

    /// Number of addresses in [`Subnet::usable_range`].
    pub fn usable_hosts(&self) -> u64 {
        let (lo, hi) = self.usable_range();
        u64::from(u32::from(hi)) - u64::from(u32::from(lo)) + 1
    }

    /// Check if an IP address is contained within this subnet.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.network && ip <= self.broadcast()
    }
}

impl FromStr for Subnet {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subnet::parse(s)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl Serialize for Subnet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Subnet {
    fn deserialize<D>(deserializer: D) -> Result<Subnet, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Subnet::parse(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}
