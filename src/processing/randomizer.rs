//! Random host selection inside a subnet.
//!
//! The random source is always passed in, so a seeded or mock generator gives
//! reproducible output.

use crate::error::SubnetError;
use crate::models::Subnet;
use rand::Rng;
use std::net::Ipv4Addr;

/// Pick one address uniformly from the usable range of `subnet`.
///
/// * /32 - the single address
/// * /31 - either of the two addresses
/// * /30 and larger - any address except network and broadcast
///
/// # Examples
/// ```
/// use rand::rngs::mock::StepRng;
/// use subnet_random_ip::{models::Subnet, processing::random_usable_address};
/// let subnet = Subnet::parse("10.0.0.0/30").unwrap();
/// let ip = random_usable_address(&subnet, &mut StepRng::new(0, 0)).unwrap();
/// assert_eq!(ip.to_string(), "10.0.0.1");
/// ```
pub fn random_usable_address<R: Rng + ?Sized>(
    subnet: &Subnet,
    rng: &mut R,
) -> Result<Ipv4Addr, SubnetError> {
    let (lo, hi) = subnet.usable_range();
    let addr = pick_in_range(lo, hi, rng)?;
    log::debug!("picked {addr} from {subnet} ({lo} - {hi})");
    Ok(addr)
}

/// Pick one address uniformly from the inclusive range `lo..=hi`.
pub fn pick_in_range<R: Rng + ?Sized>(
    lo: Ipv4Addr,
    hi: Ipv4Addr,
    rng: &mut R,
) -> Result<Ipv4Addr, SubnetError> {
    let (lo_bits, hi_bits) = (u32::from(lo), u32::from(hi));
    if lo_bits > hi_bits {
        log::error!("empty usable range {lo} - {hi}");
        return Err(SubnetError::EmptyUsableRange { lo, hi });
    }
    Ok(Ipv4Addr::from(rng.gen_range(lo_bits..=hi_bits)))
}
