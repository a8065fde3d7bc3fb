//! IPv4 subnet membership.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use log::trace;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ParseNetworkError {
    #[error("invalid IPv4 address {0:?}")]
    Address(String),
    #[error("invalid network {0:?}, expected <address>/<bits> with bits in 0..=32")]
    Network(String),
}

/// Returns `true` if `ip` masked with the network's prefix equals the network
/// address. A network address with host bits set matches nothing.
pub fn contains(network: &Ipv4Net, ip: Ipv4Addr) -> bool {
    let ipaddr = u32::from(ip);
    let netaddr = u32::from(network.addr());
    let netmask = u32::from(network.netmask());
    trace!("ipaddr: {ipaddr:08x}, netaddr: {netaddr:08x}, netmask: {netmask:08x}");
    ipaddr & netmask == netaddr
}

/// Parses `ip` and `network` (`a.b.c.d/bits`) and checks membership.
///
/// # Example
/// ```
/// assert!(fastping::subnet::netmatch("192.168.0.1", "192.168.0.0/24").unwrap());
/// assert!(!fastping::subnet::netmatch("192.168.1.1", "192.168.0.0/24").unwrap());
/// ```
pub fn netmatch(ip: &str, network: &str) -> Result<bool, ParseNetworkError> {
    let ip: Ipv4Addr = ip
        .trim()
        .parse()
        .map_err(|_| ParseNetworkError::Address(ip.into()))?;
    let network: Ipv4Net = network
        .trim()
        .parse()
        .map_err(|_| ParseNetworkError::Network(network.into()))?;
    Ok(contains(&network, ip))
}
