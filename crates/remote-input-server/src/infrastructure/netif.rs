//! Local network interface enumeration.
//!
//! The mDNS advertisement must carry a concrete address, not the wildcard the
//! listener binds.  The service picks the first interface address inside
//! `192.168.0.0/16`, the range home routers hand out; peers and service are
//! expected to share such a LAN.  Startup fails when no interface qualifies,
//! because an advertisement pointing nowhere is worse than no service.

use std::net::{IpAddr, Ipv4Addr};

use thiserror::Error;

/// Errors from interface resolution.
#[derive(Debug, Error)]
pub enum NetifError {
    /// The operating system refused to enumerate interfaces.
    #[error("failed to enumerate network interfaces: {0}")]
    Enumerate(#[from] std::io::Error),

    /// Enumeration worked but no interface carries a usable address.
    #[error("no interface with a 192.168.0.0/16 address found")]
    NoPrivateIpv4,
}

/// Picks the first address inside `192.168.0.0/16` from the given candidates.
///
/// Pure selection logic, separated from OS enumeration so it can be tested
/// with fixed inputs.
pub fn first_private_ipv4<I>(addrs: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = IpAddr>,
{
    addrs.into_iter().find_map(|addr| match addr {
        IpAddr::V4(v4) if v4.octets()[0] == 192 && v4.octets()[1] == 168 => Some(v4),
        _ => None,
    })
}

/// Resolves the address to advertise by scanning the host's interfaces.
///
/// # Errors
///
/// [`NetifError::Enumerate`] when the OS query fails, [`NetifError::NoPrivateIpv4`]
/// when no interface address falls inside `192.168.0.0/16`.
pub fn resolve_private_ipv4() -> Result<Ipv4Addr, NetifError> {
    let interfaces = if_addrs::get_if_addrs()?;
    first_private_ipv4(interfaces.iter().map(|iface| iface.ip()))
        .ok_or(NetifError::NoPrivateIpv4)
}
