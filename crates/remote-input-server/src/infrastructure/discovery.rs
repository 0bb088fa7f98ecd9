//! mDNS advertisement of the input service.
//!
//! Peers find the service by browsing the local network for its service type;
//! nothing is ever configured on the peer side.  The advertisement carries
//! the concrete LAN address and port picked at startup, under an instance
//! name that embeds the hostname so two machines on one network stay
//! distinguishable.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use mdns_sd::{ServiceDaemon, ServiceInfo};
use thiserror::Error;
use tracing::{info, warn};

/// How long to wait for the goodbye packets to go out on unregister.
const UNREGISTER_TIMEOUT: Duration = Duration::from_secs(3);

/// Errors from mDNS advertisement.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The host name could not be read; it names the instance and the mDNS
    /// host record.
    #[error("failed to read the host name: {0}")]
    Hostname(#[source] std::io::Error),

    /// The mDNS daemon rejected an operation.
    #[error("mDNS daemon error: {0}")]
    Daemon(#[from] mdns_sd::Error),
}

/// Builds the advertised instance name: `<prefix> (<hostname>)`.
pub fn instance_name(prefix: &str) -> Result<String, DiscoveryError> {
    let host = hostname::get().map_err(DiscoveryError::Hostname)?;
    Ok(format!("{prefix} ({})", host.to_string_lossy()))
}

/// Builds the service record for one explicit address.
///
/// mdns-sd addresses records with [`IpAddr`] values; the service always
/// advertises exactly one, the resolved LAN IPv4.
fn advertisement(
    service_type: &str,
    instance: &str,
    host: &str,
    ip: Ipv4Addr,
    port: u16,
) -> Result<ServiceInfo, DiscoveryError> {
    Ok(ServiceInfo::new(
        service_type,
        instance,
        host,
        IpAddr::V4(ip),
        port,
        None,
    )?)
}

/// A live advertisement.  Dropping it without calling
/// [`DiscoveryHandle::unregister`] leaves the record to age out on its own.
pub struct DiscoveryHandle {
    daemon: ServiceDaemon,
    fullname: String,
}

impl DiscoveryHandle {
    /// The full registered service name, unique on the network.
    pub fn fullname(&self) -> &str {
        &self.fullname
    }

    /// Takes the advertisement off the network: sends the mDNS goodbye for
    /// this instance, then stops the daemon.
    pub fn unregister(self) -> Result<(), DiscoveryError> {
        match self.daemon.unregister(&self.fullname) {
            Ok(done) => {
                // Best effort; the record expires from peer caches anyway.
                let _ = done.recv_timeout(UNREGISTER_TIMEOUT);
            }
            Err(e) => warn!("mDNS unregister failed for {}: {e}", self.fullname),
        }
        self.daemon.shutdown()?;
        info!("mDNS advertisement for {} withdrawn", self.fullname);
        Ok(())
    }
}

/// Registers the service on the local network.
///
/// `ip` must be the address peers can actually reach, not the wildcard the
/// listener binds (see [`crate::infrastructure::netif`]).
pub fn register(
    service_type: &str,
    instance_prefix: &str,
    ip: Ipv4Addr,
    port: u16,
) -> Result<DiscoveryHandle, DiscoveryError> {
    let daemon = ServiceDaemon::new()?;
    let host = hostname::get().map_err(DiscoveryError::Hostname)?;
    let host = format!("{}.local.", host.to_string_lossy());
    let instance = instance_name(instance_prefix)?;

    let service = advertisement(service_type, &instance, &host, ip, port)?;
    let fullname = service.get_fullname().to_string();
    daemon.register(service)?;
    info!("registered mDNS service {fullname} at {ip}:{port}");

    Ok(DiscoveryHandle { daemon, fullname })
}
