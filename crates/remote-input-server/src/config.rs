//! Service configuration.
//!
//! The service runs without a configuration file or CLI flags; every value is
//! a fixed property of the deployment.  They are gathered in one struct so
//! tests can override them (ephemeral ports, loopback binds) without touching
//! what the binary runs with.

use std::net::{IpAddr, Ipv6Addr};

use remote_input_core::protocol::messages::SERVICE_PORT;

/// Runtime settings for the input service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port the listener binds; also carried in the advertisement.
    pub port: u16,
    /// Address to bind.  The unspecified IPv6 address accepts connections on
    /// every interface, over both IPv6 and IPv4 where the platform maps it.
    pub bind_address: IpAddr,
    /// Number of concurrent request workers.
    pub worker_count: usize,
    /// Depth of the queue feeding the workers; connection readers stall when
    /// it fills, which back-pressures fast peers instead of buffering
    /// unboundedly.
    pub queue_depth: usize,
    /// Name the virtual device registers under on the host.
    pub device_name: String,
    /// mDNS service type to advertise.
    pub service_type: String,
    /// Prefix of the advertised instance name; the hostname is appended in
    /// parentheses.
    pub instance_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: SERVICE_PORT,
            bind_address: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            worker_count: 10,
            queue_depth: 128,
            device_name: "remote-input virtual device".to_string(),
            service_type: "_grpc._tcp.local.".to_string(),
            instance_prefix: "Input Server".to_string(),
        }
    }
}
