//! Remote input service entry point.
//!
//! Wires together the virtual device, the TCP listener, and the mDNS
//! advertisement, then runs until a shutdown signal arrives.
//!
//! # Startup order
//!
//! ```text
//! main()
//!  └─ open_default_device()   -- /dev/uinput node, fails fast without access
//!  └─ resolve_private_ipv4()  -- the LAN address peers will be told about
//!  └─ InputServer::bind()     -- listener on [::]:17863
//!  └─ discovery::register()   -- mDNS advertisement, last so it never points
//!                                at a service that failed to come up
//!  └─ serve()                 -- until Ctrl-C
//! ```
//!
//! Teardown mirrors it: the advertisement is withdrawn first so peers stop
//! finding the instance, then the listener result is reported, and the device
//! node disappears when the process exits.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use remote_input_server::application::dispatch::Dispatcher;
use remote_input_server::config::ServerConfig;
use remote_input_server::infrastructure::device::open_default_device;
use remote_input_server::infrastructure::discovery;
use remote_input_server::infrastructure::netif::resolve_private_ipv4;
use remote_input_server::infrastructure::network::InputServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("remote input service starting");

    let config = ServerConfig::default();

    // ── Virtual device ────────────────────────────────────────────────────────
    let device = open_default_device(&config.device_name)
        .context("virtual input device unavailable; is /dev/uinput accessible?")?;
    // This binding holds the last device handle, so the node stays alive
    // until after the advertisement is withdrawn below.
    let dispatcher = Dispatcher::new(device);

    // ── Listener ──────────────────────────────────────────────────────────────
    let advertised_ip =
        resolve_private_ipv4().context("no LAN address to advertise for discovery")?;
    let server = InputServer::bind(config.clone(), dispatcher.clone())
        .await
        .context("failed to bind the service listener")?;
    let advertised_port = server.local_addr().context("listener address")?.port();

    // ── Advertisement ─────────────────────────────────────────────────────────
    let advertisement = discovery::register(
        &config.service_type,
        &config.instance_prefix,
        advertised_ip,
        advertised_port,
    )
    .context("failed to advertise the service over mDNS")?;

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    info!("remote input service ready");
    let served = server.serve(shutdown_rx).await;

    // Withdraw the advertisement before reporting how serving went, so peers
    // stop resolving an instance that no longer answers.
    if let Err(e) = advertisement.unregister() {
        warn!("mDNS teardown failed: {e}");
    }
    served.context("service listener failed")?;

    info!("remote input service stopped");
    Ok(())
}
