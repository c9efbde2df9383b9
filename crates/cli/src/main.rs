use authdns_application::use_cases::HandleDnsQueryUseCase;
use authdns_domain::CliOverrides;
use authdns_infrastructure::dns::{DnsServerHandler, UdpForwarder};
use authdns_infrastructure::zone::load_zones;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "authdns")]
#[command(version)]
#[command(about = "authdns - Authoritative DNS server with upstream forwarding")]
struct Cli {
    /// UDP port to answer queries on
    port: u16,

    /// Zone config: upstream resolver IP, then one `domain,zone-file` per line
    config_path: PathBuf,

    /// Settings file (TOML)
    #[arg(short = 's', long, value_name = "FILE")]
    settings: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: Some(cli.port),
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.settings.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting authdns v{}", env!("CARGO_PKG_VERSION"));

    let zones = load_zones(&cli.config_path)?;
    if zones.store.is_empty() {
        warn!("No zones loaded, every query will be forwarded upstream");
    }

    let bind_ip: IpAddr = config.server.bind_address.parse().map_err(|e| {
        anyhow::anyhow!("Invalid bind address '{}': {}", config.server.bind_address, e)
    })?;

    let upstream = SocketAddr::new(zones.upstream, config.server.forward_port);
    let forwarder = UdpForwarder::bind(
        SocketAddr::new(bind_ip, config.server.forward_bind_port),
        upstream,
        Duration::from_millis(config.server.upstream_timeout_ms),
    )
    .await?;
    info!(
        upstream = %forwarder.upstream(),
        local = %forwarder.local_addr()?,
        timeout_ms = config.server.upstream_timeout_ms,
        "Forwarder ready"
    );

    let use_case = HandleDnsQueryUseCase::new(
        Arc::new(zones.store),
        Arc::new(forwarder),
        config.server.max_packet_size,
    );
    let handler = DnsServerHandler::new(Arc::new(use_case));

    let dns_addr = SocketAddr::new(bind_ip, config.server.dns_port);

    tokio::select! {
        result = server::start_dns_server(dns_addr, handler, config.server.max_in_flight) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    info!("Server shutdown complete");
    Ok(())
}
