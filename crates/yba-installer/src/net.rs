use std::net::{IpAddr, SocketAddr, UdpSocket};

use tracing::debug;

use crate::error::{InstallerError, Result};

const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";

pub fn guess_primary_ip() -> Result<IpAddr> {
    let probe = ROUTE_PROBE_ADDR
        .parse::<SocketAddr>()
        .map_err(|err| InstallerError::PrimaryIp {
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, err),
        })?;
    guess_primary_ip_towards(probe)
}

// Connecting a UDP socket only picks a route; no packet is sent.
pub fn guess_primary_ip_towards(probe: SocketAddr) -> Result<IpAddr> {
    let bind_addr = if probe.is_ipv4() {
        "0.0.0.0:0"
    } else {
        "[::]:0"
    };
    let socket =
        UdpSocket::bind(bind_addr).map_err(|source| InstallerError::PrimaryIp { source })?;
    socket
        .connect(probe)
        .map_err(|source| InstallerError::PrimaryIp { source })?;
    let local = socket
        .local_addr()
        .map_err(|source| InstallerError::PrimaryIp { source })?;

    debug!("Primary IP towards {probe} is {}", local.ip());
    Ok(local.ip())
}
