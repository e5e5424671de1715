use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

/// WS-Discovery IPv4 multicast group.
pub const WS_DISCOVERY_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
pub const WS_DISCOVERY_PORT: u16 = 3702;

#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    pub multicast_addr: Ipv4Addr,
    pub port: u16,
    /// Measured once from the moment the socket is ready; not per datagram.
    pub collection_window: Duration,
    /// Larger datagrams are truncated to this size.
    pub max_packet_size: usize,
    pub multicast_ttl: u32,
    pub multicast_loop: bool,
}

impl DiscoveryConfig {
    pub fn multicast_target(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.multicast_addr, self.port))
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            multicast_addr: WS_DISCOVERY_MULTICAST_ADDR,
            port: WS_DISCOVERY_PORT,
            collection_window: Duration::from_secs(8),
            max_packet_size: 8192,
            multicast_ttl: 1,
            multicast_loop: true,
        }
    }
}
