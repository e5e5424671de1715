use crate::discovery::envelope::ProbeEnvelope;
use crate::discovery::mint::IdentifierMint;
use crate::discovery::response;
use crate::interfaces;
use common::{DiscoveryConfig, DiscoveryError, DiscoveryResult, ErrorKind, Result};
use log::{debug, info, warn};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use tokio::net::UdpSocket;
use tokio::time::{timeout_at, Instant};

/// `Init -> Bound -> Sent -> Collecting -> Done`, or `Failed` from any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Init,
    Bound,
    Sent,
    Collecting,
    Done,
    Failed(ErrorKind),
}

/// One WS-Discovery probe exchange: a single Probe out, ProbeMatches in until the deadline.
pub struct DiscoverySession {
    config: DiscoveryConfig,
    state: SessionState,
}

impl DiscoverySession {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            state: SessionState::Init,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Joins the WS-Discovery group on `interface_name`, probes, and collects
    /// the transport addresses of every ONVIF match seen before the deadline.
    pub async fn discover(&mut self, interface_name: &str) -> Result<DiscoveryResult> {
        self.begin()?;
        let outcome = self.bind_and_exchange(interface_name).await;
        self.finish(outcome)
    }

    /// Same exchange over a socket the caller already owns, probing `target`
    /// instead of the multicast group.
    pub async fn probe_and_collect(
        &mut self,
        socket: &UdpSocket,
        target: SocketAddr,
    ) -> Result<DiscoveryResult> {
        self.begin()?;
        self.transition(SessionState::Bound);
        let outcome = self.exchange(socket, target).await;
        self.finish(outcome)
    }

    fn begin(&self) -> Result<()> {
        if self.state != SessionState::Init {
            return Err(DiscoveryError::SessionSpent(format!(
                "session is {:?}, a new session is needed for another probe",
                self.state
            )));
        }
        Ok(())
    }

    fn finish(&mut self, outcome: Result<DiscoveryResult>) -> Result<DiscoveryResult> {
        match &outcome {
            Ok(addresses) => {
                info!("Discovery finished with {} match(es)", addresses.len());
                self.transition(SessionState::Done);
            }
            Err(e) => {
                warn!("Discovery failed: {}", e);
                self.transition(SessionState::Failed(e.kind()));
            }
        }
        outcome
    }

    fn transition(&mut self, next: SessionState) {
        debug!("Session state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    async fn bind_and_exchange(&mut self, interface_name: &str) -> Result<DiscoveryResult> {
        let interface_addr = interfaces::resolve_ipv4(interface_name)?;
        let socket = self.bind_multicast(interface_name, interface_addr)?;
        self.transition(SessionState::Bound);
        info!(
            "Joined {} on {} ({})",
            self.config.multicast_target(),
            interface_name,
            interface_addr
        );

        let target = self.config.multicast_target();
        self.exchange(&socket, target).await
    }

    fn bind_multicast(&self, interface_name: &str, interface_addr: Ipv4Addr) -> Result<UdpSocket> {
        let fail = |e: io::Error| DiscoveryError::multicast_bind_failed(interface_name, e);

        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP)).map_err(fail)?;
        socket.set_reuse_address(true).map_err(fail)?;

        let bind_addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, self.config.port);
        socket.bind(&bind_addr.into()).map_err(fail)?;

        socket
            .join_multicast_v4(&self.config.multicast_addr, &interface_addr)
            .map_err(fail)?;
        socket.set_multicast_if_v4(&interface_addr).map_err(fail)?;
        socket.set_multicast_ttl_v4(self.config.multicast_ttl).map_err(fail)?;
        socket.set_multicast_loop_v4(self.config.multicast_loop).map_err(fail)?;
        socket.set_nonblocking(true).map_err(fail)?;

        UdpSocket::from_std(socket.into()).map_err(fail)
    }

    async fn exchange(&mut self, socket: &UdpSocket, target: SocketAddr) -> Result<DiscoveryResult> {
        let deadline = Instant::now() + self.config.collection_window;

        let envelope = ProbeEnvelope::build(IdentifierMint::new().mint()?);
        socket
            .send_to(envelope.as_bytes(), target)
            .await
            .map_err(|e| DiscoveryError::SendFailed(format!("{}: {}", target, e)))?;
        self.transition(SessionState::Sent);
        info!(
            "Sent probe {} to {} ({} bytes)",
            envelope.message_id(),
            target,
            envelope.len()
        );

        self.transition(SessionState::Collecting);
        self.collect(socket, deadline).await
    }

    async fn collect(&self, socket: &UdpSocket, deadline: Instant) -> Result<DiscoveryResult> {
        let mut addresses = Vec::new();
        let mut buffer = vec![0u8; self.config.max_packet_size];

        loop {
            let (len, from) = match timeout_at(deadline, socket.recv_from(&mut buffer)).await {
                Err(_) => break,
                Ok(Ok(received)) => received,
                Ok(Err(e)) => return Err(DiscoveryError::ReadFailed(e.to_string())),
            };

            match response::transport_address(&buffer[..len], from.ip()) {
                Some(address) => {
                    debug!("ProbeMatch from {}: {}", from, address);
                    addresses.push(address);
                }
                None => {
                    debug!("Discarded {} bytes from {}: no ONVIF XAddrs", len, from);
                }
            }
        }

        Ok(addresses)
    }
}
