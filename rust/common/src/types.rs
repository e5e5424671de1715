use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use uuid::Uuid;

/// WS-Addressing message identifier, laid out 8-4-4-4-12 in lowercase hex.
///
/// Only the shape of a UUID is guaranteed; version and variant bits are
/// whatever the random source produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub const LEN: usize = 36;
    const DASHES: [usize; 4] = [8, 13, 18, 23];

    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        MessageId(Uuid::from_bytes(bytes).hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `urn:uuid:<id>`, as carried in the `MessageID` header.
    pub fn urn(&self) -> String {
        format!("urn:uuid:{}", self.0)
    }

    pub fn is_well_formed(s: &str) -> bool {
        s.len() == Self::LEN
            && s.char_indices().all(|(i, c)| {
                if Self::DASHES.contains(&i) {
                    c == '-'
                } else {
                    c.is_ascii_digit() || ('a'..='f').contains(&c)
                }
            })
    }
}

impl FromStr for MessageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_well_formed(s) {
            Ok(MessageId(s.to_string()))
        } else {
            Err(format!("not an 8-4-4-4-12 hex identifier: {:?}", s))
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw `XAddrs` text of one ProbeMatch. May hold several space-separated URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportAddress(String);

impl TransportAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TransportAddress {
    fn from(value: String) -> Self {
        TransportAddress(value)
    }
}

impl PartialEq<&str> for TransportAddress {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TransportAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Addresses in datagram arrival order, duplicates kept.
pub type DiscoveryResult = Vec<TransportAddress>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterface {
    pub name: String,
    pub addresses: Vec<IpAddr>,
    pub loopback: bool,
}

impl NetworkInterface {
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        self.addresses.iter().find_map(|addr| match addr {
            IpAddr::V4(v4) => Some(*v4),
            IpAddr::V6(_) => None,
        })
    }

    /// Address families present on the interface, `loopback` first when set.
    pub fn families(&self) -> String {
        let mut families = Vec::new();
        if self.loopback {
            families.push("loopback");
        }
        if self.addresses.iter().any(IpAddr::is_ipv4) {
            families.push("ipv4");
        }
        if self.addresses.iter().any(IpAddr::is_ipv6) {
            families.push("ipv6");
        }
        families.join("|")
    }
}
