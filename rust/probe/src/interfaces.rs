use common::{DiscoveryError, NetworkInterface, Result};
use log::debug;
use std::net::{IpAddr, Ipv4Addr};

/// Lists the host's interfaces, one entry per name in the order the system reports them.
pub fn list_interfaces() -> Result<Vec<NetworkInterface>> {
    let addrs = if_addrs::get_if_addrs()
        .map_err(|e| DiscoveryError::InterfaceEnumeration(e.to_string()))?;

    let interfaces = group_by_name(
        addrs
            .into_iter()
            .map(|iface| (iface.name.clone(), iface.ip(), iface.is_loopback())),
    );
    debug!("Found {} network interface(s)", interfaces.len());
    Ok(interfaces)
}

fn group_by_name<I>(entries: I) -> Vec<NetworkInterface>
where
    I: IntoIterator<Item = (String, IpAddr, bool)>,
{
    let mut interfaces: Vec<NetworkInterface> = Vec::new();
    for (name, addr, loopback) in entries {
        match interfaces.iter_mut().find(|iface| iface.name == name) {
            Some(iface) => {
                iface.addresses.push(addr);
                iface.loopback |= loopback;
            }
            None => interfaces.push(NetworkInterface {
                name,
                addresses: vec![addr],
                loopback,
            }),
        }
    }
    interfaces
}

/// IPv4 address the WS-Discovery group is joined on for `name`.
pub fn resolve_ipv4(name: &str) -> Result<Ipv4Addr> {
    let interfaces = list_interfaces()
        .map_err(|e| DiscoveryError::InterfaceUnknown(format!("{}: {}", name, e)))?;

    let iface = interfaces
        .iter()
        .find(|iface| iface.name == name)
        .ok_or_else(|| DiscoveryError::InterfaceUnknown(name.to_string()))?;

    iface
        .ipv4()
        .ok_or_else(|| DiscoveryError::multicast_bind_failed(name, "interface has no IPv4 address"))
}
