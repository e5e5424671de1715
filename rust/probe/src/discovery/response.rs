//! Pragmatic extraction from ProbeMatch datagrams. No XML validation is done:
//! a datagram is only checked for the `onvif` marker and its first `XAddrs`.

use common::TransportAddress;
use std::net::IpAddr;

const ONVIF_MARKER: &[u8] = b"onvif";
const PREFIXED_XADDRS: &[u8] = b":XAddrs>";
const BARE_XADDRS: &[u8] = b"<XAddrs>";
const WILDCARD_PREFIX: &str = "http://0.0.0.0";

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Case-sensitive: `ONVIF` or `Onvif` alone does not qualify.
pub fn is_onvif(payload: &[u8]) -> bool {
    find(payload, ONVIF_MARKER).is_some()
}

/// Text content of the first `XAddrs` element, whatever its namespace prefix.
///
/// Returns the bytes after the first `:XAddrs>` or `<XAddrs>` up to the next `<`
/// (or the end of the payload). Empty when no such tag exists.
pub fn find_xaddrs(payload: &[u8]) -> &[u8] {
    let start = match (find(payload, PREFIXED_XADDRS), find(payload, BARE_XADDRS)) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => return &[],
    };
    // Both markers are eight bytes long and end with '>'.
    let content = &payload[start + PREFIXED_XADDRS.len()..];
    let end = content.iter().position(|&b| b == b'<').unwrap_or(content.len());
    &content[..end]
}

/// Replaces a leading `http://0.0.0.0` with `http://<sender>`; port and path are kept.
pub fn rewrite_wildcard(address: &str, sender: IpAddr) -> String {
    match address.strip_prefix(WILDCARD_PREFIX) {
        Some(rest) => format!("http://{}{}", sender, rest),
        None => address.to_string(),
    }
}

/// Applies the ONVIF gate, XAddrs extraction and wildcard rewrite to one datagram.
///
/// `XAddrs` text that is not valid UTF-8 discards the datagram, so a returned
/// address always carries the captured bytes unchanged.
pub fn transport_address(payload: &[u8], sender: IpAddr) -> Option<TransportAddress> {
    if !is_onvif(payload) {
        return None;
    }
    let xaddrs = find_xaddrs(payload);
    if xaddrs.is_empty() {
        return None;
    }
    let raw = std::str::from_utf8(xaddrs).ok()?;
    Some(TransportAddress::from(rewrite_wildcard(raw, sender)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> IpAddr {
        "192.0.2.20".parse().unwrap()
    }

    #[test]
    fn test_onvif_gate_is_case_sensitive() {
        assert!(is_onvif(b"<d:Types>dn:NetworkVideoTransmitter</d:Types> http://www.onvif.org/ver10"));
        assert!(!is_onvif(b"<Scopes>ONVIF://camera</Scopes>"));
        assert!(!is_onvif(b""));
    }

    #[test]
    fn test_xaddrs_with_any_prefix() {
        assert_eq!(find_xaddrs(b"<d:XAddrs>http://a/onvif</d:XAddrs>"), b"http://a/onvif");
        assert_eq!(find_xaddrs(b"<tds:XAddrs>http://b/</tds:XAddrs>"), b"http://b/");
        assert_eq!(find_xaddrs(b"<XAddrs>http://c/</XAddrs>"), b"http://c/");
    }

    #[test]
    fn test_xaddrs_first_occurrence_wins() {
        let payload = b"<XAddrs>http://first/</XAddrs><d:XAddrs>http://second/</d:XAddrs>";
        assert_eq!(find_xaddrs(payload), b"http://first/");

        let payload = b"<d:XAddrs>http://first/</d:XAddrs><XAddrs>http://second/</XAddrs>";
        assert_eq!(find_xaddrs(payload), b"http://first/");
    }

    #[test]
    fn test_xaddrs_keeps_whitespace_separated_urls() {
        let payload = b"<d:XAddrs>http://10.0.0.5/onvif/device_service http://[fe80::1]/onvif/device_service</d:XAddrs>";
        assert_eq!(
            find_xaddrs(payload),
            &b"http://10.0.0.5/onvif/device_service http://[fe80::1]/onvif/device_service"[..]
        );
    }

    #[test]
    fn test_xaddrs_missing_or_unterminated() {
        assert!(find_xaddrs(b"<d:Scopes>onvif://www.onvif.org</d:Scopes>").is_empty());
        assert!(find_xaddrs(b"<d:XAddrs></d:XAddrs>").is_empty());
        assert_eq!(find_xaddrs(b"<d:XAddrs>http://truncated/pa"), b"http://truncated/pa");
    }

    #[test]
    fn test_wildcard_rewrite_preserves_suffix() {
        assert_eq!(rewrite_wildcard("http://0.0.0.0:8080/svc", sender()), "http://192.0.2.20:8080/svc");
        assert_eq!(rewrite_wildcard("http://0.0.0.0/onvif/device_service", sender()), "http://192.0.2.20/onvif/device_service");
        assert_eq!(rewrite_wildcard("http://192.0.2.10/onvif", sender()), "http://192.0.2.10/onvif");
        assert_eq!(rewrite_wildcard("https://0.0.0.0/x", sender()), "https://0.0.0.0/x");
    }

    #[test]
    fn test_wildcard_rewrite_is_prefix_only() {
        for suffix in ["", ":80", "0:80/x", "/a b c", ".1/"] {
            let captured = format!("http://0.0.0.0{}", suffix);
            let rewritten = rewrite_wildcard(&captured, sender());
            assert!(rewritten.starts_with("http://192.0.2.20"));
            assert_eq!(&rewritten["http://192.0.2.20".len()..], &captured[14..]);
        }
    }

    #[test]
    fn test_transport_address_pipeline() {
        let payload = b"<d:Types>dn:NetworkVideoTransmitter</d:Types><d:Scopes>onvif://www.onvif.org/name/cam</d:Scopes><d:XAddrs>http://0.0.0.0:8080/svc</d:XAddrs>";
        assert_eq!(transport_address(payload, sender()).unwrap(), "http://192.0.2.20:8080/svc");

        let no_marker = b"<XAddrs>http://x/</XAddrs>";
        assert!(transport_address(no_marker, sender()).is_none());

        let no_xaddrs = b"<d:Scopes>onvif://www.onvif.org</d:Scopes>";
        assert!(transport_address(no_xaddrs, sender()).is_none());
    }

    #[test]
    fn test_non_utf8_xaddrs_discarded() {
        let payload = b"<d:Scopes>onvif://www.onvif.org</d:Scopes><d:XAddrs>http://0.0.0.0/\xff\xfe</d:XAddrs>";
        assert!(transport_address(payload, sender()).is_none());

        let payload = "<d:Scopes>onvif://x</d:Scopes><d:XAddrs>http://0.0.0.0/caméra</d:XAddrs>".as_bytes();
        assert_eq!(transport_address(payload, sender()).unwrap(), "http://192.0.2.20/caméra");
    }
}
