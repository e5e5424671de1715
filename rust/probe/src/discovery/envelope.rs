use common::MessageId;

pub const SOAP_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";
pub const WS_ADDRESSING_NS: &str = "http://schemas.xmlsoap.org/ws/2004/08/addressing";
pub const WS_DISCOVERY_NS: &str = "http://schemas.xmlsoap.org/ws/2005/04/discovery";
pub const PROBE_ACTION: &str = "http://schemas.xmlsoap.org/ws/2005/04/discovery/Probe";
pub const DISCOVERY_TARGET: &str = "urn:schemas-xmlsoap-org:ws:2005:04/discovery";

/// SOAP 1.2 WS-Discovery Probe with empty `Types` and `Scopes`, matching every device.
#[derive(Debug, Clone)]
pub struct ProbeEnvelope {
    message_id: MessageId,
    payload: Vec<u8>,
}

impl ProbeEnvelope {
    pub fn build(message_id: MessageId) -> Self {
        let payload = format!(
            r#"<?xml version="1.0" ?>
<s:Envelope xmlns:s="{envelope}">
	<s:Header xmlns:a="{addressing}">
		<a:Action>{action}</a:Action>
		<a:MessageID>{urn}</a:MessageID>
		<a:To>{to}</a:To>
	</s:Header>
	<s:Body>
		<d:Probe xmlns:d="{discovery}">
			<d:Types />
			<d:Scopes />
		</d:Probe>
	</s:Body>
</s:Envelope>"#,
            envelope = SOAP_ENVELOPE_NS,
            addressing = WS_ADDRESSING_NS,
            action = PROBE_ACTION,
            urn = message_id.urn(),
            to = DISCOVERY_TARGET,
            discovery = WS_DISCOVERY_NS,
        )
        .into_bytes();

        Self { message_id, payload }
    }

    pub fn message_id(&self) -> &MessageId {
        &self.message_id
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_header_fields() {
        let id: MessageId = "44302cbf-0d18-4feb-79b3-33b575263da3".parse().unwrap();
        let envelope = ProbeEnvelope::build(id.clone());
        let text = std::str::from_utf8(envelope.as_bytes()).unwrap();

        assert!(text.contains(
            "<a:Action>http://schemas.xmlsoap.org/ws/2005/04/discovery/Probe</a:Action>"
        ));
        assert!(text.contains(
            "<a:MessageID>urn:uuid:44302cbf-0d18-4feb-79b3-33b575263da3</a:MessageID>"
        ));
        assert!(text.contains("<a:To>urn:schemas-xmlsoap-org:ws:2005:04/discovery</a:To>"));
        assert_eq!(envelope.message_id(), &id);
    }

    #[test]
    fn test_single_probe_without_filters() {
        let id = MessageId::from_random_bytes([7; 16]);
        let envelope = ProbeEnvelope::build(id);
        let text = std::str::from_utf8(envelope.as_bytes()).unwrap();

        assert_eq!(count(text, "<a:Action>"), 1);
        assert_eq!(count(text, "<a:MessageID>"), 1);
        assert_eq!(count(text, "<a:To>"), 1);
        assert_eq!(count(text, "<d:Probe "), 1);
        assert!(text.contains("<d:Types />"));
        assert!(text.contains("<d:Scopes />"));
        assert!(text.contains(r#"xmlns:d="http://schemas.xmlsoap.org/ws/2005/04/discovery""#));
        assert!(text.contains(r#"xmlns:s="http://www.w3.org/2003/05/soap-envelope""#));
    }
}
