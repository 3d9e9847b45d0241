//! # Service Types
//!
//! One interaction-protocol declaration nested in a card. A service is a
//! tagged variant over its `type` discriminator string; the core never
//! interprets `protocolSpecific`, it only dispatches it to the matching
//! extension validator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved discriminator for Agent-to-Agent protocol services.
pub const PROTOCOL_A2A: &str = "a2a";
/// Reserved discriminator for Model Context Protocol services.
pub const PROTOCOL_MCP: &str = "mcp";

/// A physical access point for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// The full URL to the endpoint.
    pub url: String,
    /// Optional transport identifier (e.g., `"http"`, `"grpc"`, `"ws"`),
    /// so clients can pick an endpoint without probing them all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
}

/// An interaction service declared by a card.
///
/// Services are embedded in, and owned exclusively by, one card; they have
/// no independent identity or lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// The protocol discriminator (`"a2a"`, `"mcp"`, or an open custom
    /// string). Selects which extension schema applies to
    /// `protocolSpecific`.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Human-readable name for this service endpoint.
    pub name: String,
    /// Endpoints where this service can be reached, possibly over several
    /// transports.
    pub endpoints: Vec<Endpoint>,
    /// The authentication mechanism. Protocol-defined, opaque to the core.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Value>,
    /// Protocol-specific metadata. Shape determined entirely by
    /// `service_type`; the core stores and forwards it unvalidated.
    #[serde(rename = "protocolSpecific")]
    pub protocol_specific: Value,
}

impl Service {
    /// True if the discriminator names a built-in protocol extension.
    pub fn is_reserved_type(&self) -> bool {
        self.service_type == PROTOCOL_A2A || self.service_type == PROTOCOL_MCP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_types() {
        let mut svc = Service {
            service_type: "a2a".into(),
            name: "Travel Agent A2A Endpoint".into(),
            endpoints: vec![Endpoint { url: "https://api.example.com/a2a".into(), transport: None }],
            authentication: None,
            protocol_specific: serde_json::json!({}),
        };
        assert!(svc.is_reserved_type());
        svc.service_type = "mcp".into();
        assert!(svc.is_reserved_type());
        svc.service_type = "foo".into();
        assert!(!svc.is_reserved_type());
    }

    #[test]
    fn test_service_serde_discriminator_key() {
        let svc = Service {
            service_type: "mcp".into(),
            name: "Tools".into(),
            endpoints: vec![Endpoint {
                url: "https://api.example.com/mcp".into(),
                transport: Some("streamable-http".into()),
            }],
            authentication: Some(serde_json::json!({"scheme": "bearer"})),
            protocol_specific: serde_json::json!({"protocolVersion": "2025-03-26"}),
        };
        let json = serde_json::to_value(&svc).unwrap();
        assert_eq!(json["type"], "mcp");
        assert_eq!(json["endpoints"][0]["transport"], "streamable-http");
        assert_eq!(json["protocolSpecific"]["protocolVersion"], "2025-03-26");
    }

    #[test]
    fn test_protocol_specific_is_opaque() {
        // Arbitrary nested structure survives a round trip untouched.
        let payload = serde_json::json!({
            "anything": [1, 2, {"nested": true}],
            "atAll": null
        });
        let svc: Service = serde_json::from_value(serde_json::json!({
            "type": "foo",
            "name": "Custom",
            "endpoints": [{"url": "https://example.com"}],
            "protocolSpecific": payload.clone()
        }))
        .unwrap();
        assert_eq!(svc.protocol_specific, payload);
    }
}
