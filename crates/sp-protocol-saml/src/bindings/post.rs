//! HTTP-POST binding.
//!
//! Inbound responses arrive base64-encoded in the `SAMLResponse` form
//! field of a POST to the assertion consumer service.

use base64::Engine;

use crate::error::{SamlError, SamlResult};

use super::DecodedMessage;

/// HTTP-POST binding encoder/decoder.
pub struct HttpPostBinding;

impl HttpPostBinding {
    /// Decodes a POST-bound response from its form field value.
    pub fn decode(saml_response: &str, relay_state: Option<&str>) -> SamlResult<DecodedMessage> {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(saml_response)
            .map_err(|e| SamlError::Base64Decode(e.to_string()))?;

        let xml = String::from_utf8(decoded)
            .map_err(|e| SamlError::InvalidResponse(format!("Invalid UTF-8 in message: {e}")))?;

        Ok(DecodedMessage {
            xml,
            relay_state: relay_state.map(String::from),
        })
    }

    /// Encodes a response for the POST binding.
    ///
    /// The service provider never sends responses in production; this
    /// exists so tests can play the IdP side of the exchange.
    #[must_use]
    pub fn encode(xml: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_and_decode_roundtrip() {
        let xml = r#"<samlp:Response ID="_r1">payload</samlp:Response>"#;
        let encoded = HttpPostBinding::encode(xml);
        let decoded = HttpPostBinding::decode(&encoded, Some("state")).unwrap();
        assert_eq!(decoded.xml, xml);
        assert_eq!(decoded.relay_state.as_deref(), Some("state"));
    }

    #[test]
    fn invalid_base64_is_rejected() {
        let err = HttpPostBinding::decode("not base64!!", None).unwrap_err();
        assert!(matches!(err, SamlError::Base64Decode(_)));
    }

    #[test]
    fn non_utf8_payload_is_rejected() {
        let encoded = base64::engine::general_purpose::STANDARD.encode([0xff, 0xfe, 0x00]);
        assert!(HttpPostBinding::decode(&encoded, None).is_err());
    }
}
