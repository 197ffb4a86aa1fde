//! HTTP-Redirect binding.
//!
//! Outbound messages are DEFLATE-compressed (raw, no zlib header),
//! base64-encoded and URL-encoded into the `SAMLRequest` query
//! parameter of the IdP's SSO URL.

use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::error::{SamlError, SamlResult};

use super::DecodedMessage;

/// HTTP-Redirect binding encoder/decoder.
pub struct HttpRedirectBinding;

impl HttpRedirectBinding {
    /// Encodes an AuthnRequest into a redirect URL for the IdP.
    pub fn encode_request(
        xml: &str,
        destination: &str,
        relay_state: Option<&str>,
    ) -> SamlResult<String> {
        let compressed = deflate_compress(xml.as_bytes())?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&compressed);
        let url_encoded = urlencoding::encode(&encoded);

        let separator = if destination.contains('?') { '&' } else { '?' };
        let mut url = format!("{destination}{separator}SAMLRequest={url_encoded}");

        if let Some(rs) = relay_state {
            url.push_str(&format!("&RelayState={}", urlencoding::encode(rs)));
        }

        Ok(url)
    }

    /// Decodes a redirect-bound message from its query parameter value.
    ///
    /// The value may still carry URL encoding; web frameworks usually
    /// strip it, but decoding twice is harmless for base64 data.
    pub fn decode(encoded: &str, relay_state: Option<&str>) -> SamlResult<DecodedMessage> {
        let url_decoded = urlencoding::decode(encoded)
            .map_err(|e| SamlError::InvalidRequest(format!("URL decode error: {e}")))?;

        let b64_decoded = base64::engine::general_purpose::STANDARD
            .decode(url_decoded.as_ref())
            .map_err(|e| SamlError::Base64Decode(e.to_string()))?;

        let xml_bytes = deflate_decompress(&b64_decoded)?;

        let xml = String::from_utf8(xml_bytes)
            .map_err(|e| SamlError::InvalidRequest(format!("Invalid UTF-8 in message: {e}")))?;

        Ok(DecodedMessage {
            xml,
            relay_state: relay_state.map(String::from),
        })
    }
}

/// Compresses data using DEFLATE (raw, no zlib header).
fn deflate_compress(data: &[u8]) -> SamlResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| SamlError::Deflate(format!("Compression error: {e}")))?;
    encoder
        .finish()
        .map_err(|e| SamlError::Deflate(format!("Compression finish error: {e}")))
}

/// Decompresses raw DEFLATE data.
fn deflate_decompress(data: &[u8]) -> SamlResult<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| SamlError::Deflate(format!("Decompression error: {e}")))?;
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_and_decode_roundtrip() {
        let xml = r#"<samlp:AuthnRequest ID="_abc">request body</samlp:AuthnRequest>"#;
        let url =
            HttpRedirectBinding::encode_request(xml, "https://idp.example.com/sso", Some("/next"))
                .unwrap();

        assert!(url.starts_with("https://idp.example.com/sso?SAMLRequest="));
        assert!(url.contains("&RelayState=%2Fnext"));

        let param_start = url.find("SAMLRequest=").unwrap() + "SAMLRequest=".len();
        let param_end = url[param_start..]
            .find('&')
            .map_or(url.len(), |i| param_start + i);
        let decoded =
            HttpRedirectBinding::decode(&url[param_start..param_end], Some("/next")).unwrap();

        assert_eq!(decoded.xml, xml);
        assert_eq!(decoded.relay_state.as_deref(), Some("/next"));
    }

    #[test]
    fn destination_with_existing_query_uses_ampersand() {
        let url = HttpRedirectBinding::encode_request(
            "<Test/>",
            "https://idp.example.com/sso?tenant=a",
            None,
        )
        .unwrap();
        assert!(url.contains("?tenant=a&SAMLRequest="));
    }

    #[test]
    fn relay_state_is_omitted_when_absent() {
        let url = HttpRedirectBinding::encode_request("<Test/>", "https://idp.example.com/sso", None)
            .unwrap();
        assert!(!url.contains("RelayState"));
    }

    #[test]
    fn garbage_input_is_rejected() {
        assert!(HttpRedirectBinding::decode("%%%not-base64%%%", None).is_err());
    }

    #[test]
    fn deflate_roundtrip() {
        let original = b"assertion payload for compression";
        let compressed = deflate_compress(original).unwrap();
        let decompressed = deflate_decompress(&compressed).unwrap();
        assert_eq!(decompressed, original);
    }
}
