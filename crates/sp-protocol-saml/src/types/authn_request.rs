//! SAML AuthnRequest construction.
//!
//! Authentication request message sent to the identity provider at the
//! start of a login. Built per attempt, immutable, never persisted: the
//! redirect binding is stateless, so the request ID is not tracked
//! server-side and there is no request/response correlation beyond what
//! the IdP embeds.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sp_core::SpConfig;

use super::{NameIdFormat, SamlBinding};

/// SAML Authentication Request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthnRequest {
    /// Unique, unguessable identifier for this request.
    pub id: String,

    /// Timestamp when this request was issued.
    pub issue_instant: DateTime<Utc>,

    /// The IdP SSO URL this request is addressed to.
    pub destination: String,

    /// The URL where the response should be posted.
    pub acs_url: String,

    /// The entity ID of this service provider.
    pub issuer: String,

    /// Requested name ID format.
    pub name_id_format: NameIdFormat,
}

impl AuthnRequest {
    /// Builds a fresh authentication request from the SP configuration.
    #[must_use]
    pub fn new(config: &SpConfig) -> Self {
        Self {
            id: sp_crypto::generate_request_id(),
            issue_instant: Utc::now(),
            destination: config.idp_sso_url.clone(),
            acs_url: config.acs_url.clone(),
            issuer: config.sp_entity_id.clone(),
            name_id_format: NameIdFormat::Email,
        }
    }

    /// Serializes this request to its SAML 2.0 XML form.
    #[must_use]
    pub fn to_xml(&self) -> String {
        format!(
            r#"<samlp:AuthnRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol" xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion" ID="{id}" Version="2.0" IssueInstant="{instant}" Destination="{destination}" ProtocolBinding="{binding}" AssertionConsumerServiceURL="{acs}"><saml:Issuer>{issuer}</saml:Issuer><samlp:NameIDPolicy Format="{name_id_format}" AllowCreate="true"/></samlp:AuthnRequest>"#,
            id = xml_escape(&self.id),
            instant = self.issue_instant.to_rfc3339_opts(SecondsFormat::Secs, true),
            destination = xml_escape(&self.destination),
            binding = SamlBinding::HttpPost.uri(),
            acs = xml_escape(&self.acs_url),
            issuer = xml_escape(&self.issuer),
            name_id_format = self.name_id_format.uri(),
        )
    }
}

/// Escapes XML special characters in attribute and text content.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> SpConfig {
        SpConfig {
            sp_entity_id: "https://sp.example.com".to_string(),
            acs_url: "https://sp.example.com/saml/acs".to_string(),
            slo_url: "https://sp.example.com/saml/slo".to_string(),
            idp_entity_id: "https://idp.example.com".to_string(),
            idp_sso_url: "https://idp.example.com/sso".to_string(),
            idp_certificate_pem: "-----BEGIN CERTIFICATE-----\nabc\n-----END CERTIFICATE-----"
                .to_string(),
            session_duration: Duration::from_secs(3600),
            clock_skew: Duration::from_secs(300),
            replay_ttl: Duration::from_secs(3600),
            allowed_signature_algorithms: vec![sp_core::SignatureAlgorithmId::Rs256],
            allow_missing_time_bounds: false,
        }
    }

    #[test]
    fn fresh_requests_have_distinct_ids() {
        let config = test_config();
        let a = AuthnRequest::new(&config);
        let b = AuthnRequest::new(&config);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with('_'));
    }

    #[test]
    fn xml_contains_configured_endpoints() {
        let request = AuthnRequest::new(&test_config());
        let xml = request.to_xml();

        assert!(xml.contains(r#"Destination="https://idp.example.com/sso""#));
        assert!(xml.contains(r#"AssertionConsumerServiceURL="https://sp.example.com/saml/acs""#));
        assert!(xml.contains("<saml:Issuer>https://sp.example.com</saml:Issuer>"));
        assert!(xml.contains(&format!(r#"ID="{}""#, request.id)));
        assert!(xml.contains("emailAddress"));
        assert!(xml.contains(r#"Version="2.0""#));
    }

    #[test]
    fn request_round_trips_through_serde() {
        let request = AuthnRequest::new(&test_config());
        let json = serde_json::to_string(&request).unwrap();
        let back: AuthnRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, request.id);
        assert_eq!(back.name_id_format, NameIdFormat::Email);
    }

    #[test]
    fn xml_escapes_special_characters() {
        let mut config = test_config();
        config.sp_entity_id = r#"https://sp.example.com/?a="1"&b=<2>"#.to_string();
        let xml = AuthnRequest::new(&config).to_xml();
        assert!(xml.contains("&quot;1&quot;&amp;b=&lt;2&gt;"));
    }
}
