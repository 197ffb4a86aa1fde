//! Service provider metadata generation.
//!
//! Produces the SAML 2.0 metadata document an IdP administrator imports
//! to register this service provider.

use sp_core::SpConfig;

use crate::types::SamlBinding;

/// Generates the SP metadata XML from configuration.
#[must_use]
pub fn sp_metadata(config: &SpConfig) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<md:EntityDescriptor xmlns:md="urn:oasis:names:tc:SAML:2.0:metadata" entityID="{entity_id}">
    <md:SPSSODescriptor AuthnRequestsSigned="false" WantAssertionsSigned="true" protocolSupportEnumeration="urn:oasis:names:tc:SAML:2.0:protocol">
        <md:NameIDFormat>urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress</md:NameIDFormat>
        <md:AssertionConsumerService Binding="{post_binding}" Location="{acs_url}" index="0" isDefault="true"/>
        <md:SingleLogoutService Binding="{redirect_binding}" Location="{slo_url}"/>
    </md:SPSSODescriptor>
</md:EntityDescriptor>"#,
        entity_id = config.sp_entity_id,
        post_binding = SamlBinding::HttpPost.uri(),
        acs_url = config.acs_url,
        redirect_binding = SamlBinding::HttpRedirect.uri(),
        slo_url = config.slo_url,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::SignatureAlgorithmId;
    use std::time::Duration;

    fn test_config() -> SpConfig {
        SpConfig {
            sp_entity_id: "https://sp.example.com".to_string(),
            acs_url: "https://sp.example.com/saml/acs".to_string(),
            slo_url: "https://sp.example.com/saml/slo".to_string(),
            idp_entity_id: "https://idp.example.com".to_string(),
            idp_sso_url: "https://idp.example.com/sso".to_string(),
            idp_certificate_pem: "-----BEGIN CERTIFICATE-----\n-----END CERTIFICATE-----"
                .to_string(),
            session_duration: Duration::from_secs(3600),
            clock_skew: Duration::from_secs(300),
            replay_ttl: Duration::from_secs(3600),
            allowed_signature_algorithms: vec![SignatureAlgorithmId::Rs256],
            allow_missing_time_bounds: false,
        }
    }

    #[test]
    fn metadata_carries_entity_id_and_endpoints() {
        let metadata = sp_metadata(&test_config());
        assert!(metadata.contains(r#"entityID="https://sp.example.com""#));
        assert!(metadata.contains(r#"Location="https://sp.example.com/saml/acs""#));
        assert!(metadata.contains(r#"Location="https://sp.example.com/saml/slo""#));
    }

    #[test]
    fn acs_uses_post_binding_and_slo_uses_redirect() {
        let metadata = sp_metadata(&test_config());
        let acs_line = metadata
            .lines()
            .find(|l| l.contains("AssertionConsumerService"))
            .unwrap();
        assert!(acs_line.contains("HTTP-POST"));
        let slo_line = metadata
            .lines()
            .find(|l| l.contains("SingleLogoutService"))
            .unwrap();
        assert!(slo_line.contains("HTTP-Redirect"));
    }

    #[test]
    fn assertions_must_be_signed() {
        let metadata = sp_metadata(&test_config());
        assert!(metadata.contains(r#"WantAssertionsSigned="true""#));
    }
}
