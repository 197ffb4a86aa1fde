//! SAML 2.0 constants and URIs.
//!
//! Namespace URIs, binding URIs, name ID formats, status codes, and
//! XML-DSig algorithm URIs as defined by the SAML 2.0 specification.

use serde::{Deserialize, Serialize};

/// SAML 2.0 assertion namespace URI.
pub const SAML_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// SAML 2.0 protocol namespace URI.
pub const SAMLP_NS: &str = "urn:oasis:names:tc:SAML:2.0:protocol";

/// SAML 2.0 metadata namespace URI.
pub const SAML_MD_NS: &str = "urn:oasis:names:tc:SAML:2.0:metadata";

/// XML Digital Signature namespace URI.
pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// SAML binding types supported by this service provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamlBinding {
    /// HTTP POST binding (inbound responses).
    HttpPost,
    /// HTTP Redirect binding (outbound requests).
    HttpRedirect,
}

impl SamlBinding {
    /// Returns the URI for this binding.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::HttpPost => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST",
            Self::HttpRedirect => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect",
        }
    }

    /// Parses a binding from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" => Some(Self::HttpPost),
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect" => Some(Self::HttpRedirect),
            _ => None,
        }
    }
}

/// SAML Name ID formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NameIdFormat {
    /// Unspecified name ID format.
    #[default]
    Unspecified,
    /// Email address format.
    Email,
    /// Persistent identifier format.
    Persistent,
    /// Transient identifier format.
    Transient,
}

impl NameIdFormat {
    /// Returns the URI for this name ID format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Unspecified => "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified",
            Self::Email => "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress",
            Self::Persistent => "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent",
            Self::Transient => "urn:oasis:names:tc:SAML:2.0:nameid-format:transient",
        }
    }

    /// Parses a name ID format from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified" => Some(Self::Unspecified),
            "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress" => Some(Self::Email),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent" => Some(Self::Persistent),
            "urn:oasis:names:tc:SAML:2.0:nameid-format:transient" => Some(Self::Transient),
            _ => None,
        }
    }
}

/// Top-level SAML status codes.
pub mod status_codes {
    /// Success status code.
    pub const SUCCESS: &str = "urn:oasis:names:tc:SAML:2.0:status:Success";

    /// Requester error status code.
    pub const REQUESTER: &str = "urn:oasis:names:tc:SAML:2.0:status:Requester";

    /// Responder error status code.
    pub const RESPONDER: &str = "urn:oasis:names:tc:SAML:2.0:status:Responder";
}

/// XML signature algorithms.
pub mod signature_algorithms {
    /// RSA-SHA256 signature algorithm.
    pub const RSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256";

    /// RSA-SHA384 signature algorithm.
    pub const RSA_SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha384";

    /// RSA-SHA512 signature algorithm.
    pub const RSA_SHA512: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha512";

    /// Legacy RSA-SHA1 signature algorithm (always rejected).
    pub const RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
}

/// Digest algorithms.
pub mod digest_algorithms {
    /// SHA-256 digest algorithm.
    pub const SHA256: &str = "http://www.w3.org/2001/04/xmlenc#sha256";

    /// SHA-384 digest algorithm.
    pub const SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#sha384";

    /// SHA-512 digest algorithm.
    pub const SHA512: &str = "http://www.w3.org/2001/04/xmlenc#sha512";
}

/// Canonicalization algorithms.
pub mod canonicalization_algorithms {
    /// Exclusive C14N without comments.
    pub const EXCLUSIVE_C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";

    /// C14N without comments.
    pub const C14N: &str = "http://www.w3.org/TR/2001/REC-xml-c14n-20010315";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_uri_roundtrip() {
        for binding in [SamlBinding::HttpPost, SamlBinding::HttpRedirect] {
            assert_eq!(SamlBinding::from_uri(binding.uri()), Some(binding));
        }
        assert_eq!(SamlBinding::from_uri("urn:oasis:names:tc:SAML:2.0:bindings:SOAP"), None);
    }

    #[test]
    fn name_id_format_uri_roundtrip() {
        for format in [
            NameIdFormat::Unspecified,
            NameIdFormat::Email,
            NameIdFormat::Persistent,
            NameIdFormat::Transient,
        ] {
            assert_eq!(NameIdFormat::from_uri(format.uri()), Some(format));
        }
    }
}
