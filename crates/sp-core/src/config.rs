//! Service provider configuration.
//!
//! Configuration is loaded from environment variables once at startup.
//! Missing or inconsistent trust configuration is a fatal startup error,
//! never a recoverable condition.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Signature algorithms the service provider may accept.
///
/// Anything outside this set (including "none" and SHA-1 variants) is
/// rejected during signature verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureAlgorithmId {
    /// RSA PKCS#1 v1.5 with SHA-256.
    Rs256,
    /// RSA PKCS#1 v1.5 with SHA-384.
    Rs384,
    /// RSA PKCS#1 v1.5 with SHA-512.
    Rs512,
}

impl SignatureAlgorithmId {
    /// Parses an algorithm from its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "RS256" => Some(Self::Rs256),
            "RS384" => Some(Self::Rs384),
            "RS512" => Some(Self::Rs512),
            _ => None,
        }
    }

    /// Returns the configuration name of this algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rs256 => "RS256",
            Self::Rs384 => "RS384",
            Self::Rs512 => "RS512",
        }
    }
}

/// Immutable service provider configuration.
///
/// Holds the SP's own identity, the single trusted IdP, and the policy
/// knobs for validation and session lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpConfig {
    /// Entity ID of this service provider.
    pub sp_entity_id: String,

    /// Assertion Consumer Service URL (where the IdP posts responses).
    pub acs_url: String,

    /// Single Logout URL of this service provider.
    pub slo_url: String,

    /// Entity ID of the trusted identity provider.
    pub idp_entity_id: String,

    /// SSO URL of the identity provider (AuthnRequest destination).
    pub idp_sso_url: String,

    /// PEM-encoded X.509 certificate of the identity provider.
    pub idp_certificate_pem: String,

    /// Session lifetime.
    pub session_duration: Duration,

    /// Allowed clock skew for assertion time-window checks.
    pub clock_skew: Duration,

    /// TTL for replay markers. Must exceed the maximum assertion
    /// lifetime plus clock skew, so an assertion can never outlive
    /// its marker.
    pub replay_ttl: Duration,

    /// Signature algorithms accepted from the IdP.
    pub allowed_signature_algorithms: Vec<SignatureAlgorithmId>,

    /// Whether assertions without NotBefore/NotOnOrAfter bounds are
    /// accepted. Defaults to false: missing bounds fail validation.
    pub allow_missing_time_bounds: bool,
}

impl SpConfig {
    /// Loads configuration from environment variables.
    ///
    /// Reads a `.env` file if one is present. Trust-relevant variables
    /// (`SAML_SP_ENTITY_ID`, `SAML_SP_ACS_URL`, `SAML_IDP_ENTITY_ID`,
    /// `SAML_IDP_SSO_URL`, `SAML_IDP_CERTIFICATE`) are required.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let sp_entity_id = required("SAML_SP_ENTITY_ID")?;
        let acs_url = required("SAML_SP_ACS_URL")?;
        let slo_url = std::env::var("SAML_SP_SLO_URL")
            .unwrap_or_else(|_| format!("{}/saml/slo", sp_entity_id.trim_end_matches('/')));
        let idp_entity_id = required("SAML_IDP_ENTITY_ID")?;
        let idp_sso_url = required("SAML_IDP_SSO_URL")?;
        let idp_certificate_pem = required("SAML_IDP_CERTIFICATE")?;

        let session_duration = duration_var("SESSION_DURATION", 3600);
        let clock_skew = duration_var("SAML_CLOCK_SKEW", 300);
        let replay_ttl = duration_var("SAML_REPLAY_TTL", 3600);

        let allowed_signature_algorithms = match std::env::var("SAML_SIGNATURE_ALGORITHMS") {
            Ok(list) => {
                let mut algs = Vec::new();
                for name in list.split(',') {
                    let alg = SignatureAlgorithmId::from_name(name).ok_or_else(|| {
                        anyhow::anyhow!("unsupported signature algorithm: {name}")
                    })?;
                    algs.push(alg);
                }
                algs
            }
            Err(_) => vec![SignatureAlgorithmId::Rs256],
        };

        let allow_missing_time_bounds = std::env::var("SAML_ALLOW_MISSING_TIME_BOUNDS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let config = Self {
            sp_entity_id,
            acs_url,
            slo_url,
            idp_entity_id,
            idp_sso_url,
            idp_certificate_pem,
            session_duration,
            clock_skew,
            replay_ttl,
            allowed_signature_algorithms,
            allow_missing_time_bounds,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates internal consistency of the configuration.
    ///
    /// Called by [`SpConfig::from_env`]; callers constructing a config
    /// directly (tests, embedders) should call it themselves.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.idp_certificate_pem.contains("BEGIN CERTIFICATE") {
            anyhow::bail!("SAML_IDP_CERTIFICATE is not a PEM-encoded certificate");
        }
        if self.allowed_signature_algorithms.is_empty() {
            anyhow::bail!("at least one signature algorithm must be allowed");
        }
        // A replay marker expiring before the assertion it guards would
        // reopen the replay window.
        let min_replay_ttl = self.clock_skew + Duration::from_secs(600);
        if self.replay_ttl < min_replay_ttl {
            anyhow::bail!(
                "SAML_REPLAY_TTL ({}s) must be at least clock skew + 600s ({}s)",
                self.replay_ttl.as_secs(),
                min_replay_ttl.as_secs()
            );
        }
        Ok(())
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    let value =
        std::env::var(name).map_err(|_| anyhow::anyhow!("{name} environment variable is required"))?;
    if value.trim().is_empty() {
        anyhow::bail!("{name} environment variable must not be empty");
    }
    Ok(value)
}

fn duration_var(name: &str, default_secs: u64) -> Duration {
    let secs = std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}
