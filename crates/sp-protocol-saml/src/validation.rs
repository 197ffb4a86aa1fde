//! Assertion validation policy.
//!
//! Runs the five trust checks (status, issuer, audience, time window,
//! signature) over a parsed [`AssertionRecord`] and accumulates every
//! failure, so a rejected response carries a complete diagnostic
//! instead of just the first failing check.

use chrono::{DateTime, Duration, Utc};
use sp_core::SpConfig;

use crate::error::SamlResult;
use crate::signature::XmlSignatureValidator;
use crate::types::{status_codes, AssertionRecord};

/// Outcome of running the validation policy over one assertion.
///
/// `valid` is true only when every check passed. `reasons` lists the
/// failed checks in reporting order and is empty iff `valid` is true.
#[derive(Debug, Clone)]
pub struct ValidationVerdict {
    /// Whether the assertion passed all checks.
    pub valid: bool,
    /// Failure reasons, in check order.
    pub reasons: Vec<String>,
}

impl ValidationVerdict {
    fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            valid: reasons.is_empty(),
            reasons,
        }
    }
}

/// The validation policy engine.
///
/// Holds the trust configuration and the signature validator. Checks
/// are independent of each other; their order only fixes how reasons
/// are reported.
pub struct ValidationPolicy {
    expected_issuer: String,
    expected_audience: String,
    clock_skew: Duration,
    allow_missing_time_bounds: bool,
    signature_validator: XmlSignatureValidator,
}

impl ValidationPolicy {
    /// Builds the policy from SP configuration.
    ///
    /// Fails if the configured IdP certificate or algorithm allow-list
    /// is unusable, so misconfiguration surfaces at startup.
    pub fn from_config(config: &SpConfig) -> SamlResult<Self> {
        let signature_validator = XmlSignatureValidator::from_pem(
            &config.idp_certificate_pem,
            config.allowed_signature_algorithms.clone(),
        )?;

        Ok(Self {
            expected_issuer: config.idp_entity_id.clone(),
            expected_audience: config.sp_entity_id.clone(),
            clock_skew: Duration::seconds(config.clock_skew.as_secs() as i64),
            allow_missing_time_bounds: config.allow_missing_time_bounds,
            signature_validator,
        })
    }

    /// Runs all checks against `record` at the given instant.
    ///
    /// `now` is injected rather than read from the system clock so the
    /// time-window check is testable. Every check runs; failures
    /// accumulate rather than short-circuiting.
    pub fn validate(&self, record: &AssertionRecord, now: DateTime<Utc>) -> ValidationVerdict {
        let mut reasons = Vec::new();

        if record.status_code != status_codes::SUCCESS {
            reasons.push("SAML status is not Success".to_string());
        }

        if record.issuer != self.expected_issuer {
            reasons.push("Invalid issuer".to_string());
        }

        // A missing audience restriction is a mismatch, not a pass.
        if record.audience.as_deref() != Some(self.expected_audience.as_str()) {
            reasons.push("Invalid audience".to_string());
        }

        self.check_time_window(record, now, &mut reasons);

        // The verified reference must point at the assertion the record
        // was built from; a valid signature over some other element
        // authorizes nothing.
        match self.signature_validator.validate(&record.raw_xml) {
            Ok(signature) => {
                let reference_id = signature
                    .reference_uri
                    .strip_prefix('#')
                    .unwrap_or(&signature.reference_uri);
                if reference_id != record.assertion_id {
                    reasons.push(
                        "Signature validation failed: signature does not cover the assertion"
                            .to_string(),
                    );
                }
            }
            Err(e) => reasons.push(format!("Signature validation failed: {e}")),
        }

        ValidationVerdict::from_reasons(reasons)
    }

    /// Checks `now` against `[not_before - skew, not_on_or_after + skew)`.
    ///
    /// Absent bounds fail unless explicitly permitted by configuration.
    fn check_time_window(
        &self,
        record: &AssertionRecord,
        now: DateTime<Utc>,
        reasons: &mut Vec<String>,
    ) {
        match record.not_before {
            Some(not_before) => {
                if now + self.clock_skew < not_before {
                    reasons.push("Assertion not yet valid".to_string());
                }
            }
            None => {
                if !self.allow_missing_time_bounds {
                    reasons.push("Assertion is missing NotBefore".to_string());
                }
            }
        }

        match record.not_on_or_after {
            Some(not_on_or_after) => {
                if now - self.clock_skew >= not_on_or_after {
                    reasons.push("Assertion has expired".to_string());
                }
            }
            None => {
                if !self.allow_missing_time_bounds {
                    reasons.push("Assertion is missing NotOnOrAfter".to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_response;
    use crate::signature::test_fixtures::{signed_response, TEST_CERT_PEM};
    use sp_core::SignatureAlgorithmId;
    use std::collections::HashMap;
    use std::time::Duration as StdDuration;

    fn test_config() -> SpConfig {
        SpConfig {
            sp_entity_id: "https://sp.example.com".to_string(),
            acs_url: "https://sp.example.com/saml/acs".to_string(),
            slo_url: "https://sp.example.com/saml/slo".to_string(),
            idp_entity_id: "https://idp.example.com".to_string(),
            idp_sso_url: "https://idp.example.com/sso".to_string(),
            idp_certificate_pem: TEST_CERT_PEM.to_string(),
            session_duration: StdDuration::from_secs(3600),
            clock_skew: StdDuration::from_secs(300),
            replay_ttl: StdDuration::from_secs(3600),
            allowed_signature_algorithms: vec![SignatureAlgorithmId::Rs256],
            allow_missing_time_bounds: false,
        }
    }

    fn signed_record() -> AssertionRecord {
        let xml = signed_response("_assert1", "user@example.com");
        parse_response(&xml).unwrap()
    }

    /// The instant inside the window signed into [`signed_response`].
    fn in_window() -> DateTime<Utc> {
        "2026-08-27T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn fully_valid_assertion_passes_with_zero_reasons() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        let verdict = policy.validate(&signed_record(), in_window());
        assert!(verdict.valid, "reasons: {:?}", verdict.reasons);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn wrong_status_is_reported() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        let mut record = signed_record();
        record.status_code = status_codes::RESPONDER.to_string();
        let verdict = policy.validate(&record, in_window());
        assert!(!verdict.valid);
        assert!(verdict
            .reasons
            .contains(&"SAML status is not Success".to_string()));
    }

    #[test]
    fn wrong_issuer_and_audience_both_reported() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        let mut record = signed_record();
        record.issuer = "https://evil.example.com".to_string();
        record.audience = Some("https://other-sp.example.com".to_string());
        let verdict = policy.validate(&record, in_window());
        assert!(!verdict.valid);
        assert_eq!(verdict.reasons[0], "Invalid issuer");
        assert_eq!(verdict.reasons[1], "Invalid audience");
    }

    #[test]
    fn missing_audience_fails() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        let mut record = signed_record();
        record.audience = None;
        let verdict = policy.validate(&record, in_window());
        assert!(verdict.reasons.contains(&"Invalid audience".to_string()));
    }

    #[test]
    fn expired_assertion_is_reported_even_with_skew() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        // NotOnOrAfter is 10:10; ten minutes later with five minutes of
        // skew is still past the window.
        let now: DateTime<Utc> = "2026-08-27T10:20:00Z".parse().unwrap();
        let verdict = policy.validate(&signed_record(), now);
        assert!(!verdict.valid);
        assert!(verdict
            .reasons
            .contains(&"Assertion has expired".to_string()));
    }

    #[test]
    fn not_yet_valid_assertion_is_reported() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        // NotBefore is 09:55; more than five minutes earlier fails.
        let now: DateTime<Utc> = "2026-08-27T09:40:00Z".parse().unwrap();
        let verdict = policy.validate(&signed_record(), now);
        assert!(!verdict.valid);
        assert!(verdict
            .reasons
            .contains(&"Assertion not yet valid".to_string()));
    }

    #[test]
    fn clock_skew_tolerates_small_drift() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        // Two minutes before NotBefore is inside the skew allowance.
        let now: DateTime<Utc> = "2026-08-27T09:53:00Z".parse().unwrap();
        let verdict = policy.validate(&signed_record(), now);
        assert!(verdict.valid, "reasons: {:?}", verdict.reasons);
    }

    #[test]
    fn missing_time_bounds_fail_closed_by_default() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        let mut record = signed_record();
        record.not_before = None;
        record.not_on_or_after = None;
        let verdict = policy.validate(&record, in_window());
        assert!(!verdict.valid);
        assert!(verdict
            .reasons
            .contains(&"Assertion is missing NotBefore".to_string()));
        assert!(verdict
            .reasons
            .contains(&"Assertion is missing NotOnOrAfter".to_string()));
    }

    #[test]
    fn missing_time_bounds_pass_when_explicitly_allowed() {
        let mut config = test_config();
        config.allow_missing_time_bounds = true;
        let policy = ValidationPolicy::from_config(&config).unwrap();
        let mut record = signed_record();
        record.not_before = None;
        record.not_on_or_after = None;
        let verdict = policy.validate(&record, in_window());
        assert!(verdict.valid, "reasons: {:?}", verdict.reasons);
    }

    #[test]
    fn tampered_document_reports_signature_failure_last() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        let xml = signed_response("_assert1", "user@example.com")
            .replace("user@example.com", "admin@example.com");
        let record = parse_response(&xml).unwrap();
        let verdict = policy.validate(&record, in_window());
        assert!(!verdict.valid);
        assert_eq!(verdict.reasons.len(), 1);
        assert!(verdict.reasons[0].starts_with("Signature validation failed"));
    }

    #[test]
    fn signature_must_cover_the_assertion_in_the_record() {
        // A record whose fields came from some element other than the
        // signed one carries an assertion ID the reference does not
        // point at; the verdict must fail even though the document's
        // signature itself is genuine.
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        let mut record = signed_record();
        record.assertion_id = "_evil".to_string();
        let verdict = policy.validate(&record, in_window());
        assert!(!verdict.valid);
        assert!(verdict
            .reasons
            .iter()
            .any(|r| r.starts_with("Signature validation failed")));
    }

    #[test]
    fn smuggled_unsigned_assertion_never_reaches_validation() {
        // Splicing an unsigned assertion (own NameID, fresh ID, open
        // time window) ahead of the genuinely signed one must fail at
        // parse time, so its fields can never populate a record.
        let genuine = signed_response("_assert1", "user@example.com");
        let forged = genuine.replace(
            "</samlp:Status>",
            r#"</samlp:Status><saml:Assertion ID="_evil" Version="2.0"><saml:Subject><saml:NameID>attacker@evil.example</saml:NameID></saml:Subject></saml:Assertion>"#,
        );
        assert!(parse_response(&forged).is_err());
    }

    #[test]
    fn all_failures_accumulate_in_check_order() {
        let policy = ValidationPolicy::from_config(&test_config()).unwrap();
        let mut record = signed_record();
        record.status_code = status_codes::REQUESTER.to_string();
        record.issuer = "https://evil.example.com".to_string();
        record.audience = None;
        record.raw_xml = record.raw_xml.replace("user@example.com", "x@example.com");
        let now: DateTime<Utc> = "2026-08-27T11:00:00Z".parse().unwrap();
        let verdict = policy.validate(&record, now);
        assert_eq!(
            verdict.reasons[..4],
            [
                "SAML status is not Success".to_string(),
                "Invalid issuer".to_string(),
                "Invalid audience".to_string(),
                "Assertion has expired".to_string(),
            ]
        );
        assert!(verdict.reasons[4].starts_with("Signature validation failed"));
    }

    #[test]
    fn attributes_survive_parsing_into_the_record() {
        // Sanity check that a signed document without attributes parses
        // to an empty map rather than failing.
        let record = signed_record();
        assert_eq!(record.attributes, HashMap::new());
    }
}
