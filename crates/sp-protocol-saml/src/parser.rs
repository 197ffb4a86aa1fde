//! SAML response parsing.
//!
//! Turns the raw (already base64-decoded) response document into an
//! [`AssertionRecord`]. The document is hostile input: unknown
//! namespaces, missing optional elements, and oversized attribute lists
//! must all be survived. Absent optional fields map to empty values;
//! absent *required* structure (no Assertion, no Signature, no
//! StatusCode) is a parse-level failure, so callers can tell "malformed
//! document" apart from "well-formed but untrusted".
//!
//! `quick-xml` performs no DTD processing and never resolves external
//! entities; documents carrying a DOCTYPE are rejected outright.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{SamlError, SamlResult};
use crate::types::AssertionRecord;

/// Maximum number of attributes accepted per response.
pub const MAX_ATTRIBUTES: usize = 64;

/// Maximum number of values accepted per attribute.
pub const MAX_ATTRIBUTE_VALUES: usize = 32;

/// Which element's text content is currently being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    Issuer,
    NameId,
    Audience,
    AttributeValue,
}

#[derive(Default)]
struct ParseState {
    status_code: Option<String>,
    assertion_id: Option<String>,
    saw_assertion: bool,
    saw_signature: bool,
    issuer: Option<String>,
    name_id: Option<String>,
    not_before_raw: Option<String>,
    not_on_or_after_raw: Option<String>,
    audience: Option<String>,
    saw_conditions: bool,
    /// Declared order preserved; folded into a map at the end.
    attributes: Vec<(String, Vec<String>)>,
    in_attribute: bool,
    target: Option<TextTarget>,
}

/// Parses a SAML response document into an [`AssertionRecord`].
///
/// First-match semantics apply throughout: the first `StatusCode`,
/// `Issuer`, `NameID`, `Conditions`, and `Audience` in document order
/// win. Attribute names are case-sensitive and repeated values keep
/// their declared order.
pub fn parse_response(xml: &str) -> SamlResult<AssertionRecord> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut state = ParseState::default();

    loop {
        match reader.read_event()? {
            Event::DocType(_) => {
                return Err(SamlError::InvalidResponse(
                    "document type declarations are not allowed".to_string(),
                ));
            }
            Event::Start(e) => state.handle_element(&e, false)?,
            // An Empty element has no matching End event, so no text
            // capture may start on it.
            Event::Empty(e) => state.handle_element(&e, true)?,
            Event::Text(t) => {
                if let Some(active) = state.target {
                    let text = t.unescape()?;
                    state.append_text(active, &text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"Issuer" | b"NameID" | b"Audience" | b"AttributeValue" => state.target = None,
                b"Attribute" => state.in_attribute = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    state.finish(xml)
}

impl ParseState {
    fn handle_element(&mut self, e: &BytesStart<'_>, empty: bool) -> SamlResult<()> {
        match e.local_name().as_ref() {
            b"StatusCode" => {
                if self.status_code.is_none() {
                    self.status_code = get_attribute(e, "Value")?;
                }
            }
            b"Assertion" => {
                // A second Assertion is the signature-wrapping shape:
                // an unsigned sibling smuggled in next to the signed
                // one. One assertion per response, or nothing.
                if self.saw_assertion {
                    return Err(SamlError::InvalidResponse(
                        "multiple Assertion elements".to_string(),
                    ));
                }
                self.saw_assertion = true;
                self.assertion_id = get_attribute(e, "ID")?;
            }
            b"Signature" => {
                self.saw_signature = true;
            }
            b"Issuer" => {
                if self.issuer.is_none() {
                    self.issuer = Some(String::new());
                    if !empty {
                        self.target = Some(TextTarget::Issuer);
                    }
                }
            }
            b"NameID" => {
                if self.name_id.is_none() {
                    self.name_id = Some(String::new());
                    if !empty {
                        self.target = Some(TextTarget::NameId);
                    }
                }
            }
            b"Conditions" => {
                if !self.saw_conditions {
                    self.saw_conditions = true;
                    self.not_before_raw = get_attribute(e, "NotBefore")?;
                    self.not_on_or_after_raw = get_attribute(e, "NotOnOrAfter")?;
                }
            }
            b"Audience" => {
                if self.audience.is_none() {
                    self.audience = Some(String::new());
                    if !empty {
                        self.target = Some(TextTarget::Audience);
                    }
                }
            }
            b"Attribute" => {
                if self.attributes.len() >= MAX_ATTRIBUTES {
                    return Err(SamlError::InvalidResponse(format!(
                        "more than {MAX_ATTRIBUTES} attributes"
                    )));
                }
                // Attributes without a Name cannot be addressed and are
                // dropped.
                if let Some(name) = get_attribute(e, "Name")? {
                    self.attributes.push((name, Vec::new()));
                    self.in_attribute = !empty;
                }
            }
            b"AttributeValue" => {
                if self.in_attribute {
                    let values = &mut self
                        .attributes
                        .last_mut()
                        .ok_or_else(|| SamlError::Internal("attribute stack empty".to_string()))?
                        .1;
                    if values.len() >= MAX_ATTRIBUTE_VALUES {
                        return Err(SamlError::InvalidResponse(format!(
                            "more than {MAX_ATTRIBUTE_VALUES} values for one attribute"
                        )));
                    }
                    values.push(String::new());
                    if !empty {
                        self.target = Some(TextTarget::AttributeValue);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn append_text(&mut self, active: TextTarget, text: &str) {
        let slot = match active {
            TextTarget::Issuer => self.issuer.as_mut(),
            TextTarget::NameId => self.name_id.as_mut(),
            TextTarget::Audience => self.audience.as_mut(),
            TextTarget::AttributeValue => self
                .attributes
                .last_mut()
                .and_then(|(_, values)| values.last_mut()),
        };
        if let Some(slot) = slot {
            slot.push_str(text);
        }
    }

    fn finish(self, xml: &str) -> SamlResult<AssertionRecord> {
        let status_code = self
            .status_code
            .ok_or_else(|| SamlError::MissingElement("StatusCode".to_string()))?;
        if !self.saw_assertion {
            return Err(SamlError::MissingElement("Assertion".to_string()));
        }
        let assertion_id = self
            .assertion_id
            .ok_or_else(|| SamlError::MissingElement("Assertion ID".to_string()))?;
        if !self.saw_signature {
            return Err(SamlError::MissingElement("Signature".to_string()));
        }

        let not_before = parse_instant(self.not_before_raw.as_deref(), "NotBefore")?;
        let not_on_or_after = parse_instant(self.not_on_or_after_raw.as_deref(), "NotOnOrAfter")?;

        let mut attribute_map: HashMap<String, Vec<String>> = HashMap::new();
        for (name, values) in self.attributes {
            attribute_map.entry(name).or_default().extend(values);
        }

        Ok(AssertionRecord {
            status_code,
            assertion_id,
            issuer: self.issuer.unwrap_or_default(),
            name_id: self.name_id.unwrap_or_default(),
            not_before,
            not_on_or_after,
            audience: self.audience,
            attributes: attribute_map,
            raw_xml: xml.to_string(),
        })
    }
}

fn get_attribute(element: &BytesStart<'_>, name: &str) -> SamlResult<Option<String>> {
    let attr = element
        .try_get_attribute(name)
        .map_err(|e| SamlError::XmlParse(e.to_string()))?;
    match attr {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .map_err(|e| SamlError::XmlParse(e.to_string()))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

/// Parses an RFC 3339 timestamp attribute. A declared but unparseable
/// timestamp is a parse-level failure, not a validation failure.
fn parse_instant(raw: Option<&str>, attr: &str) -> SamlResult<Option<DateTime<Utc>>> {
    match raw {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| SamlError::InvalidResponse(format!("invalid {attr} timestamp: {raw}"))),
    }
}
