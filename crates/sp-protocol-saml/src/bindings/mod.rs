//! SAML 2.0 message bindings.
//!
//! The service provider sends AuthnRequests over the HTTP-Redirect
//! binding (DEFLATE, base64, URL-encode into query parameters) and
//! consumes responses over the HTTP-POST binding (base64 form field).

mod post;
mod redirect;

pub use post::HttpPostBinding;
pub use redirect::HttpRedirectBinding;

/// A message decoded from either binding.
#[derive(Debug, Clone)]
pub struct DecodedMessage {
    /// The decoded XML document.
    pub xml: String,
    /// The RelayState parameter, if the sender supplied one.
    pub relay_state: Option<String>,
}
