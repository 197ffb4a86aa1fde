//! HTTP request handlers.
//!
//! The ACS handler is the trust boundary: decode, parse, validate,
//! replay-check, and only then issue a session. Every rejection path
//! is logged with enough detail to audit without echoing the raw
//! assertion back to the client.

use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sp_cache::AtomicCacheProvider;
use sp_protocol_saml::bindings::HttpPostBinding;
use sp_protocol_saml::bindings::HttpRedirectBinding;
use sp_protocol_saml::metadata::sp_metadata;
use sp_protocol_saml::parser::parse_response;
use sp_protocol_saml::{AuthnRequest, ReplayCheck, SamlError};
use tracing::{info, warn};

use crate::cookies::SessionCookie;
use crate::state::AppState;

/// Error response emitted by the handlers.
///
/// Carries the HTTP status derived from the error class (malformed
/// input 400, validation/replay 401, infrastructure 500) and the
/// accumulated reasons for validation failures.
pub struct ApiError {
    status: StatusCode,
    message: String,
    reasons: Vec<String>,
}

impl ApiError {
    fn unauthenticated() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "authentication required".to_string(),
            reasons: Vec::new(),
        }
    }
}

impl From<SamlError> for ApiError {
    fn from(err: SamlError) -> Self {
        let status = StatusCode::from_u16(err.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let reasons = match &err {
            SamlError::ValidationFailed { reasons } => reasons.clone(),
            _ => Vec::new(),
        };
        Self {
            status,
            message: err.to_string(),
            reasons,
        }
    }
}

impl From<sp_session::SessionError> for ApiError {
    fn from(err: sp_session::SessionError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
            reasons: Vec::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.message });
        if !self.reasons.is_empty() {
            body["reasons"] = json!(self.reasons);
        }
        (self.status, Json(body)).into_response()
    }
}

/// Query parameters for the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginParams {
    /// Where to send the user after a successful login.
    pub next: Option<String>,
}

/// Form body of the IdP's POST to the assertion consumer service.
#[derive(Debug, Deserialize)]
pub struct AcsForm {
    /// Base64-encoded response document.
    #[serde(rename = "SAMLResponse")]
    pub saml_response: String,
    /// Opaque state echoed back by the IdP.
    #[serde(rename = "RelayState")]
    pub relay_state: Option<String>,
}

/// Response body for `/api/session`.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    /// Whether the request carried a live session.
    pub authenticated: bool,
    /// The session's user, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// The session's attribute bag, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<std::collections::HashMap<String, Vec<String>>>,
}

/// GET /saml/login — redirect the browser to the IdP with an
/// AuthnRequest in the query string.
pub async fn saml_login<C: AtomicCacheProvider>(
    State(state): State<AppState<C>>,
    Query(params): Query<LoginParams>,
) -> Result<Response, ApiError> {
    let request = AuthnRequest::new(&state.config.sp);
    let xml = request.to_xml();

    let url = HttpRedirectBinding::encode_request(
        &xml,
        &state.config.sp.idp_sso_url,
        params.next.as_deref(),
    )?;

    info!(request_id = %request.id, "redirecting to IdP for authentication");
    Ok(redirect(&url))
}

/// POST /saml/acs — consume the IdP's response and issue a session.
pub async fn saml_acs<C: AtomicCacheProvider>(
    State(state): State<AppState<C>>,
    Form(form): Form<AcsForm>,
) -> Result<Response, ApiError> {
    let message = HttpPostBinding::decode(&form.saml_response, form.relay_state.as_deref())?;
    let record = parse_response(&message.xml)?;

    let verdict = state.policy.validate(&record, Utc::now());
    if !verdict.valid {
        warn!(
            assertion_id = %record.assertion_id,
            issuer = %record.issuer,
            reasons = ?verdict.reasons,
            "assertion rejected by validation policy"
        );
        return Err(SamlError::ValidationFailed {
            reasons: verdict.reasons,
        }
        .into());
    }

    match state.replay.check_and_mark(&record.assertion_id).await? {
        ReplayCheck::Accepted => {}
        ReplayCheck::AlreadyConsumed => {
            warn!(assertion_id = %record.assertion_id, "assertion replay detected");
            return Err(SamlError::ReplayDetected(record.assertion_id).into());
        }
    }

    let session_id = state
        .sessions
        .create(&record.name_id, record.attributes)
        .await?;

    info!(user = %record.name_id, "session issued");

    // RelayState is attacker-influenced; only local paths are followed.
    let target = message
        .relay_state
        .filter(|rs| rs.starts_with('/') && !rs.starts_with("//"))
        .unwrap_or_else(|| "/".to_string());

    let cookie = SessionCookie::issue(
        &session_id,
        state.config.sp.session_duration,
        state.config.cookie_secure,
    );
    Ok((
        StatusCode::FOUND,
        [(LOCATION, target), (SET_COOKIE, cookie)],
    )
        .into_response())
}

/// GET /saml/slo — destroy the session and clear the cookie.
pub async fn saml_slo<C: AtomicCacheProvider>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if let Some(session_id) = SessionCookie::from_headers(&headers) {
        state.sessions.destroy(&session_id).await?;
        info!("session destroyed via logout");
    }

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, "/".to_string()),
            (SET_COOKIE, SessionCookie::clear(state.config.cookie_secure)),
        ],
    )
        .into_response())
}

/// GET /saml/metadata — the SP metadata document.
pub async fn saml_metadata<C: AtomicCacheProvider>(
    State(state): State<AppState<C>>,
) -> Response {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/samlmetadata+xml"),
            (CACHE_CONTROL, "public, max-age=86400"),
        ],
        sp_metadata(&state.config.sp),
    )
        .into_response()
}

/// GET /api/session — report the current session, if any.
pub async fn session_info<C: AtomicCacheProvider>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> Result<Json<SessionInfo>, ApiError> {
    let record = match SessionCookie::from_headers(&headers) {
        Some(session_id) => state.sessions.read(&session_id).await?,
        None => None,
    };

    Ok(Json(match record {
        Some(record) => SessionInfo {
            authenticated: true,
            user: Some(record.user),
            attributes: Some(record.attributes),
        },
        None => SessionInfo {
            authenticated: false,
            user: None,
            attributes: None,
        },
    }))
}

/// GET /api/protected — requires a live session.
pub async fn protected<C: AtomicCacheProvider>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session_id = SessionCookie::from_headers(&headers).ok_or_else(ApiError::unauthenticated)?;
    let record = state
        .sessions
        .read(&session_id)
        .await?
        .ok_or_else(ApiError::unauthenticated)?;

    Ok(Json(json!({
        "message": format!("Hello, {}", record.user),
        "user": record.user,
    })))
}

/// GET / — landing page with a login link.
pub async fn home() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><title>Service Provider</title></head>
<body>
    <h1>Service Provider</h1>
    <p><a href="/saml/login">Log in with SAML</a></p>
</body>
</html>"#,
    )
}

/// Builds a 302 redirect response.
fn redirect(url: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, url.to_string())]).into_response()
}
