use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::http::header::AsHeaderName;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use woothee::parser::Parser;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Subject of a validated access token, stored in request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer access token and records its subject.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let user_id = state
        .authenticator
        .validate_access::<UserId>(token)
        .map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
        })?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let value = header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    parse_bearer(value).ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response()
    })
}

/// Exactly `Bearer <token>`: one space, non-empty token without whitespace.
fn parse_bearer(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ")?;
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// The calling device as seen from the request headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub ip_address: String,
    pub user_agent: String,
    pub device_type: String,
    pub browser: String,
    pub browser_version: String,
    pub os: String,
    pub language: String,
}

impl DeviceInfo {
    /// Read `User-Agent`, `Accept-Language` and the client address.
    ///
    /// Fields the parser cannot identify are left empty; `device_type` is
    /// `mobile` for phones and `desktop` for everything else.
    pub fn describe(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let user_agent = header_text(headers, http::header::USER_AGENT)
            .unwrap_or_default()
            .to_string();
        let language = header_text(headers, http::header::ACCEPT_LANGUAGE)
            .unwrap_or_default()
            .to_string();

        let mut info = Self {
            ip_address: client_ip(headers, peer),
            user_agent: String::new(),
            device_type: "desktop".to_string(),
            browser: String::new(),
            browser_version: String::new(),
            os: String::new(),
            language,
        };

        if let Some(parsed) = Parser::new().parse(&user_agent) {
            if matches!(&*parsed.category, "smartphone" | "mobilephone") {
                info.device_type = "mobile".to_string();
            }
            info.browser = known(&parsed.name);
            info.browser_version = known(&parsed.version);
            info.os = known(&parsed.os);
        }

        info.user_agent = user_agent;
        info
    }
}

fn known(value: &str) -> String {
    if value == "UNKNOWN" {
        String::new()
    } else {
        value.to_string()
    }
}

fn header_text<K: AsHeaderName>(headers: &HeaderMap, name: K) -> Option<&str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// First `X-Forwarded-For` hop, then `X-Real-IP`, then the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    header_text(headers, "x-forwarded-for")
        .and_then(|chain| chain.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .or_else(|| header_text(headers, "x-real-ip"))
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_default()
}

/// Middleware that records the caller's [`DeviceInfo`] in request extensions.
pub async fn capture_device_info(mut req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let info = DeviceInfo::describe(req.headers(), peer);
    tracing::debug!(ip_address = %info.ip_address, device_type = %info.device_type, "Device info captured");

    req.extensions_mut().insert(info);
    next.run(req).await
}
