use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;
use tracing::debug;

use super::ApiState;
use super::auth::remove_session_cookie;
use crate::auth::authenticator::{AuthMode, Principal};
use crate::auth::error::AuthError;
use crate::prelude::*;

pub const AUTH_TOKEN_COOKIE: &str = "admin_session";
pub const API_KEY_HEADER: &str = "x-api-key";

/// Marker attached to requests that passed the gate.
#[derive(Clone, Debug)]
pub struct Ctx {
    pub principal: Principal,
}

impl Ctx {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }
}

/// Resolves the request's credential into a `Result<Ctx, AuthError>` stored
/// in the request extensions.
///
/// The credential slot depends on the deployment mode: the session cookie in
/// session mode, the `x-api-key` header in api-key mode. A session cookie
/// that fails verification is cleared on the client.
#[axum::debug_middleware]
pub async fn mw_ctx_resolver(
    State(state): State<ApiState>,
    cookies: Cookies,
    headers: HeaderMap,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let mode = state.authenticator.mode();
    let credential = match mode {
        AuthMode::Session => cookies
            .get(AUTH_TOKEN_COOKIE)
            .map(|c| c.value().to_string()),
        AuthMode::ApiKey => headers
            .get(API_KEY_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string()),
    };

    let ctx = state
        .authenticator
        .verify_request(credential.as_deref())
        .map(Ctx::new);

    if let Err(err) = &ctx {
        debug!("Request not authenticated: {err}");
        if mode == AuthMode::Session && credential.is_some() {
            remove_session_cookie(&state.cookie, &cookies);
        }
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<std::result::Result<Ctx, AuthError>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}
