use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use super::ApiState;
use super::auth::{LoginBody, LoginRequest, login_admin, logout_admin};
use super::ctx::{API_KEY_HEADER, Ctx, mw_ctx_resolver};
use super::mw_auth::mw_require_auth;
use crate::auth::authenticator::AuthMode;
use crate::auth::error::AuthError;
use crate::prelude::*;

#[derive(Debug, Deserialize, Serialize)]
pub struct MeBody {
    pub authenticated: bool,
    pub mode: AuthMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SendRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SendBody {
    pub sent: bool,
}

fn v1(path: &str) -> String {
    format!("/v1/{path}")
}

fn cors_layer(origin: Option<HeaderValue>) -> CorsLayer {
    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)])
            .allow_credentials(true),
        None => CorsLayer::permissive(),
    }
}

pub fn router(state: ApiState, cors_origin: Option<HeaderValue>) -> Router {
    let protected_routes = Router::new()
        .route(&v1("me"), get(me))
        .route(&v1("send"), post(send_resume))
        .route_layer(middleware::from_fn(mw_require_auth));

    let public_routes = Router::new()
        .route(&v1("health"), get(health))
        .route(&v1("login"), post(login))
        .route(&v1("logout"), post(logout));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(cors_layer(cors_origin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            mw_ctx_resolver,
        ))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}

#[axum::debug_handler]
async fn login(
    State(state): State<ApiState>,
    cookies: Cookies,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginBody>> {
    // An unreadable body is reported like any other failed login.
    let Json(payload) = payload.map_err(|rejection| {
        log::debug!("Login body rejected: {rejection}");
        Error::Auth(AuthError::MissingCredentials)
    })?;
    Ok(Json(login_admin(
        &state.authenticator,
        &state.cookie,
        &cookies,
        &payload,
    )?))
}

async fn logout(State(state): State<ApiState>, cookies: Cookies) -> StatusCode {
    logout_admin(&state.cookie, &cookies);
    StatusCode::NO_CONTENT
}

async fn me(ctx: Ctx) -> Json<MeBody> {
    Json(MeBody {
        authenticated: true,
        mode: ctx.principal.mode,
        expires_at: ctx.principal.expires_at,
    })
}

#[axum::debug_handler]
async fn send_resume(
    State(state): State<ApiState>,
    _ctx: Ctx,
    Json(payload): Json<SendRequest>,
) -> Result<(StatusCode, Json<SendBody>)> {
    let message = state.resume.message_for(payload.email.trim()).await?;
    state.mailer.send(message).await?;
    Ok((StatusCode::ACCEPTED, Json(SendBody { sent: true })))
}
