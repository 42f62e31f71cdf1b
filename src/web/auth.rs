use serde::{Deserialize, Serialize};
use tower_cookies::{
    Cookie, Cookies,
    cookie::{SameSite, time::Duration},
};

use super::CookiePolicy;
use super::ctx::AUTH_TOKEN_COOKIE;
use crate::auth::authenticator::Authenticator;
use crate::prelude::*;

#[derive(Deserialize, Serialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginBody {
    pub authenticated: bool,
    /// Session expiry in unix millis.
    pub expires_at: i64,
}

/// Checks the admin password and, on success, stores a fresh session token
/// in the session cookie.
pub fn login_admin(
    authenticator: &Authenticator,
    policy: &CookiePolicy,
    cookies: &Cookies,
    request: &LoginRequest,
) -> Result<LoginBody> {
    let issued = authenticator.login(&request.password)?;
    let max_age = authenticator.session_ttl_secs().unwrap_or_default();

    cookies.add(
        Cookie::build((AUTH_TOKEN_COOKIE, issued.token))
            .path("/")
            .http_only(true)
            .secure(policy.secure)
            .same_site(SameSite::Strict)
            .max_age(Duration::seconds(max_age))
            .build(),
    );

    Ok(LoginBody {
        authenticated: true,
        expires_at: issued.expires_at,
    })
}

/// Tells the client to drop its session cookie.
///
/// Nothing is recorded server-side, so a copy of the token remains valid
/// until it expires.
pub fn logout_admin(policy: &CookiePolicy, cookies: &Cookies) {
    remove_session_cookie(policy, cookies);
}

pub(crate) fn remove_session_cookie(policy: &CookiePolicy, cookies: &Cookies) {
    cookies.remove(
        Cookie::build(AUTH_TOKEN_COOKIE)
            .path("/")
            .http_only(true)
            .secure(policy.secure)
            .same_site(SameSite::Strict)
            .build(),
    );
}
