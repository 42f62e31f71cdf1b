use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::Ctx;
use crate::prelude::*;

/// Lets the request through only when the ctx resolver admitted it.
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
