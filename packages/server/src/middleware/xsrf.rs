use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tower_sessions::Session;

use crate::error::AppError;
use crate::session::{self, XSRF_TOKEN_KEY};
use crate::utils::xsrf;

/// Cookie carrying the XSRF token to client scripts.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";
/// Header echoing the token back on mutating requests.
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// The anti-forgery gate, run on every request.
///
/// First contact moves the session into its active state: the session is
/// persisted (so it has an id to bind to), a token is minted and stored,
/// and the `XSRF-TOKEN` cookie is set on the response. The token is
/// never rotated while the session lives.
///
/// Mutating verbs must echo the stored token in `X-XSRF-TOKEN`; absence
/// or mismatch is rejected here, before any handler runs. The cookie is
/// still issued on a rejected first contact so a client can recover by
/// retrying with the token it just received.
pub async fn xsrf_gate(
    session: Session,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let stored: Option<String> = session.get(XSRF_TOKEN_KEY).await?;
    let (token, minted) = match stored {
        Some(token) => (token, false),
        None => {
            session.save().await?;
            let sid = session::session_id(&session).unwrap_or_default();
            let token = xsrf::mint_token(&sid);
            session.insert(XSRF_TOKEN_KEY, &token).await?;
            (token, true)
        }
    };

    let response = if is_mutating(req.method())
        && req
            .headers()
            .get(XSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            != Some(token.as_str())
    {
        AppError::XsrfDenied.into_response()
    } else {
        next.run(req).await
    };

    if minted {
        let cookie = Cookie::build((XSRF_COOKIE, token))
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(false)
            .build();
        Ok((jar.add(cookie), response).into_response())
    } else {
        Ok(response)
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::DELETE | Method::PATCH
    )
}
