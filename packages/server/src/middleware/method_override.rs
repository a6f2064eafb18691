use axum::{extract::Request, http::Method, middleware::Next, response::Response};
use tracing::instrument;

/// Header letting limited clients tunnel PUT/DELETE through POST.
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-METHOD";

/// Rewrite the request verb from `X-HTTP-METHOD` before routing.
///
/// Only POST may be overridden, and only to PUT or DELETE, so a GET can
/// never be promoted into a mutation. Unknown values are ignored rather
/// than rejected, matching what the frontends send.
#[instrument(skip_all)]
pub async fn method_override(mut req: Request, next: Next) -> Response {
    if req.method() == Method::POST
        && let Some(wanted) = req
            .headers()
            .get(METHOD_OVERRIDE_HEADER)
            .and_then(|v| v.to_str().ok())
    {
        match wanted.to_ascii_uppercase().as_str() {
            "PUT" => *req.method_mut() = Method::PUT,
            "DELETE" => *req.method_mut() = Method::DELETE,
            other => {
                tracing::debug!("Ignoring method override to {other:?}");
            }
        }
    }

    next.run(req).await
}
