//! Authentication middleware.
//! Guards the authenticated route group.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::http::response::HttpError;
use crate::http::server::AppState;
use crate::identity::AuthUser;

pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    // Passthrough mode: handlers see an empty identity.
    if state.config.handlers.disable_auth_middleware {
        req.extensions_mut().insert(AuthUser::default());
        return next.run(req).await;
    }

    match state.authenticator.authenticate(req.headers()).await {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => {
            warn!(path = %req.uri().path(), "Rejected unauthenticated request");
            HttpError::access_denied().into_response()
        }
    }
}
