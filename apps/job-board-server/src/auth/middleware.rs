// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Auth gate for protected routes.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/job-applications", get(list_applications))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use super::{AuthError, AuthenticatedUser, TokenService, TOKEN_COOKIE_NAME};
use crate::state::AppState;

/// Verify the `token` cookie and attach the [`AuthenticatedUser`] to the
/// request, or reject with 401 before the handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());

    match authenticate(&jar, &state.tokens) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(
                path = %request.uri().path(),
                error_code = err.error_code(),
                "authentication denied"
            );
            err.into_response()
        }
    }
}

/// Resolve the session cookie in `jar` to an authenticated user.
pub fn authenticate(
    jar: &CookieJar,
    tokens: &TokenService,
) -> Result<AuthenticatedUser, AuthError> {
    let token = jar
        .get(TOKEN_COOKIE_NAME)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = tokens.verify(token)?;
    Ok(AuthenticatedUser::from_claims(claims))
}
