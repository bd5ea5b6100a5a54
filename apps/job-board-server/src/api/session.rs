// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session routes: issue and clear the `token` cookie.

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde_json::{Map, Value};

use crate::{error::ApiError, models::SessionResponse, state::AppState};

/// Sign the posted claims and set them as the `token` cookie.
///
/// The body is taken as-is; clients are expected to send `{ "email": ... }`.
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Session",
    request_body(content = Object, description = "Identity claims, e.g. `{ \"email\": \"...\" }`"),
    responses(
        (status = 200, description = "Cookie set", body = SessionResponse)
    )
)]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(claims): Json<Map<String, Value>>,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    let email = claims.get("email").and_then(Value::as_str).map(str::to_owned);
    let token = state.tokens.issue(claims)?;

    tracing::info!(email = ?email, "session token issued");
    Ok((
        jar.add(state.cookies.session_cookie(token)),
        Json(SessionResponse { success: true }),
    ))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Session",
    responses(
        (status = 200, description = "Cookie cleared", body = SessionResponse)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    (
        state.cookies.clear(jar),
        Json(SessionResponse { success: true }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CookiePolicy, TOKEN_COOKIE_NAME};
    use crate::state::test_state;
    use serde_json::json;

    #[tokio::test]
    async fn issue_token_sets_verifiable_cookie() {
        let state = test_state();
        let claims = json!({ "email": "ann@example.test" })
            .as_object()
            .unwrap()
            .clone();

        let (jar, Json(body)) = issue_token(State(state.clone()), CookieJar::new(), Json(claims))
            .await
            .unwrap();
        assert!(body.success);

        let cookie = jar.get(TOKEN_COOKIE_NAME).unwrap();
        assert_eq!(cookie.http_only(), Some(true));
        let verified = state.tokens.verify(cookie.value()).unwrap();
        assert_eq!(verified.email(), Some("ann@example.test"));
    }

    #[tokio::test]
    async fn production_cookie_is_secure() {
        let state = test_state().with_cookie_policy(CookiePolicy::new(true));
        let (jar, _) = issue_token(State(state), CookieJar::new(), Json(Map::new()))
            .await
            .unwrap();

        assert_eq!(jar.get(TOKEN_COOKIE_NAME).unwrap().secure(), Some(true));
    }

    #[tokio::test]
    async fn logout_succeeds() {
        let (_, Json(body)) = logout(State(test_state()), CookieJar::new()).await;
        assert!(body.success);
    }
}
