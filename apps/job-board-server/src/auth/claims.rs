// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity claims and the authenticated user derived from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AuthError;

/// Claims carried by a session token.
///
/// The payload is whatever the client posted to `POST /jwt`; only `email`
/// is read by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityClaims {
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiration (seconds since epoch)
    pub exp: i64,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl IdentityClaims {
    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }
}

/// Authenticated user attached to the request by the auth gate.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    /// Email claim of the token, if the client supplied one
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: IdentityClaims) -> Self {
        Self {
            email: claims.email().map(str::to_owned),
        }
    }

    /// Succeeds only when the token carries an email equal to `owner`.
    pub fn ensure_owner(&self, owner: Option<&str>) -> Result<(), AuthError> {
        match (self.email.as_deref(), owner) {
            (Some(email), Some(owner)) if email == owner => Ok(()),
            _ => Err(AuthError::Forbidden),
        }
    }

    /// Fill an absent or null owner field with the token email, or check a
    /// present one. Non-string owners never match.
    pub fn claim_ownership(&self, owner: &mut Option<Value>) -> Result<(), AuthError> {
        if matches!(owner, None | Some(Value::Null)) {
            let email = self.email.clone().ok_or(AuthError::Forbidden)?;
            *owner = Some(Value::String(email));
            return Ok(());
        }
        self.ensure_owner(owner.as_ref().and_then(Value::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(email: Option<&str>) -> AuthenticatedUser {
        let mut payload = Map::new();
        if let Some(email) = email {
            payload.insert("email".into(), json!(email));
        }
        AuthenticatedUser::from_claims(IdentityClaims {
            iat: 0,
            exp: 60,
            payload,
        })
    }

    #[test]
    fn claims_flatten_payload() {
        let claims: IdentityClaims = serde_json::from_value(json!({
            "email": "ann@example.test",
            "name": "Ann",
            "iat": 10,
            "exp": 20
        }))
        .unwrap();

        assert_eq!(claims.email(), Some("ann@example.test"));
        assert_eq!(claims.payload["name"], "Ann");
        assert!(!claims.payload.contains_key("exp"));
    }

    #[test]
    fn ensure_owner_requires_matching_email() {
        let ann = user(Some("ann@example.test"));
        assert!(ann.ensure_owner(Some("ann@example.test")).is_ok());
        assert!(matches!(
            ann.ensure_owner(Some("bob@example.test")),
            Err(AuthError::Forbidden)
        ));
        assert!(ann.ensure_owner(None).is_err());
        assert!(user(None).ensure_owner(Some("ann@example.test")).is_err());
    }

    #[test]
    fn claim_ownership_fills_absent_owner() {
        let ann = user(Some("ann@example.test"));

        let mut owner = None;
        ann.claim_ownership(&mut owner).unwrap();
        assert_eq!(owner, Some(json!("ann@example.test")));

        let mut null = Some(Value::Null);
        ann.claim_ownership(&mut null).unwrap();
        assert_eq!(null, Some(json!("ann@example.test")));

        let mut mine = Some(json!("ann@example.test"));
        assert!(ann.claim_ownership(&mut mine).is_ok());

        let mut other = Some(json!("bob@example.test"));
        assert!(ann.claim_ownership(&mut other).is_err());

        let mut listed = Some(json!(["ann@example.test"]));
        assert!(ann.claim_ownership(&mut listed).is_err());

        let mut nobody = None;
        assert!(user(None).claim_ownership(&mut nobody).is_err());
        assert!(nobody.is_none());
    }
}
