// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The `token` session cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Flags applied to the session cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Set the `Secure` attribute (production only)
    pub secure: bool,
}

impl CookiePolicy {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn base(&self, value: String) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE_NAME, value))
            .http_only(true)
            .secure(self.secure)
            .path("/")
            .build()
    }

    /// Cookie holding a freshly issued token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        self.base(token)
    }

    /// Add an expired `token` cookie with the same flags to `jar`.
    ///
    /// Added rather than removed so the `Set-Cookie` header is sent even
    /// when the request carried no cookie.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = self.base(String::new());
        cookie.make_removal();
        jar.add(cookie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::SET_COOKIE;
    use axum::response::IntoResponse;

    #[test]
    fn session_cookie_flags_follow_policy() {
        let dev = CookiePolicy::new(false).session_cookie("abc".into());
        assert_eq!(dev.name(), "token");
        assert_eq!(dev.value(), "abc");
        assert_eq!(dev.http_only(), Some(true));
        assert_eq!(dev.secure(), Some(false));

        let prod = CookiePolicy::new(true).session_cookie("abc".into());
        assert_eq!(prod.secure(), Some(true));
    }

    #[test]
    fn clear_always_emits_set_cookie() {
        let jar = CookiePolicy::new(true).clear(CookieJar::new());
        let response = jar.into_response();

        let header = response
            .headers()
            .get(SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(header.starts_with("token=;"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("Secure"));
        assert!(header.contains("Max-Age=0"));
    }
}
