// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Cookie-carried JWT sessions for the job board API.
//!
//! ## Auth Flow
//!
//! 1. Client calls `POST /jwt` with its identity claims (`{ email }`)
//! 2. Server signs them (HS256, fixed lifetime) and sets the `token` cookie
//! 3. On protected routes the gate:
//!    - Reads the `token` cookie
//!    - Verifies signature and expiry
//!    - Attaches the decoded [`AuthenticatedUser`] to the request
//! 4. Handlers compare the user's email with the owner of the data touched
//!
//! ## Security
//!
//! - The cookie is HTTP-only, and `Secure` in production
//! - No server-side session table: validity is signature + expiry
//! - Missing or invalid tokens yield 401, ownership mismatches 403

pub mod claims;
pub mod cookie;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod token;

pub use claims::{AuthenticatedUser, IdentityClaims};
pub use cookie::{CookiePolicy, TOKEN_COOKIE_NAME};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::{authenticate, require_auth};
pub use token::TokenService;
