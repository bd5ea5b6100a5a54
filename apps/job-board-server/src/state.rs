// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{CookiePolicy, TokenService};
use crate::storage::DocumentStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub tokens: Arc<TokenService>,
    pub cookies: CookiePolicy,
}

impl AppState {
    pub fn new(store: DocumentStore, tokens: TokenService) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            cookies: CookiePolicy::default(),
        }
    }

    pub fn with_cookie_policy(mut self, cookies: CookiePolicy) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn storage(&self) -> &DocumentStore {
        &self.store
    }
}

/// In-memory state with a fixed test secret.
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::auth::token::tests::TEST_SECRET;
    use std::time::Duration;

    AppState::new(
        DocumentStore::in_memory().unwrap(),
        TokenService::new(TEST_SECRET, Duration::from_secs(3600)),
    )
}
