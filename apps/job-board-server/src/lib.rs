// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Job Board Server - job postings and applications API
//!
//! HR accounts post jobs; applicants apply to them and follow their
//! applications; HR reviews the applications to their own jobs. Sessions
//! are signed tokens carried in an HTTP-only cookie.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and OpenAPI document
//! - `auth` - Session tokens, cookie handling and the auth gate
//! - `config` - Environment configuration
//! - `storage` - Embedded document store (redb) and repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
