// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! Each repository provides the operations of one collection, using the
//! DocumentStore for all transactions.

pub mod applications;
pub mod jobs;

pub use applications::ApplicationRepository;
pub use jobs::JobRepository;
