// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistent storage for job postings and applications in an embedded
//! **redb** database. Documents are JSON objects kept in two collections.
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/job-board.redb
//!   jobs              {job_id} → Job
//!   job-applications  {application_id} → JobApplication
//! ```
//!
//! ## Important Notes
//!
//! - The store is constructed once at startup and injected via `AppState`
//! - Multi-document changes go through `DocumentStore::write` so they commit
//!   together or not at all

pub mod document_store;
pub mod repository;

pub use document_store::{
    Collection, Document, DocumentStore, ReadScope, StoreError, StoreResult, WriteScope,
    JOBS, JOB_APPLICATIONS,
};
pub use repository::{ApplicationRepository, JobRepository};
