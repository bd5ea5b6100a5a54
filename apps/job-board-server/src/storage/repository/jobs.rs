// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Job repository.
//!
//! Job postings are stored in the `jobs` collection. `applicationCount` is
//! only ever changed through [`bump_application_count`], inside the same
//! write transaction that stores the application.

use serde_json::{Number, Value};

use super::super::{Collection, Document, DocumentStore, StoreError, StoreResult, JOBS};
use crate::models::{InsertOneResult, Job};

impl Document for Job {
    const COLLECTION: Collection = JOBS;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Count one more application against `job`.
///
/// A falsy count (absent, `null`, `false`, `0`, `""`) becomes 1; any other
/// number is incremented. Non-numeric counts and overflow are refused.
pub(crate) fn bump_application_count(job: &mut Job) -> StoreResult<()> {
    let next = match job.application_count.as_ref() {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Value::from(1),
        Some(Value::String(s)) if s.is_empty() => Value::from(1),
        Some(Value::Number(count)) => next_count(count).ok_or_else(|| {
            StoreError::Conflict(format!(
                "applicationCount {count} of job {} cannot be incremented",
                job.id
            ))
        })?,
        Some(other) => {
            return Err(StoreError::Conflict(format!(
                "applicationCount of job {} is not a number: {other}",
                job.id
            )))
        }
    };
    job.application_count = Some(next);
    Ok(())
}

fn next_count(count: &Number) -> Option<Value> {
    if let Some(n) = count.as_i64() {
        let next = if n == 0 { 1 } else { n.checked_add(1)? };
        return Some(Value::from(next));
    }
    if let Some(n) = count.as_u64() {
        return n.checked_add(1).map(Value::from);
    }
    let n = count.as_f64()?;
    let next = if n == 0.0 { 1.0 } else { n + 1.0 };
    Number::from_f64(next).map(Value::Number)
}

/// Repository for job postings.
pub struct JobRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> JobRepository<'a> {
    /// Create a new JobRepository.
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// List jobs in store order, optionally only those owned by `hr_email`.
    pub fn list(&self, hr_email: Option<&str>) -> StoreResult<Vec<Job>> {
        self.store.find(|job: &Job| match hr_email {
            Some(email) => job.owner() == Some(email),
            None => true,
        })
    }

    /// Get a job by ID.
    pub fn get(&self, job_id: &str) -> StoreResult<Option<Job>> {
        self.store.find_one(job_id)
    }

    /// Store a new job; its id is assigned here.
    pub fn create(&self, job: &mut Job) -> StoreResult<InsertOneResult> {
        let ack = self.store.insert_one(job)?;
        tracing::info!(job_id = %job.id(), hr_email = ?job.owner(), "job created");
        Ok(ack)
    }
}
