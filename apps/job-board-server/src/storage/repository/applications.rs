// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Job application repository.
//!
//! Applications are stored in the `job-applications` collection and refer
//! to their job by `job_id`. Submission checks the job, stores the
//! application and bumps the job's `applicationCount` in one transaction.

use serde_json::Value;

use super::super::{
    Collection, Document, DocumentStore, StoreError, StoreResult, JOB_APPLICATIONS,
};
use super::jobs::bump_application_count;
use crate::models::{EnrichedJobApplication, InsertOneResult, Job, JobApplication, UpdateResult};

impl Document for JobApplication {
    const COLLECTION: Collection = JOB_APPLICATIONS;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Repository for job applications.
pub struct ApplicationRepository<'a> {
    store: &'a DocumentStore,
}

impl<'a> ApplicationRepository<'a> {
    /// Create a new ApplicationRepository.
    pub fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    /// Get an application by ID.
    pub fn get(&self, application_id: &str) -> StoreResult<Option<JobApplication>> {
        self.store.find_one(application_id)
    }

    /// All applications submitted against a job, unenriched.
    pub fn list_by_job(&self, job_id: &str) -> StoreResult<Vec<JobApplication>> {
        self.store
            .find(|application: &JobApplication| application.job_id == job_id)
    }

    /// All applications by one applicant, each carrying its job's details.
    ///
    /// Applications whose job no longer resolves are returned without them.
    pub fn list_by_applicant(
        &self,
        applicant_email: &str,
    ) -> StoreResult<Vec<EnrichedJobApplication>> {
        self.store.read(|scope| {
            let applications = scope.find(|application: &JobApplication| {
                application.applicant() == Some(applicant_email)
            })?;

            applications
                .into_iter()
                .map(|application| -> StoreResult<EnrichedJobApplication> {
                    let job: Option<Job> = scope.find_one(&application.job_id)?;
                    if job.is_none() {
                        tracing::debug!(
                            application_id = %application.id,
                            job_id = %application.job_id,
                            "referenced job not found, skipping enrichment"
                        );
                    }
                    Ok(EnrichedJobApplication::new(application, job.as_ref()))
                })
                .collect()
        })
    }

    /// Store a new application and count it against its job.
    ///
    /// Fails with [`StoreError::NotFound`] when the job does not exist and
    /// with [`StoreError::Conflict`] when its count cannot be incremented.
    /// Nothing is written in either case.
    pub fn submit(&self, application: &mut JobApplication) -> StoreResult<InsertOneResult> {
        let job_id = application.job_id.clone();

        let ack = self.store.write(|scope| {
            let counted = scope.try_update_one::<Job>(&job_id, bump_application_count)?;
            if counted.matched_count == 0 {
                return Err(StoreError::NotFound(format!("Job {job_id}")));
            }
            scope.insert_one(application)
        })?;

        tracing::info!(
            application_id = %ack.inserted_id,
            job_id = %job_id,
            "application submitted"
        );
        Ok(ack)
    }

    /// Set the review status of an application.
    pub fn update_status(
        &self,
        application_id: &str,
        status: &Value,
    ) -> StoreResult<UpdateResult> {
        let result = self
            .store
            .update_one(application_id, |application: &mut JobApplication| {
                application.status = Some(status.clone());
            })?;

        tracing::info!(
            application_id = %application_id,
            status = %status,
            matched = result.matched_count,
            "application status updated"
        );
        Ok(result)
    }
}
