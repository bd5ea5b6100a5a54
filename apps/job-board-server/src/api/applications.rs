// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Job application routes.
//!
//! All routes here run behind the auth gate. Applicants see and submit only
//! their own applications; the HR owner of a job sees and reviews the
//! applications made to it.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::{Auth, AuthError, AuthenticatedUser},
    error::ApiError,
    models::{
        EnrichedJobApplication, InsertOneResult, Job, JobApplication, UpdateResult,
        UpdateStatusRequest,
    },
    state::AppState,
    storage::{ApplicationRepository, DocumentStore, JobRepository},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ApplicantQuery {
    /// Applicant email; must be the session email
    pub email: Option<String>,
}

/// 404 for an unknown job, 403 unless the caller posted it.
fn ensure_job_owner(
    store: &DocumentStore,
    user: &AuthenticatedUser,
    job_id: &str,
) -> Result<(), ApiError> {
    let job = JobRepository::new(store)
        .get(job_id)?
        .ok_or_else(|| ApiError::not_found(format!("Job {job_id} not found")))?;
    user.ensure_owner(job.owner())?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/job-applications/jobs/{job_id}",
    params(
        ("job_id" = String, Path, description = "Job identifier")
    ),
    tag = "Job Applications",
    security(("cookie_auth" = [])),
    responses(
        (status = 200, body = [JobApplication]),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Unknown job")
    )
)]
pub async fn list_job_applications(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(job_id): Path<String>,
) -> Result<Json<Vec<JobApplication>>, ApiError> {
    ensure_job_owner(state.storage(), &user, &job_id)?;
    let applications = ApplicationRepository::new(state.storage()).list_by_job(&job_id)?;
    Ok(Json(applications))
}

/// Applications by one applicant, each carrying its job's details.
#[utoipa::path(
    get,
    path = "/job-applications",
    params(ApplicantQuery),
    tag = "Job Applications",
    security(("cookie_auth" = [])),
    responses(
        (status = 200, body = [EnrichedJobApplication]),
        (status = 401, description = "No valid session"),
        (status = 403, description = "email is missing or not the session email")
    )
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Auth(user): Auth,
    Query(params): Query<ApplicantQuery>,
) -> Result<Json<Vec<EnrichedJobApplication>>, ApiError> {
    let email = params.email.ok_or(AuthError::Forbidden)?;
    user.ensure_owner(Some(&email))?;
    let applications = ApplicationRepository::new(state.storage()).list_by_applicant(&email)?;
    Ok(Json(applications))
}

#[utoipa::path(
    post,
    path = "/job-applications",
    request_body = JobApplication,
    tag = "Job Applications",
    security(("cookie_auth" = [])),
    responses(
        (status = 200, body = InsertOneResult),
        (status = 401, description = "No valid session"),
        (status = 403, description = "applicant_email is not the session email"),
        (status = 404, description = "Unknown job")
    )
)]
pub async fn submit_application(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(mut application): Json<JobApplication>,
) -> Result<Json<InsertOneResult>, ApiError> {
    user.claim_ownership(&mut application.applicant_email)?;
    let ack = ApplicationRepository::new(state.storage()).submit(&mut application)?;
    Ok(Json(ack))
}

/// Review an application. Only the HR owner of its job may do so.
#[utoipa::path(
    patch,
    path = "/job-applications/{id}",
    params(
        ("id" = String, Path, description = "Application identifier")
    ),
    request_body = UpdateStatusRequest,
    tag = "Job Applications",
    security(("cookie_auth" = [])),
    responses(
        (status = 200, body = UpdateResult),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Caller does not own the job"),
        (status = 404, description = "Unknown application")
    )
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    Auth(user): Auth,
    Path(application_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateResult>, ApiError> {
    let repo = ApplicationRepository::new(state.storage());
    let application = repo.get(&application_id)?.ok_or_else(|| {
        ApiError::not_found(format!("Application {application_id} not found"))
    })?;

    let job = JobRepository::new(state.storage()).get(&application.job_id)?;
    user.ensure_owner(job.as_ref().and_then(Job::owner))?;

    let result = repo.update_status(&application_id, &request.status)?;
    Ok(Json(result))
}
