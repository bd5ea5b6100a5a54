// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_auth, TOKEN_COOKIE_NAME},
    models::{
        EnrichedJobApplication, InsertOneResult, Job, JobApplication, SessionResponse,
        UpdateResult, UpdateStatusRequest,
    },
    state::AppState,
};

pub mod applications;
pub mod health;
pub mod jobs;
pub mod session;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/jobs", post(jobs::create_job))
        .route(
            "/job-applications",
            get(applications::list_applications).post(applications::submit_application),
        )
        .route(
            "/job-applications/jobs/{job_id}",
            get(applications::list_job_applications),
        )
        .route(
            "/job-applications/{id}",
            patch(applications::update_application_status),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/jwt", post(session::issue_token))
        .route("/logout", post(session::logout))
        .route("/jobs", get(jobs::list_jobs))
        .route("/jobs/{id}", get(jobs::get_job));

    protected
        .merge(public)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

/// CORS for browser clients sending the session cookie.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    let origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([CONTENT_TYPE]))
}

struct CookieSecurity;

impl Modify for CookieSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(TOKEN_COOKIE_NAME))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        session::issue_token,
        session::logout,
        jobs::list_jobs,
        jobs::get_job,
        jobs::create_job,
        applications::list_job_applications,
        applications::list_applications,
        applications::submit_application,
        applications::update_application_status
    ),
    components(
        schemas(
            Job,
            JobApplication,
            EnrichedJobApplication,
            UpdateStatusRequest,
            InsertOneResult,
            UpdateResult,
            SessionResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&CookieSecurity),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Session", description = "Cookie session tokens"),
        (name = "Jobs", description = "Job postings"),
        (name = "Job Applications", description = "Applications and their review status")
    )
)]
pub struct ApiDoc;
