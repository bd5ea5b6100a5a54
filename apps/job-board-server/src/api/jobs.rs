// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{InsertOneResult, Job},
    state::AppState,
    storage::JobRepository,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct JobQuery {
    /// Only jobs posted by this HR email
    pub email: Option<String>,
}

#[utoipa::path(
    get,
    path = "/jobs",
    params(JobQuery),
    tag = "Jobs",
    responses((status = 200, body = [Job]))
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobQuery>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let jobs = JobRepository::new(state.storage()).list(params.email.as_deref())?;
    Ok(Json(jobs))
}

/// Unknown ids yield `null` rather than 404.
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(
        ("id" = String, Path, description = "Job identifier")
    ),
    tag = "Jobs",
    responses((status = 200, description = "The job, or null", body = Option<Job>))
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Option<Job>>, ApiError> {
    let job = JobRepository::new(state.storage()).get(&job_id)?;
    Ok(Json(job))
}

/// Post a job owned by the caller. `hr_email` defaults to the session email.
#[utoipa::path(
    post,
    path = "/jobs",
    request_body = Job,
    tag = "Jobs",
    security(("cookie_auth" = [])),
    responses(
        (status = 200, body = InsertOneResult),
        (status = 401, description = "No valid session"),
        (status = 403, description = "hr_email is not the session email")
    )
)]
pub async fn create_job(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(mut job): Json<Job>,
) -> Result<Json<InsertOneResult>, ApiError> {
    user.claim_ownership(&mut job.hr_email)?;
    let ack = JobRepository::new(state.storage()).create(&mut job)?;
    Ok(Json(ack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::auth_for;
    use crate::state::test_state;
    use axum::http::StatusCode;
    use serde_json::json;

    fn posting(title: &str, hr_email: Option<&str>) -> Job {
        Job {
            title: Some(json!(title)),
            company: Some(json!("Acme")),
            location: Some(json!("Lisbon")),
            hr_email: hr_email.map(|email| json!(email)),
            ..Job::default()
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_submitted_fields() {
        let state = test_state();
        let mut job = posting("Rust Engineer", Some("hr@acme.test"));
        job.extra.insert("salary".into(), json!({ "min": 90, "max": 120 }));

        let Json(ack) = create_job(
            State(state.clone()),
            auth_for(&state, "hr@acme.test"),
            Json(job.clone()),
        )
        .await
        .unwrap();
        assert!(ack.acknowledged);

        let Json(loaded) = get_job(State(state), Path(ack.inserted_id.clone()))
            .await
            .unwrap();
        let loaded = loaded.unwrap();
        assert_eq!(loaded.id, ack.inserted_id);
        assert_eq!(Job { id: String::new(), ..loaded }, job);
    }

    #[tokio::test]
    async fn create_fills_hr_email_from_session() {
        let state = test_state();
        let Json(ack) = create_job(
            State(state.clone()),
            auth_for(&state, "hr@acme.test"),
            Json(posting("Designer", None)),
        )
        .await
        .unwrap();

        let Json(loaded) = get_job(State(state), Path(ack.inserted_id)).await.unwrap();
        assert_eq!(loaded.unwrap().owner(), Some("hr@acme.test"));
    }

    #[tokio::test]
    async fn create_for_another_owner_is_forbidden() {
        let state = test_state();
        let err = create_job(
            State(state.clone()),
            auth_for(&state, "mallory@example.test"),
            Json(posting("Designer", Some("hr@acme.test"))),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::FORBIDDEN);
        let Json(all) = list_jobs(State(state), Query(JobQuery { email: None }))
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn non_string_fields_are_stored_verbatim() {
        let state = test_state();
        let job = Job {
            title: Some(json!(42)),
            company: Some(json!({ "name": "Acme", "size": 12 })),
            location: Some(serde_json::Value::Null),
            application_count: Some(json!(2.5)),
            ..posting("ignored", Some("hr@acme.test"))
        };

        let Json(ack) = create_job(
            State(state.clone()),
            auth_for(&state, "hr@acme.test"),
            Json(job.clone()),
        )
        .await
        .unwrap();

        let Json(loaded) = get_job(State(state), Path(ack.inserted_id)).await.unwrap();
        let loaded = loaded.unwrap();
        assert_eq!(loaded.title, Some(json!(42)));
        assert_eq!(loaded.company, Some(json!({ "name": "Acme", "size": 12 })));
        assert_eq!(loaded.location, Some(serde_json::Value::Null));
        assert_eq!(loaded.application_count, Some(json!(2.5)));
    }

    #[tokio::test]
    async fn get_unknown_job_is_null() {
        let Json(job) = get_job(State(test_state()), Path("missing".into()))
            .await
            .unwrap();
        assert!(job.is_none());
        assert_eq!(serde_json::to_string(&job).unwrap(), "null");
    }

    #[tokio::test]
    async fn list_filters_by_email() {
        let state = test_state();
        for (title, owner) in [
            ("a", "hr@acme.test"),
            ("b", "hr@globex.test"),
            ("c", "hr@acme.test"),
        ] {
            create_job(
                State(state.clone()),
                auth_for(&state, owner),
                Json(posting(title, Some(owner))),
            )
            .await
            .unwrap();
        }

        let Json(acme) = list_jobs(
            State(state.clone()),
            Query(JobQuery {
                email: Some("hr@acme.test".into()),
            }),
        )
        .await
        .unwrap();
        let titles: Vec<_> = acme
            .iter()
            .filter_map(|j| j.title.as_ref().and_then(|t| t.as_str()))
            .collect();
        assert_eq!(titles, vec!["a", "c"]);

        let Json(all) = list_jobs(State(state), Query(JobQuery { email: None }))
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }
}
