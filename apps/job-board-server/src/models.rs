// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Documents persisted in the two collections plus the request and
//! acknowledgement bodies used by the REST API. All types derive
//! `Serialize`, `Deserialize`, and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! ## Verbatim Fields
//!
//! Job postings and applications carry whatever the caller submitted. The
//! fields the service reads are typed; everything else lands in `extra` and
//! is written back unchanged.
//!
//! ## Model Categories
//!
//! - **Jobs**: postings owned by an HR account (`hr_email`)
//! - **Applications**: submissions against a job (`job_id`)
//! - **Acknowledgements**: insert/update results returned by write routes

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Caller-supplied fields the service does not interpret.
pub type ExtraFields = BTreeMap<String, Value>;

/// Application fields copied from the referenced job at read time.
pub const ENRICHED_FIELDS: [&str; 4] = ["title", "company", "location", "company_logo"];

/// Keep a present field as-is, `null` included.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

// =============================================================================
// Job Models
// =============================================================================

/// A posted position.
///
/// Named fields hold whatever JSON the caller sent for them; the service
/// only reads `hr_email` (as a string) and `applicationCount`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Job {
    /// Store-generated identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub company: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    /// Email of the HR account that owns the posting.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub hr_email: Option<Value>,
    /// Number of applications submitted against this job.
    #[serde(
        rename = "applicationCount",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub application_count: Option<Value>,
    /// Any further fields, persisted verbatim.
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: ExtraFields,
}

impl Job {
    /// The owning HR email, when `hr_email` is a string.
    pub fn owner(&self) -> Option<&str> {
        self.hr_email.as_ref().and_then(Value::as_str)
    }
}

// =============================================================================
// Job Application Models
// =============================================================================

/// A submission by an applicant against a job.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct JobApplication {
    /// Store-generated identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Identifier of the job applied to.
    pub job_id: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub applicant_email: Option<Value>,
    /// Free-form review status (e.g. `pending`, `reviewed`).
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Any further fields, persisted verbatim.
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: ExtraFields,
}

impl JobApplication {
    /// The applicant email, when `applicant_email` is a string.
    pub fn applicant(&self) -> Option<&str> {
        self.applicant_email.as_ref().and_then(Value::as_str)
    }
}

/// An application augmented with details of the job it references.
///
/// The job fields are filled at read time and never persisted. When the job
/// cannot be found they are left out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EnrichedJobApplication {
    #[serde(flatten)]
    pub application: JobApplication,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<Value>,
}

impl EnrichedJobApplication {
    pub fn new(mut application: JobApplication, job: Option<&Job>) -> Self {
        let Some(job) = job else {
            return Self {
                application,
                title: None,
                company: None,
                location: None,
                company_logo: None,
            };
        };

        // Job details replace same-named fields the applicant may have sent.
        for field in ENRICHED_FIELDS {
            application.extra.remove(field);
        }

        Self {
            application,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            company_logo: job.company_logo.clone(),
        }
    }
}

/// Request to change an application's review status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    /// New status, stored as sent.
    pub status: Value,
}

// =============================================================================
// Acknowledgements
// =============================================================================

/// Result of inserting one document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    /// Identifier assigned to the new document.
    pub inserted_id: String,
}

impl InsertOneResult {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

/// Result of updating at most one document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    /// Documents matching the filter (0 or 1).
    pub matched_count: u64,
    /// Documents actually changed (0 or 1).
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
        }
    }

    pub fn matched(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
        }
    }
}

/// Body returned by the session routes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SessionResponse {
    pub success: bool,
}
