use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::proxy_client::JobDetails;

/// Pipeline stage of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Applied,
        Status::Interview,
        Status::Offer,
        Status::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::Interview => "Interview",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown status '{0}'. Expected one of: Applied, Interview, Offer, Rejected")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// Recruiting terms offered when adding an application. Free-form terms are allowed too.
pub const TERM_OPTIONS: &[&str] = &[
    "Summer 2026",
    "Fall 2026",
    "Winter 2027",
    "Spring 2027",
    "Summer 2027",
    "Full-time 2026",
    "Full-time 2027",
    "Other",
];

/// Maximum length of `notes`, in characters.
pub const MAX_NOTES_CHARS: usize = 500;

/// One tracked job application, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    /// Creation timestamp in milliseconds; unique within the collection.
    pub id: i64,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub status: Status,
    pub application_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Everything needed to create an `ApplicationRecord` except its id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewApplication {
    pub company: String,
    pub position: String,
    pub status: Status,
    /// Defaults to today (UTC) when absent.
    pub application_date: Option<NaiveDate>,
    pub term: Option<String>,
    pub portal_url: Option<String>,
    pub notes: Option<String>,
}

impl NewApplication {
    pub fn new(company: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            position: position.into(),
            ..Default::default()
        }
    }

    /// Checks required fields and the notes length.
    pub fn validate(&self) -> Result<(), String> {
        if self.company.trim().is_empty() {
            return Err("company is required".to_string());
        }
        if self.position.trim().is_empty() {
            return Err("position is required".to_string());
        }
        if let Some(notes) = &self.notes {
            let len = notes.chars().count();
            if len > MAX_NOTES_CHARS {
                return Err(format!(
                    "notes must be at most {MAX_NOTES_CHARS} characters (got {len})"
                ));
            }
        }
        Ok(())
    }

    /// Fills blank fields from an extracted posting; fields already set win.
    /// Notes are cut to `MAX_NOTES_CHARS` and the portal URL defaults to `job_url`.
    pub fn fill_from_job_details(&mut self, details: JobDetails, job_url: &str) {
        fill_blank(&mut self.company, details.company);
        fill_blank(&mut self.position, details.position);
        if self.notes.is_none() {
            self.notes = details
                .notes
                .map(|notes| notes.chars().take(MAX_NOTES_CHARS).collect());
        }
        if self.portal_url.is_none() {
            self.portal_url = Some(job_url.to_string());
        }
    }

    pub(crate) fn into_record(self, id: i64, today: NaiveDate) -> ApplicationRecord {
        ApplicationRecord {
            id,
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            status: self.status,
            application_date: self.application_date.unwrap_or(today),
            term: non_blank(self.term),
            portal_url: non_blank(self.portal_url),
            notes: non_blank(self.notes),
        }
    }
}

/// Replaces `field` with `value` if the field is blank and the value is not.
fn fill_blank(field: &mut String, value: Option<String>) {
    if field.trim().is_empty() {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            *field = value;
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
