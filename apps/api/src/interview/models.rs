use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::AppError;

pub const DEFAULT_HR_SCORE: f64 = 7.0;
pub const DEFAULT_TIME_LIMIT: u32 = 10;
pub const MAX_SCORE: f64 = 10.0;

/// Keys computed by the admission pipeline. Caller-supplied values under these
/// names are dropped so the persisted record has exactly one of each.
const COMPUTED_FIELDS: &[&str] = &[
    "id",
    "email",
    "score",
    "status",
    "resume",
    "time_limit",
    "time_taken",
    "submitted_at",
];

// ────────────────────────────────────────────────────────────────────────────
// Configuration document
// ────────────────────────────────────────────────────────────────────────────

/// Interview configuration as stored on disk. Replaced wholesale by the
/// admin endpoint. Keys written by older tooling are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewConfig {
    #[serde(default = "default_hr_score")]
    pub hr_score: f64,
    #[serde(default = "default_time_limit")]
    pub hr_time_limit: u32,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDefinition>,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            hr_score: DEFAULT_HR_SCORE,
            hr_time_limit: DEFAULT_TIME_LIMIT,
            fields: BTreeMap::new(),
        }
    }
}

fn default_hr_score() -> f64 {
    DEFAULT_HR_SCORE
}

fn default_time_limit() -> u32 {
    DEFAULT_TIME_LIMIT
}

impl InterviewConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.hr_score.is_finite() || !(0.0..=MAX_SCORE).contains(&self.hr_score) {
            return Err(AppError::Validation(format!(
                "hr_score must be between 0 and {MAX_SCORE}"
            )));
        }
        if let Some(name) = self.fields.keys().find(|name| name.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "field names cannot be blank (got {name:?})"
            )));
        }
        Ok(())
    }

    /// Names of the fields a submitted candidate must carry.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, def)| def.required)
            .map(|(name, _)| name.as_str())
    }
}

/// Body of `POST /api/requirements`. Unlike the stored document, unknown
/// keys are rejected so typos surface as a 400 instead of being dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementsUpdate {
    #[serde(default = "default_hr_score")]
    pub hr_score: f64,
    #[serde(default = "default_time_limit")]
    pub hr_time_limit: u32,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDefinition>,
}

impl From<RequirementsUpdate> for InterviewConfig {
    fn from(update: RequirementsUpdate) -> Self {
        InterviewConfig {
            hr_score: update.hr_score,
            hr_time_limit: update.hr_time_limit,
            fields: update.fields,
        }
    }
}

/// One candidate form field as configured by the admin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Rendering hint for the front end ("text", "email", ...). Not interpreted here.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub required: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Questions and answers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Exact,
    Keyword,
    /// Any type this service does not grade. Scores zero.
    #[serde(other)]
    Ungraded,
}

/// A question as embedded in an answer record. Extra keys (question text,
/// ids) are tolerated and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type", default)]
    pub kind: Option<QuestionType>,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub question_obj: Option<Question>,
    #[serde(default)]
    pub answer: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Candidates
// ────────────────────────────────────────────────────────────────────────────

/// How long the candidate took. Front ends send minutes as a number, older
/// ones a preformatted string; absent values persist as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeTaken {
    Minutes(f64),
    Label(String),
}

impl Default for TimeTaken {
    fn default() -> Self {
        TimeTaken::Label("N/A".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Passed,
    Failed,
}

/// Candidate record as submitted by the interview front end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub time_taken: Option<TimeTaken>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateProfile {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.time_taken.is_none() && self.extra.is_empty()
    }

    /// Trimmed email, if one was supplied and is not blank.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Whether the named field carries a non-empty value.
    pub fn has_field(&self, name: &str) -> bool {
        match name {
            "email" => self.email().is_some(),
            "time_taken" => self.time_taken.is_some(),
            _ => match self.extra.get(name) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(_) => true,
            },
        }
    }
}

/// A persisted candidate. Only passed candidates are ever stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub email: String,
    pub score: f64,
    pub status: CandidateStatus,
    pub resume: Option<String>,
    pub time_limit: u32,
    #[serde(default)]
    pub time_taken: TimeTaken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Computed values attached to a profile at admission time.
pub struct Enrichment {
    pub id: Uuid,
    pub email: String,
    pub score: f64,
    pub passed: bool,
    pub resume: Option<String>,
    pub time_limit: u32,
    pub submitted_at: DateTime<Utc>,
}

impl Candidate {
    pub fn from_profile(profile: CandidateProfile, enrichment: Enrichment) -> Self {
        let CandidateProfile {
            time_taken,
            mut extra,
            ..
        } = profile;
        extra.retain(|key, _| !COMPUTED_FIELDS.contains(&key.as_str()));

        Candidate {
            id: enrichment.id,
            email: enrichment.email,
            score: enrichment.score,
            status: if enrichment.passed {
                CandidateStatus::Passed
            } else {
                CandidateStatus::Failed
            },
            resume: enrichment.resume,
            time_limit: enrichment.time_limit,
            time_taken: time_taken.unwrap_or_default(),
            submitted_at: Some(enrichment.submitted_at),
            extra,
        }
    }

    /// Emails match after trimming, ignoring ASCII case.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}
