//! Admission pipeline: score a submitted interview, decide pass/fail, and
//! record first-time passes in the candidate registry.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::models::{Answer, Candidate, CandidateProfile, Enrichment, InterviewConfig};
use super::registry::{Admission, CandidateRegistry};
use super::scoring::score_answers;
use crate::errors::AppError;
use crate::store::DocumentStore;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitRequest {
    #[serde(default)]
    pub candidate: Option<CandidateProfile>,
    #[serde(default)]
    pub answers: Option<Vec<Answer>>,
    #[serde(default)]
    pub resume_filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdmissionOutcome {
    Success { score: f64, passed: bool },
    Duplicate { message: String },
}

impl AdmissionOutcome {
    fn duplicate() -> Self {
        AdmissionOutcome::Duplicate {
            message: "Candidate already exists".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AdmissionPipeline {
    settings: Arc<dyn DocumentStore<InterviewConfig>>,
    registry: Arc<CandidateRegistry>,
}

impl AdmissionPipeline {
    pub fn new(
        settings: Arc<dyn DocumentStore<InterviewConfig>>,
        registry: Arc<CandidateRegistry>,
    ) -> Self {
        Self { settings, registry }
    }

    pub async fn admit(&self, request: SubmitRequest) -> Result<AdmissionOutcome, AppError> {
        let (profile, answers) = match (request.candidate, request.answers) {
            (Some(profile), Some(answers)) if !profile.is_empty() && !answers.is_empty() => {
                (profile, answers)
            }
            _ => {
                return Err(AppError::Validation(
                    "Missing candidate or answers".to_string(),
                ))
            }
        };

        let email = profile
            .email()
            .ok_or_else(|| AppError::Validation("Candidate email is required".to_string()))?
            .to_string();

        let config = self.settings.load().await?;
        if let Some(missing) = config
            .required_fields()
            .find(|field| !profile.has_field(field))
        {
            return Err(AppError::Validation(format!(
                "Missing required field: {missing}"
            )));
        }

        let score = score_answers(&answers);
        let passed = score >= config.hr_score;

        let candidate = Candidate::from_profile(
            profile,
            Enrichment {
                id: Uuid::new_v4(),
                email,
                score,
                passed,
                resume: request.resume_filename.filter(|name| !name.trim().is_empty()),
                time_limit: config.hr_time_limit,
                submitted_at: Utc::now(),
            },
        );

        info!(
            candidate_id = %candidate.id,
            score,
            threshold = config.hr_score,
            passed,
            "Interview scored"
        );

        if !passed {
            return Ok(AdmissionOutcome::Success { score, passed });
        }

        match self.registry.admit(candidate).await? {
            Admission::Inserted => Ok(AdmissionOutcome::Success { score, passed }),
            Admission::Duplicate => {
                info!("Passing candidate already on file, not stored again");
                Ok(AdmissionOutcome::duplicate())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::CandidateStatus;
    use crate::store::memory::MemoryStore;
    use serde_json::json;

    struct Fixture {
        pipeline: AdmissionPipeline,
        candidates: Arc<MemoryStore<Vec<Candidate>>>,
        registry: Arc<CandidateRegistry>,
    }

    fn fixture(config: InterviewConfig) -> Fixture {
        let candidates: Arc<MemoryStore<Vec<Candidate>>> = Arc::new(MemoryStore::default());
        let registry = Arc::new(CandidateRegistry::new(candidates.clone()));
        let pipeline =
            AdmissionPipeline::new(Arc::new(MemoryStore::seeded(config)), registry.clone());
        Fixture {
            pipeline,
            candidates,
            registry,
        }
    }

    fn threshold(hr_score: f64) -> InterviewConfig {
        InterviewConfig {
            hr_score,
            ..Default::default()
        }
    }

    /// Five exact questions, the first `correct` answered right.
    fn submission(email: &str, correct: usize) -> SubmitRequest {
        let answers: Vec<_> = (0..5)
            .map(|i| {
                let response = if i < correct { i.to_string() } else { "nope".into() };
                json!({
                    "question_obj": { "type": "exact", "answer": i.to_string() },
                    "answer": response,
                })
            })
            .collect();
        serde_json::from_value(json!({
            "candidate": { "email": email, "name": "Ada Lovelace" },
            "answers": answers,
            "resume_filename": "ada.pdf",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_four_of_five_passes_and_persists() {
        let f = fixture(threshold(7.0));

        let outcome = f.pipeline.admit(submission("ada@example.com", 4)).await.unwrap();
        assert_eq!(
            outcome,
            AdmissionOutcome::Success {
                score: 8.0,
                passed: true
            }
        );

        let stored = f.registry.list().await.unwrap();
        assert_eq!(stored.len(), 1);
        let record = &stored[0];
        assert_eq!(record.email, "ada@example.com");
        assert_eq!(record.status, CandidateStatus::Passed);
        assert_eq!(record.score, 8.0);
        assert_eq!(record.resume.as_deref(), Some("ada.pdf"));
        assert_eq!(record.time_limit, 10);
        assert_eq!(record.extra.get("name"), Some(&json!("Ada Lovelace")));
        assert!(record.submitted_at.is_some());
    }

    #[tokio::test]
    async fn test_three_of_five_fails_without_persisting() {
        let f = fixture(threshold(7.0));

        let outcome = f.pipeline.admit(submission("ada@example.com", 3)).await.unwrap();
        assert_eq!(
            outcome,
            AdmissionOutcome::Success {
                score: 6.0,
                passed: false
            }
        );
        assert!(f.registry.list().await.unwrap().is_empty());
        assert_eq!(f.candidates.save_count().await, 0);
    }

    #[tokio::test]
    async fn test_resubmitting_passing_email_reports_duplicate() {
        let f = fixture(threshold(7.0));
        f.pipeline.admit(submission("ada@example.com", 4)).await.unwrap();

        let outcome = f.pipeline.admit(submission("ada@example.com", 5)).await.unwrap();
        assert_eq!(outcome, AdmissionOutcome::duplicate());
        assert_eq!(f.registry.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_resubmission_of_passed_email_is_not_duplicate() {
        let f = fixture(threshold(7.0));
        f.pipeline.admit(submission("ada@example.com", 5)).await.unwrap();

        let outcome = f.pipeline.admit(submission("ada@example.com", 1)).await.unwrap();
        assert_eq!(
            outcome,
            AdmissionOutcome::Success {
                score: 2.0,
                passed: false
            }
        );
    }

    #[tokio::test]
    async fn test_score_equal_to_threshold_passes() {
        let f = fixture(threshold(8.0));
        let outcome = f.pipeline.admit(submission("ada@example.com", 4)).await.unwrap();
        assert_eq!(
            outcome,
            AdmissionOutcome::Success {
                score: 8.0,
                passed: true
            }
        );
    }

    #[tokio::test]
    async fn test_missing_candidate_or_answers_is_validation_error() {
        let f = fixture(InterviewConfig::default());

        let no_candidate = SubmitRequest {
            answers: submission("a@b.com", 1).answers,
            ..Default::default()
        };
        assert!(matches!(
            f.pipeline.admit(no_candidate).await,
            Err(AppError::Validation(_))
        ));

        let mut empty_answers = submission("a@b.com", 1);
        empty_answers.answers = Some(vec![]);
        assert!(matches!(
            f.pipeline.admit(empty_answers).await,
            Err(AppError::Validation(_))
        ));

        let mut empty_candidate = submission("a@b.com", 1);
        empty_candidate.candidate = Some(CandidateProfile::default());
        assert!(matches!(
            f.pipeline.admit(empty_candidate).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_email_is_rejected() {
        let f = fixture(InterviewConfig::default());
        let result = f.pipeline.admit(submission("   ", 5)).await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("email")));
    }

    #[tokio::test]
    async fn test_required_fields_are_enforced() {
        let config: InterviewConfig = serde_json::from_value(json!({
            "hr_score": 5,
            "fields": { "phone": { "label": "Phone", "required": true } }
        }))
        .unwrap();
        let f = fixture(config);

        let result = f.pipeline.admit(submission("ada@example.com", 5)).await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("phone")));
        assert!(f.registry.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_time_limit_comes_from_config() {
        let f = fixture(InterviewConfig {
            hr_score: 0.0,
            hr_time_limit: 25,
            ..Default::default()
        });
        f.pipeline.admit(submission("ada@example.com", 0)).await.unwrap();
        assert_eq!(f.registry.list().await.unwrap()[0].time_limit, 25);
    }

    #[test]
    fn test_outcome_wire_format() {
        let passed = serde_json::to_value(AdmissionOutcome::Success {
            score: 8.0,
            passed: true,
        })
        .unwrap();
        assert_eq!(passed, json!({ "status": "success", "score": 8.0, "passed": true }));

        let duplicate = serde_json::to_value(AdmissionOutcome::duplicate()).unwrap();
        assert_eq!(
            duplicate,
            json!({ "status": "duplicate", "message": "Candidate already exists" })
        );
    }
}
