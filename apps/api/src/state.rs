use std::sync::Arc;

use crate::auth::Authenticator;
use crate::config::Config;
use crate::interview::admission::AdmissionPipeline;
use crate::interview::models::InterviewConfig;
use crate::interview::registry::CandidateRegistry;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Interview configuration document (threshold, time limit, form fields).
    pub settings: Arc<dyn DocumentStore<InterviewConfig>>,
    /// Passed-candidate list. Sole writer of the candidate document.
    pub candidates: Arc<CandidateRegistry>,
    pub admissions: AdmissionPipeline,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(
        config: Config,
        settings: Arc<dyn DocumentStore<InterviewConfig>>,
        candidates: Arc<CandidateRegistry>,
        auth: Authenticator,
    ) -> Self {
        let admissions = AdmissionPipeline::new(settings.clone(), candidates.clone());
        Self {
            config,
            settings,
            candidates,
            admissions,
            auth: Arc::new(auth),
        }
    }
}
