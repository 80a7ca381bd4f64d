//! Shared server state.
//!
//! Every handler sees the same store, access control and sampler. None of
//! them hold per-request data, so the state is cloned freely.

use std::sync::Arc;

use crate::auth::AccessControl;
use crate::config::Settings;
use crate::ingest::IngestPolicy;
use crate::selection::{Sampler, ThreadRngSampler};
use crate::store::{QuestionStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    /// Persisted question bank.
    pub store: Arc<dyn QuestionStore>,
    /// Credential checks for users and the administrator.
    pub access: Arc<dyn AccessControl>,
    /// Source of randomness for draws.
    pub sampler: Arc<dyn Sampler>,
    /// Ingestion strictness.
    pub ingest: IngestPolicy,
}

impl AppState {
    pub fn new(
        store: Arc<dyn QuestionStore>,
        access: Arc<dyn AccessControl>,
        sampler: Arc<dyn Sampler>,
        ingest: IngestPolicy,
    ) -> Self {
        Self {
            store,
            access,
            sampler,
            ingest,
        }
    }

    /// Wire up the state described by `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, StoreError> {
        Ok(Self::new(
            settings.open_store()?,
            Arc::new(settings.access_control()),
            Arc::new(ThreadRngSampler),
            settings.ingest_policy(),
        ))
    }
}
