use garment_passport::error::AppError;
use garment_passport::workflows::passport::{
    PassportId, PassportRecord, PassportRepository, PassportSubmission, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPassportRepository {
    records: Arc<Mutex<HashMap<PassportId, PassportRecord>>>,
}

impl PassportRepository for InMemoryPassportRepository {
    fn insert(&self, record: PassportRecord) -> Result<PassportRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: PassportRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &PassportId) -> Result<Option<PassportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Load a merchant submission from a JSON file for the CLI paths.
pub(crate) fn read_submission(path: &Path) -> Result<PassportSubmission, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let submission = serde_json::from_str(&raw)?;
    Ok(submission)
}
