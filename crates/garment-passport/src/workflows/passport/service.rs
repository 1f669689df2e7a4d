use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{AnswerMap, PassportId, PassportSubmission};
use super::emissions::{CoordinateError, EmissionsEstimator, EmissionsSummary, ModePolicy};
use super::repository::{PassportRecord, PassportRepository, RepositoryError};
use super::rubric::{PassportRubric, TRANSPORT_SCORE_QUESTION};
use super::scoring::{ScoreSummary, ScoringEngine};

/// Service composing the emissions estimator and the scoring engine.
///
/// The two subsystems touch at exactly one point: the estimator's transport
/// sub-score is written into the answer map under the readonly transport
/// question before the rubric is scored.
pub struct PassportService<R> {
    repository: Arc<R>,
    estimator: EmissionsEstimator,
}

static PASSPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_passport_id() -> PassportId {
    let id = PASSPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PassportId(format!("gtp-{id:06}"))
}

impl<R> PassportService<R>
where
    R: PassportRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_policy(repository, ModePolicy::default())
    }

    pub fn with_policy(repository: Arc<R>, policy: ModePolicy) -> Self {
        Self {
            repository,
            estimator: EmissionsEstimator::new(policy),
        }
    }

    /// Issue a new passport, returning the repository-backed record.
    pub fn create(
        &self,
        submission: PassportSubmission,
    ) -> Result<PassportRecord, PassportServiceError> {
        let computation = self.compute(&submission)?;
        let record = PassportRecord {
            id: next_passport_id(),
            order: submission.order,
            waypoints: submission.waypoints,
            answers: computation.answers,
            scores: computation.scores,
            emissions: computation.emissions,
            issued_on: Local::now().date_naive(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            passport_id = %stored.id.0,
            total_score = stored.scores.total,
            emissions_state = stored.emissions_state(),
            "passport issued"
        );
        Ok(stored)
    }

    /// Replace a passport's inputs and recompute wholesale. Scores are never
    /// patched incrementally; every edit recomputes the full result.
    pub fn update(
        &self,
        id: &PassportId,
        submission: PassportSubmission,
    ) -> Result<PassportRecord, PassportServiceError> {
        let existing = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let computation = self.compute(&submission)?;
        let record = PassportRecord {
            id: existing.id,
            order: submission.order,
            waypoints: submission.waypoints,
            answers: computation.answers,
            scores: computation.scores,
            emissions: computation.emissions,
            issued_on: existing.issued_on,
        };

        self.repository.update(record.clone())?;
        info!(
            passport_id = %record.id.0,
            total_score = record.scores.total,
            "passport recomputed"
        );
        Ok(record)
    }

    /// Fetch a stored passport.
    pub fn get(&self, id: &PassportId) -> Result<PassportRecord, PassportServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Run the full computation without persisting anything; backs the live
    /// scorecard in the merchant wizard.
    pub fn preview(
        &self,
        submission: &PassportSubmission,
    ) -> Result<PassportComputation, PassportServiceError> {
        self.compute(submission)
    }

    /// Per-question audit trail as CSV: one row per answered question with
    /// the points it contributed.
    pub fn audit_csv(&self, id: &PassportId) -> Result<String, PassportServiceError> {
        let record = self.get(id)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["question_id", "answer", "points"])
            .map_err(|err| PassportServiceError::Export(err.to_string()))?;
        for row in &record.scores.components {
            writer
                .write_record([
                    row.question_id.as_str(),
                    row.answer.as_str(),
                    row.points.to_string().as_str(),
                ])
                .map_err(|err| PassportServiceError::Export(err.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| PassportServiceError::Export(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| PassportServiceError::Export(err.to_string()))
    }

    fn compute(
        &self,
        submission: &PassportSubmission,
    ) -> Result<PassportComputation, PassportServiceError> {
        let emissions = self
            .estimator
            .estimate(&submission.order.material, &submission.waypoints)?;

        // The transport sub-score is estimator-owned; a caller-supplied value
        // is discarded rather than scored.
        let mut answers = submission.answers.clone();
        answers.remove(TRANSPORT_SCORE_QUESTION);
        if let Some(summary) = &emissions {
            answers.insert(TRANSPORT_SCORE_QUESTION, summary.transport_score.to_string());
        }

        let engine = ScoringEngine::new(PassportRubric::for_material(&submission.order.material));
        let scores = engine.score(&answers);

        Ok(PassportComputation {
            answers,
            emissions,
            scores,
        })
    }
}

/// Output of one estimate → inject → score pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportComputation {
    /// Answer map as scored, including the injected transport sub-score.
    pub answers: AnswerMap,
    pub emissions: Option<EmissionsSummary>,
    pub scores: ScoreSummary,
}

/// Error raised by the passport service.
#[derive(Debug, thiserror::Error)]
pub enum PassportServiceError {
    #[error(transparent)]
    Coordinates(#[from] CoordinateError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("audit export failed: {0}")]
    Export(String),
}
