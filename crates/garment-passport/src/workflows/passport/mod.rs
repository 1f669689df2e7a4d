//! Garment transparency passport workflow.
//!
//! Two pure subsystems make up the core: the scoring engine, which folds a
//! sparse answer map over a four-pillar rubric, and the emissions estimator,
//! which turns a chain of supply-chain waypoints into leg distances, mode
//! assignments, and kg CO2e totals. The service glues them together at a
//! single coupling point: the estimator's transport sub-score is injected
//! into the answer map before scoring runs.

pub mod domain;
pub mod emissions;
pub mod report;
pub mod repository;
pub mod router;
pub mod rubric;
pub mod scoring;
pub mod service;

pub use domain::{AnswerMap, OrderSnapshot, PassportId, PassportSubmission, WaypointSet};
pub use emissions::{
    transport_score, CoordinateError, EmissionsEstimator, EmissionsLeg, EmissionsSummary,
    ModePolicy, RouteLocations, TransportMode, Waypoint,
};
pub use report::{EmissionsReportView, PassportReportView, PillarReportView, QuestionReportView};
pub use repository::{PassportRecord, PassportRepository, PassportSummaryView, RepositoryError};
pub use router::passport_router;
pub use rubric::{
    PassportRubric, PillarConfig, QuestionConfig, QuestionKind, SelectOption,
    DYNAMIC_LOOKUP_POINTS, TRANSPORT_SCORE_QUESTION,
};
pub use scoring::{PillarScore, QuestionScore, ScoreSummary, ScoringEngine};
pub use service::{PassportComputation, PassportService, PassportServiceError};
