use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AnswerMap, OrderSnapshot, PassportId, WaypointSet};
use super::emissions::EmissionsSummary;
use super::scoring::ScoreSummary;

/// Stored passport: the merchant inputs plus every computed artifact, so
/// report rendering never recomputes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportRecord {
    pub id: PassportId,
    pub order: OrderSnapshot,
    pub waypoints: WaypointSet,
    /// Answer map as scored, including the injected transport sub-score.
    pub answers: AnswerMap,
    pub scores: ScoreSummary,
    /// Absent while the waypoint chain is incomplete.
    pub emissions: Option<EmissionsSummary>,
    pub issued_on: NaiveDate,
}

impl PassportRecord {
    pub fn emissions_state(&self) -> &'static str {
        match self.emissions {
            Some(_) => "estimated",
            None => "awaiting_waypoints",
        }
    }

    pub fn summary_view(&self) -> PassportSummaryView {
        PassportSummaryView {
            passport_id: self.id.clone(),
            order_name: self.order.order_name.clone(),
            material: self.order.material.clone(),
            total_score: self.scores.total,
            max_total: 100,
            pillar_scores: self
                .scores
                .pillars
                .iter()
                .map(|pillar| (pillar.pillar_id.clone(), pillar.score))
                .collect(),
            total_emissions_kg: self
                .emissions
                .as_ref()
                .map(|summary| summary.total_emissions_kg),
            emissions_state: self.emissions_state(),
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation; the
/// production store (D1/SQL behind the Shopify app) lives outside this crate.
pub trait PassportRepository: Send + Sync {
    fn insert(&self, record: PassportRecord) -> Result<PassportRecord, RepositoryError>;
    fn update(&self, record: PassportRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PassportId) -> Result<Option<PassportRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("passport already exists")]
    Conflict,
    #[error("passport not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact representation returned by the create/update endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PassportSummaryView {
    pub passport_id: PassportId,
    pub order_name: String,
    pub material: String,
    pub total_score: u32,
    pub max_total: u32,
    pub pillar_scores: BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_emissions_kg: Option<f64>,
    pub emissions_state: &'static str,
}

#[cfg(test)]
mod tests {
    use super::super::scoring::{PillarScore, ScoreSummary};
    use super::*;

    fn record() -> PassportRecord {
        PassportRecord {
            id: PassportId("gtp-000001".to_string()),
            order: OrderSnapshot {
                order_name: "#1042".to_string(),
                product_title: Some("Two-piece suit".to_string()),
                material: "Wool".to_string(),
            },
            waypoints: WaypointSet::default(),
            answers: AnswerMap::new(),
            scores: ScoreSummary {
                pillars: vec![PillarScore {
                    pillar_id: "pillar_1".to_string(),
                    title: "Pillar 1: Fibre & Material Health".to_string(),
                    score: 12,
                    max_score: 25,
                }],
                total: 12,
                components: Vec::new(),
            },
            emissions: None,
            issued_on: NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date"),
        }
    }

    #[test]
    fn summary_view_reports_awaiting_waypoints_without_emissions() {
        let view = record().summary_view();
        assert_eq!(view.emissions_state, "awaiting_waypoints");
        assert!(view.total_emissions_kg.is_none());
        assert_eq!(view.pillar_scores.get("pillar_1"), Some(&12));
        assert_eq!(view.total_score, 12);
    }
}
