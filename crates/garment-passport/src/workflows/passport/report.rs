//! Plain-data report views for external renderers.
//!
//! The HTML/PDF passport layout lives outside this crate; these views carry
//! everything it needs — labels, answers, per-question points, and the
//! emissions legs — without any rendering logic.

use chrono::NaiveDate;
use serde::Serialize;

use super::emissions::EmissionsLeg;
use super::repository::PassportRecord;
use super::rubric::PassportRubric;

#[derive(Debug, Clone, Serialize)]
pub struct PassportReportView {
    pub passport_id: String,
    pub order_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    pub material: String,
    pub issued_on: NaiveDate,
    pub total_score: u32,
    pub max_total: u32,
    pub pillars: Vec<PillarReportView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissions: Option<EmissionsReportView>,
    pub emissions_state: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PillarReportView {
    pub pillar_id: String,
    pub title: String,
    pub description: String,
    pub scoring_guide: String,
    pub score: u32,
    pub max_score: u32,
    pub questions: Vec<QuestionReportView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionReportView {
    pub question_id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmissionsReportView {
    pub legs: Vec<EmissionsLeg>,
    pub total_distance_km: u32,
    pub total_emissions_kg: f64,
    pub transport_score: u32,
}

impl PassportReportView {
    pub fn build(record: &PassportRecord) -> Self {
        let rubric = PassportRubric::for_material(&record.order.material);

        let pillars = rubric
            .pillars()
            .iter()
            .map(|pillar| {
                let questions = pillar
                    .questions
                    .iter()
                    .map(|question| {
                        let answer = record.answers.get(question.id).map(str::to_string);
                        let points = record
                            .scores
                            .component(question.id)
                            .map(|component| component.points)
                            .unwrap_or(0);
                        QuestionReportView {
                            question_id: question.id.to_string(),
                            label: question.label.to_string(),
                            answer,
                            points,
                        }
                    })
                    .collect();

                let score = record
                    .scores
                    .pillar(pillar.id)
                    .map(|scored| scored.score)
                    .unwrap_or(0);

                PillarReportView {
                    pillar_id: pillar.id.to_string(),
                    title: pillar.title.to_string(),
                    description: pillar.description.to_string(),
                    scoring_guide: pillar.scoring_guide.to_string(),
                    score,
                    max_score: pillar.max_score,
                    questions,
                }
            })
            .collect();

        let emissions = record.emissions.as_ref().map(|summary| EmissionsReportView {
            legs: summary.legs.clone(),
            total_distance_km: summary.total_distance_km,
            total_emissions_kg: summary.total_emissions_kg,
            transport_score: summary.transport_score,
        });

        Self {
            passport_id: record.id.0.clone(),
            order_name: record.order.order_name.clone(),
            product_title: record.order.product_title.clone(),
            material: record.order.material.clone(),
            issued_on: record.issued_on,
            total_score: record.scores.total,
            max_total: rubric.max_total(),
            pillars,
            emissions,
            emissions_state: record.emissions_state(),
        }
    }
}
