mod rules;

use serde::{Deserialize, Serialize};

use super::domain::AnswerMap;
use super::rubric::PassportRubric;

/// Stateless engine applying the rubric to a sparse answer map.
///
/// Pure and total: it never fails, and identical inputs always produce
/// identical output. Answers whose keys are not in the rubric are ignored.
pub struct ScoringEngine {
    rubric: PassportRubric,
}

impl ScoringEngine {
    pub fn new(rubric: PassportRubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &PassportRubric {
        &self.rubric
    }

    pub fn score(&self, answers: &AnswerMap) -> ScoreSummary {
        let mut pillars = Vec::with_capacity(self.rubric.pillars().len());
        let mut components = Vec::new();
        let mut total = 0;

        for pillar in self.rubric.pillars() {
            let mut raw_score = 0;
            for question in &pillar.questions {
                let answer = answers.get(question.id);
                let points = rules::question_points(question, answer);
                raw_score += points;

                if let Some(value) = answer {
                    components.push(QuestionScore {
                        question_id: question.id.to_string(),
                        answer: value.to_string(),
                        points,
                    });
                }
            }

            let score = raw_score.min(pillar.max_score);
            total += score;
            pillars.push(PillarScore {
                pillar_id: pillar.id.to_string(),
                title: pillar.title.to_string(),
                score,
                max_score: pillar.max_score,
            });
        }

        ScoreSummary {
            pillars,
            total,
            components,
        }
    }
}

/// Capped score of one pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScore {
    pub pillar_id: String,
    pub title: String,
    pub score: u32,
    pub max_score: u32,
}

/// Contribution of a single answered question, re-exposed for audit trails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question_id: String,
    pub answer: String,
    pub points: u32,
}

/// Four capped pillar scores plus their total, with per-question detail.
///
/// The total is defined as the direct sum of the capped pillar scores and
/// lies in [0, 100] by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub pillars: Vec<PillarScore>,
    pub total: u32,
    pub components: Vec<QuestionScore>,
}

impl ScoreSummary {
    pub fn pillar(&self, pillar_id: &str) -> Option<&PillarScore> {
        self.pillars
            .iter()
            .find(|pillar| pillar.pillar_id == pillar_id)
    }

    pub fn component(&self, question_id: &str) -> Option<&QuestionScore> {
        self.components
            .iter()
            .find(|component| component.question_id == question_id)
    }
}
