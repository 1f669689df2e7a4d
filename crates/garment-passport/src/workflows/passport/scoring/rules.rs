use super::super::rubric::{QuestionConfig, QuestionKind, DYNAMIC_LOOKUP_POINTS};

/// Points contributed by a single question given its raw answer.
///
/// A missing, stale, or unparseable answer contributes zero rather than
/// failing the computation.
pub(crate) fn question_points(question: &QuestionConfig, answer: Option<&str>) -> u32 {
    let Some(raw) = answer else {
        return 0;
    };

    match question.kind {
        QuestionKind::ReadonlyScore => raw.trim().parse::<u32>().unwrap_or(0),
        QuestionKind::Checkbox => question
            .options
            .first()
            .filter(|option| option.value == raw)
            .map(|option| option.points)
            .unwrap_or(0),
        QuestionKind::Select => question
            .options
            .iter()
            .find(|option| option.value == raw)
            .map(|option| option.points)
            .unwrap_or(0),
        QuestionKind::DynamicLookup => {
            if raw.trim().is_empty() {
                0
            } else {
                DYNAMIC_LOOKUP_POINTS
            }
        }
    }
}
