//! Derived views over a survey: question count and estimated completion time.

use chrono::{DateTime, Utc};
use serde::Serialize;

use enquete_types::{Survey, SurveyId};

/// Crude pacing assumption behind the completion estimate.
pub const QUESTIONS_PER_MINUTE: usize = 3;

/// `max(1, question_count / 3)`, floor division.
pub fn estimated_minutes(question_count: usize) -> usize {
    (question_count / QUESTIONS_PER_MINUTE).max(1)
}

/// `"<n> minutes"`. Always plural, including `"1 minutes"`.
pub fn format_completion_time(question_count: usize) -> String {
    format!("{} minutes", estimated_minutes(question_count))
}

/// Listing entry for one survey.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurveySummary {
    pub id: SurveyId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub question_count: usize,
    pub estimated_completion_time: String,
    pub page_count: usize,
    pub block_count: usize,
}

impl SurveySummary {
    /// Walk a survey and compute its summary.
    pub fn of(survey: &Survey) -> Self {
        let question_count = survey.question_count();
        Self {
            id: survey.id.clone(),
            title: survey.title.clone(),
            description: survey.description.clone(),
            created_at: survey.created_at,
            question_count,
            estimated_completion_time: format_completion_time(question_count),
            page_count: survey.pages.len(),
            block_count: survey.block_count(),
        }
    }
}
