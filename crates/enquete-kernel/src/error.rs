//! Error types for survey operations.

use enquete_types::ModelError;
use strum::{Display, EnumString};

/// Which kind of entity a lookup missed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Entity {
    Survey,
    Page,
    Block,
}

/// Every failure an operation can report.
///
/// All of these come from bad input or a missing entity, so there is
/// nothing to retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurveyError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: Entity, id: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),
}

impl SurveyError {
    pub fn not_found(entity: Entity, id: impl AsRef<str>) -> Self {
        Self::NotFound {
            entity,
            id: id.as_ref().to_string(),
        }
    }

    /// Whether this is a miss on the given entity kind.
    pub fn is_not_found(&self, kind: Entity) -> bool {
        matches!(self, Self::NotFound { entity, .. } if *entity == kind)
    }
}

impl From<ModelError> for SurveyError {
    fn from(e: ModelError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

pub type SurveyResult<T> = Result<T, SurveyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = SurveyError::not_found(Entity::Page, "nonexistent");
        assert_eq!(err.to_string(), "page 'nonexistent' not found");
        assert!(err.is_not_found(Entity::Page));
        assert!(!err.is_not_found(Entity::Block));
    }

    #[test]
    fn test_model_error_becomes_invalid_input() {
        let err: SurveyError = ModelError::EmptyLabel.into();
        assert_eq!(err, SurveyError::InvalidInput("question text must not be empty".into()));
    }
}
