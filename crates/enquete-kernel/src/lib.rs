//! Survey kernel for enquete.
//!
//! Owns the document store and every rule about how survey documents are
//! created and grown:
//!
//! - `store`: in-memory `SurveyId → Survey` map with per-survey locking
//! - `resolve`: resolve-or-default lookup of the page/block a question goes into
//! - `summary`: question counts and estimated completion time
//! - `service`: the operations (`list_surveys`, `get_survey`,
//!   `create_survey`, `add_question`, `add_page`, `add_block`)
//! - `config`: RON configuration (default container titles, server identity)
//!
//! There is no persistence. Dropping the last `SurveyService` clone drops
//! every survey.

pub mod config;
pub mod error;
pub mod resolve;
pub mod service;
pub mod store;
pub mod summary;

pub use config::{Defaults, EnqueteConfig, ServerSettings};
pub use error::{Entity, SurveyError, SurveyResult};
pub use resolve::{Container, Placement, Slot, resolve_container};
pub use service::{
    AddBlock, AddQuestion, CreateSurvey, Created, IdField, QuestionPlacement, SurveyService,
};
pub use store::{SharedSurveyStore, SurveyStore, shared_survey_store};
pub use summary::{SurveySummary, estimated_minutes, format_completion_time};
