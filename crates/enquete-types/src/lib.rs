//! Identity and document types for enquete.
//!
//! This crate is the document model: typed IDs, the survey tree, and the
//! question-type sum type. It has **no internal enquete dependencies**, a
//! pure leaf crate that the kernel and MCP server build on.
//!
//! # Ownership Overview
//!
//! ```text
//! Survey (SurveyId)
//!     └── Page (PageId, unique within survey)
//!           └── Block (BlockId, unique within survey)
//!                 └── Randomization descriptor (exactly one)
//!                 └── Question (QuestionId, unique within survey)
//!                       └── QuestionKind (tagged by QuestionType)
//!                             └── Choice (OptionId, positional within question)
//! ```
//!
//! # Key Types
//!
//! |----------------------|---------------------------------------------|
//! | Type                 | Purpose                                     |
//! |----------------------|---------------------------------------------|
//! | [`Survey`]           | Root document (title, created_at, pages)    |
//! | [`Page`] / [`Block`] | Containers                                  |
//! | [`Question`]         | Label + required + typed payload            |
//! | [`QuestionKind`]     | Per-type attributes, validated on build     |
//! | [`QuestionType`]     | Bare type tag, parsed from caller strings   |
//! | [`TypeDescriptor`]   | Read-model entry for the type catalog       |
//! |----------------------|---------------------------------------------|

pub mod ids;
pub mod question;
pub mod survey;

pub use ids::{BlockId, OptionId, PageId, QuestionId, SurveyId, new_id};
pub use question::{
    Choice, DisplayStyle, ModelError, Question, QuestionAttributes, QuestionKind, QuestionType,
    TypeDescriptor, question_type_catalog,
};
pub use survey::{Block, Page, Randomization, RandomizationMode, Survey};
