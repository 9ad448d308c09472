//! The survey document tree: Survey → Page → Block → Question.
//!
//! Every child is owned by its parent; there are no back references. The
//! only cross-document index is the store's map from `SurveyId` to survey.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::EnumString;

use crate::ids::{BlockId, PageId, QuestionId, SurveyId};
use crate::question::Question;

/// How a block's questions would be ordered when presented.
///
/// Only the descriptor is modeled. Nothing in this workspace shuffles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum RandomizationMode {
    #[default]
    None,
    /// Shuffle every question.
    Full,
    /// Present a random subset (size lives in `settings`).
    Subset,
}

impl RandomizationMode {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RandomizationMode::None => "none",
            RandomizationMode::Full => "full",
            RandomizationMode::Subset => "subset",
        }
    }
}

/// Per-block randomization descriptor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Randomization {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub mode: RandomizationMode,
    /// Opaque mode-specific settings.
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl Randomization {
    /// Randomization switched off (`{enabled: false, type: "none"}`).
    pub fn disabled() -> Self {
        Self::default()
    }

    /// An enabled descriptor for `mode`. `None` stays disabled.
    pub fn with_mode(mode: RandomizationMode, settings: Map<String, Value>) -> Self {
        Self {
            enabled: mode != RandomizationMode::None,
            mode,
            settings,
        }
    }
}

/// A group of questions sharing a randomization descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub title: String,
    pub randomization: Randomization,
    pub questions: Vec<Question>,
}

impl Block {
    /// A new empty block with randomization disabled.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(),
            title: title.into(),
            randomization: Randomization::disabled(),
            questions: Vec::new(),
        }
    }

    pub fn find_question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }
}

/// A page of blocks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Page {
    /// A new page with no blocks.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: PageId::new(),
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Position of the block with `id` on this page.
    pub fn block_index(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    /// Number of questions across this page's blocks.
    pub fn question_count(&self) -> usize {
        self.blocks.iter().map(|b| b.questions.len()).sum()
    }
}

/// A full survey document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Set once at creation, serialized as ISO-8601.
    pub created_at: DateTime<Utc>,
    pub pages: Vec<Page>,
}

impl Survey {
    /// A new survey with no pages.
    ///
    /// Callers that hand the survey to a store are expected to bootstrap at
    /// least one page first; see `SurveyService::create_survey`.
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: SurveyId::new(),
            title: title.into(),
            description,
            created_at: Utc::now(),
            pages: Vec::new(),
        }
    }

    /// Position of the page with `id`.
    pub fn page_index(&self, id: &PageId) -> Option<usize> {
        self.pages.iter().position(|p| &p.id == id)
    }

    pub fn find_page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    /// Every block, in page order then block order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    /// Every question, in document order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.blocks().flat_map(|b| b.questions.iter())
    }

    /// Find a block anywhere in the survey.
    pub fn find_block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks().find(|b| &b.id == id)
    }

    /// Find a question anywhere in the survey.
    pub fn find_question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions().find(|q| &q.id == id)
    }

    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }

    /// Sum of question counts over every block of every page.
    pub fn question_count(&self) -> usize {
        self.pages.iter().map(Page::question_count).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
