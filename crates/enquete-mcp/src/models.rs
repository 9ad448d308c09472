//! MCP request types.
//!
//! These define the parameters of the enquete tools. Responses are JSON
//! strings built from kernel types.

use rmcp::schemars;
use serde::Deserialize;

fn default_true() -> bool {
    true
}

// ============================================================================
// Survey Tools
// ============================================================================

/// Create a new survey.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateSurveyRequest {
    /// Survey title
    #[schemars(description = "Survey title (must not be empty)")]
    pub title: String,
    /// Optional description
    #[schemars(description = "Optional description shown with the survey")]
    pub description: Option<String>,
}

/// Fetch one survey document.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSurveyRequest {
    #[schemars(description = "Survey ID (e.g. survey_1f3a9c02)")]
    pub survey_id: String,
}

/// One answer option for a choice question.
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct OptionInput {
    #[schemars(description = "Option text shown to respondents")]
    pub text: String,
}

/// Add a question to a survey.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddQuestionRequest {
    #[schemars(description = "Survey ID to add the question to")]
    pub survey_id: String,
    /// Target page (omit for the first page)
    #[schemars(description = "Target page ID (omit to use the first page, created if missing)")]
    pub page_id: Option<String>,
    /// Target block (omit for the first block of the page)
    #[schemars(description = "Target block ID within the page (omit to use the page's first block, created if missing)")]
    pub block_id: Option<String>,
    #[schemars(description = "Question type: single_select, multi_select, open_text, dropdown, numeric, or rating")]
    pub question_type: String,
    #[schemars(description = "The question text")]
    pub question_text: String,
    #[schemars(description = "Whether an answer is required (default: true)")]
    #[serde(default = "default_true")]
    pub required: bool,
    #[schemars(description = "Answer options, required for single_select, multi_select, and dropdown")]
    pub options: Option<Vec<OptionInput>>,

    // Type-specific attributes. Each is rejected on types it doesn't apply to.
    #[schemars(description = "multi_select: minimum number of selections")]
    pub min_selections: Option<u32>,
    #[schemars(description = "multi_select: maximum number of selections")]
    pub max_selections: Option<u32>,
    #[schemars(description = "numeric: smallest accepted value")]
    pub min_value: Option<f64>,
    #[schemars(description = "numeric: largest accepted value")]
    pub max_value: Option<f64>,
    #[schemars(description = "rating: number of points on the scale, 2-10 (default: 5)")]
    pub scale: Option<u32>,
    #[schemars(description = "single_select: option layout, vertical or horizontal")]
    pub display: Option<String>,
    #[schemars(description = "open_text: allow multi-line answers")]
    pub multiline: Option<bool>,
    #[schemars(description = "open_text or dropdown: placeholder text")]
    pub placeholder: Option<String>,
}

/// Append a page to a survey.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddPageRequest {
    #[schemars(description = "Survey ID to add the page to")]
    pub survey_id: String,
    #[schemars(description = "Page title")]
    pub title: String,
}

/// Append a block to a page.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddBlockRequest {
    #[schemars(description = "Survey ID to add the block to")]
    pub survey_id: String,
    #[schemars(description = "Page ID to add the block to (omit for the first page)")]
    pub page_id: Option<String>,
    #[schemars(description = "Block title")]
    pub title: String,
    /// Randomization mode for the block's questions
    #[schemars(description = "Question randomization: none (default), full, or subset")]
    pub randomization: Option<String>,
    #[schemars(description = "Mode-specific randomization settings (e.g. {\"subset_size\": 3})")]
    pub randomization_settings: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Render a survey as an ASCII tree.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SurveyOutlineRequest {
    #[schemars(description = "Survey ID to outline")]
    pub survey_id: String,
    /// Maximum tree depth to display
    #[schemars(description = "Maximum depth: 1 = pages, 2 = blocks, 3 = questions, 4 = options (omit for full tree)")]
    pub max_depth: Option<u32>,
}
