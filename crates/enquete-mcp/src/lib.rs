//! MCP server exposing enquete survey operations.
//!
//! Provides tools for creating surveys and growing them question by question
//! via Model Context Protocol, so agents can draft questionnaires without
//! building page/block structure up front.
//!
//! Every tool returns a JSON string. Failures come back as
//! `{"error": "<message>"}` rather than protocol errors, so a caller always
//! gets a well-formed response.
//!
//! ## Module Structure
//!
//! - `models`: Request types for MCP tools
//! - `helpers`: Parsing and response utilities
//! - `tree`: Survey visualization as ASCII tree

mod helpers;
mod models;
mod tree;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, router::prompt::PromptRouter, wrapper::Parameters},
    model::{
        // Prompt types
        GetPromptRequestParams, GetPromptResult, ListPromptsResult,
        PaginatedRequestParams, PromptMessage, PromptMessageRole,
        // Resource types
        AnnotateAble, RawResource, ReadResourceRequestParams, ReadResourceResult, ResourceContents,
        ListResourcesResult,
        // Completion types
        CompleteRequestParams, CompleteResult, CompletionInfo,
        // Logging types
        SetLevelRequestParams, LoggingLevel,
        // Cancellation types
        CancelledNotificationParam,
        // Server types
        ServerCapabilities, ServerInfo,
    },
    prompt, prompt_handler, prompt_router, tool, tool_handler, tool_router,
    schemars::JsonSchema,
    service::{NotificationContext, RequestContext},
};

use std::sync::{Arc, Mutex};
use serde::{Deserialize, Serialize};

use enquete_kernel::{
    AddBlock, AddQuestion, CreateSurvey, Created, EnqueteConfig, QuestionPlacement,
    ServerSettings, SurveyService,
};
use enquete_types::{BlockId, PageId, QuestionId, Randomization, SurveyId, question_type_catalog};

// Re-export public types
pub use models::*;
use helpers::*;
use tree::format_survey_tree;

const SURVEYS_URI: &str = "enquete://surveys";
const SURVEY_URI_PREFIX: &str = "enquete://surveys/";
const QUESTION_TYPES_URI: &str = "enquete://question-types";

const DEFAULT_INSTRUCTIONS: &str = "Survey authoring server. Create a survey with create_survey, then add questions with add_question; pages and blocks are created on demand when page_id/block_id are omitted. Use list_surveys and get_survey to inspect, survey_outline for a compact tree, and question_types for the attributes each question type accepts.";

// ============================================================================
// Prompt Argument Types
// ============================================================================

/// Arguments for the survey drafting prompt
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Survey drafting parameters")]
pub struct DraftSurveyArgs {
    #[schemars(description = "What the survey is about (e.g. 'onboarding experience')")]
    pub topic: String,
    #[schemars(description = "Target number of questions (default: 8)")]
    pub question_count: Option<u32>,
}

/// `add_question` result: the new ID plus where it landed.
#[derive(Serialize)]
struct QuestionAdded {
    #[serde(flatten)]
    created: Created<QuestionId>,
    #[serde(flatten)]
    placement: QuestionPlacement,
}

// ============================================================================
// EnqueteMcp Server
// ============================================================================

/// Shared state for server-side MCP features.
#[derive(Clone)]
pub struct McpServerState {
    /// Current logging level (default: info)
    pub log_level: Arc<Mutex<LoggingLevel>>,
}

impl Default for McpServerState {
    fn default() -> Self {
        Self {
            log_level: Arc::new(Mutex::new(LoggingLevel::Info)),
        }
    }
}

/// MCP server exposing enquete survey operations.
#[derive(Clone)]
pub struct EnqueteMcp {
    service: SurveyService,
    settings: ServerSettings,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
    server_state: McpServerState,
}

impl std::fmt::Debug for EnqueteMcp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnqueteMcp")
            .field("service", &self.service)
            .field("name", &self.settings.name)
            .field("tool_router", &self.tool_router)
            .finish()
    }
}

impl EnqueteMcp {
    /// Create a new MCP server around an existing service.
    pub fn with_service(service: SurveyService, settings: ServerSettings) -> Self {
        Self {
            service,
            settings,
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
            server_state: McpServerState::default(),
        }
    }

    /// Create a new MCP server with an empty in-memory store.
    pub fn new() -> Self {
        Self::from_config(&EnqueteConfig::default())
    }

    /// Create a server from loaded configuration.
    pub fn from_config(config: &EnqueteConfig) -> Self {
        Self::with_service(
            SurveyService::new(config.defaults.clone()),
            config.server.clone(),
        )
    }

    /// The service behind the tools.
    pub fn service(&self) -> &SurveyService {
        &self.service
    }
}

impl Default for EnqueteMcp {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl EnqueteMcp {
    // ========================================================================
    // Survey Tools
    // ========================================================================

    #[tool(description = "Create a new survey. It starts with one page holding one empty block, ready for add_question.")]
    fn create_survey(&self, Parameters(req): Parameters<CreateSurveyRequest>) -> String {
        match self.service.create_survey(CreateSurvey {
            title: req.title,
            description: req.description,
        }) {
            Ok(created) => to_json(&created),
            Err(e) => error_response(e),
        }
    }

    #[tool(description = "List all surveys with question counts and estimated completion time, in creation order.")]
    fn list_surveys(&self) -> String {
        let surveys = self.service.list_surveys();
        serde_json::json!({
            "surveys": surveys,
        }).to_string()
    }

    #[tool(description = "Get the full survey document: pages, blocks, questions, and options.")]
    fn get_survey(&self, Parameters(req): Parameters<GetSurveyRequest>) -> String {
        match self.service.get_survey(&SurveyId::from(req.survey_id)) {
            Ok(survey) => serde_json::json!({
                "survey": survey,
            }).to_string(),
            Err(e) => error_response(e),
        }
    }

    #[tool(description = "Add a question to a survey. Omit page_id/block_id to use the first page and block (created if missing); IDs that are given must exist.")]
    fn add_question(&self, Parameters(req): Parameters<AddQuestionRequest>) -> String {
        let survey_id = SurveyId::from(req.survey_id.as_str());
        let page_id = req.page_id.as_deref().map(PageId::from);
        let block_id = req.block_id.as_deref().map(BlockId::from);

        // A missing target outranks a malformed question.
        let parsed = parse_question_type(&req.question_type)
            .ok_or_else(|| format!(
                "invalid question_type '{}'. Use: {}",
                req.question_type,
                question_type_names()
            ))
            .and_then(|t| question_attributes(&req).map(|a| (t, a)));
        let (question_type, attributes) = match parsed {
            Ok(p) => p,
            Err(msg) => {
                return match self.service.check_target(&survey_id, page_id.as_ref(), block_id.as_ref()) {
                    Err(e) => error_response(e),
                    Ok(()) => error_response(msg),
                };
            }
        };

        let AddQuestionRequest {
            question_text,
            required,
            options,
            ..
        } = req;

        let request = AddQuestion {
            survey_id,
            page_id,
            block_id,
            question_type,
            question_text,
            required,
            options: options
                .unwrap_or_default()
                .into_iter()
                .map(|o| o.text)
                .collect(),
            attributes,
        };

        match self.service.add_question_placed(request) {
            Ok((created, placement)) => to_json(&QuestionAdded { created, placement }),
            Err(e) => error_response(e),
        }
    }

    #[tool(description = "Append a new, empty page to the end of a survey.")]
    fn add_page(&self, Parameters(req): Parameters<AddPageRequest>) -> String {
        match self.service.add_page(&SurveyId::from(req.survey_id), req.title) {
            Ok(created) => to_json(&created),
            Err(e) => error_response(e),
        }
    }

    #[tool(description = "Append a new, empty block to a page, optionally with a question randomization mode (none, full, subset).")]
    fn add_block(&self, Parameters(req): Parameters<AddBlockRequest>) -> String {
        let randomization = match req.randomization.as_deref() {
            Some(s) => match parse_randomization_mode(s) {
                Some(mode) => Some(Randomization::with_mode(
                    mode,
                    req.randomization_settings.unwrap_or_default(),
                )),
                None => return error_response(format!(
                    "invalid randomization '{}'. Use: none, full, or subset",
                    s
                )),
            },
            None => None,
        };

        match self.service.add_block(AddBlock {
            survey_id: SurveyId::from(req.survey_id),
            page_id: req.page_id.map(PageId::from),
            title: req.title,
            randomization,
        }) {
            Ok(created) => to_json(&created),
            Err(e) => error_response(e),
        }
    }

    #[tool(description = "Display a survey as a compact ASCII tree of pages, blocks, questions (* = required), and options.")]
    fn survey_outline(&self, Parameters(req): Parameters<SurveyOutlineRequest>) -> String {
        let survey = match self.service.get_survey(&SurveyId::from(req.survey_id)) {
            Ok(s) => s,
            Err(e) => return error_response(e),
        };
        let summary = enquete_kernel::SurveySummary::of(&survey);

        let mut out = format_survey_tree(&survey, req.max_depth).join("\n");
        out.push_str(&format!(
            "\n\n{} questions, about {}",
            summary.question_count, summary.estimated_completion_time
        ));
        out
    }

    #[tool(description = "Describe every question type: which attributes it requires and which are optional.")]
    fn question_types(&self) -> String {
        serde_json::json!({
            "question_types": self.service.question_types(),
        }).to_string()
    }
}

// ============================================================================
// Prompts
// ============================================================================

#[prompt_router]
impl EnqueteMcp {
    /// Guide an agent through drafting a survey with the tools.
    #[prompt(
        name = "draft_survey",
        description = "Step-by-step guidance for drafting a survey on a topic using the enquete tools"
    )]
    fn draft_survey(
        &self,
        Parameters(args): Parameters<DraftSurveyArgs>,
    ) -> Result<GetPromptResult, McpError> {
        if args.topic.trim().is_empty() {
            return Err(McpError::invalid_params("topic must not be empty", None));
        }
        let count = args.question_count.unwrap_or(8);

        let mut content = String::new();
        content.push_str(&format!("# Draft a survey: {}\n\n", args.topic));
        content.push_str(&format!(
            "Aim for about {count} questions. At three questions per minute that is roughly {}.\n\n",
            enquete_kernel::format_completion_time(count as usize)
        ));
        content.push_str("## Steps\n\n");
        content.push_str("1. Call `create_survey` with a short title and a one-line description.\n");
        content.push_str("2. For each question, pick the most fitting type and call `add_question`.\n");
        content.push_str("   Leave `page_id`/`block_id` out unless you created extra pages or blocks.\n");
        content.push_str("3. Group related questions with `add_page` / `add_block` when the survey has distinct sections.\n");
        content.push_str("4. Finish with `survey_outline` and check the structure reads well.\n\n");

        content.push_str("## Question types\n\n");
        for d in question_type_catalog() {
            content.push_str(&format!("- **{}**: {}", d.question_type, d.description));
            if !d.required.is_empty() {
                content.push_str(&format!(" (requires: {})", d.required.join(", ")));
            }
            if !d.optional.is_empty() {
                content.push_str(&format!(" (optional: {})", d.optional.join(", ")));
            }
            content.push('\n');
        }

        content.push_str("\n## Examples\n\n");
        content.push_str("- \"Did you find our website easy to navigate? (Yes / No)\" → single_select, options [Yes, No]\n");
        content.push_str("- \"Which features do you use? (select all that apply)\" → multi_select\n");
        content.push_str("- \"About how many hours per week do you use the platform?\" → numeric, min_value 0\n");

        Ok(GetPromptResult::new(vec![PromptMessage::new(
            PromptMessageRole::User,
            rmcp::model::PromptMessageContent::Text {
                text: content,
            },
        )])
        .with_description(format!("Drafting guidance for a survey on '{}'", args.topic)))
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for EnqueteMcp {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .enable_logging()
                .enable_completions()
                .build(),
        )
        .with_instructions(
            self.settings
                .instructions
                .clone()
                .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
        );
        info.server_info.name = self.settings.name.clone();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// List available resources.
    ///
    /// Resources exposed:
    /// - `enquete://surveys` - Summaries of all surveys
    /// - `enquete://surveys/{survey_id}` - Full survey document
    /// - `enquete://question-types` - Question type catalog
    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            let mut resources = Vec::new();

            resources.push(RawResource {
                uri: SURVEYS_URI.to_string(),
                name: "surveys".to_string(),
                title: Some("All Surveys".to_string()),
                description: Some("Summaries of every survey, in creation order".to_string()),
                mime_type: Some("application/json".to_string()),
                size: None,
                icons: None,
                meta: None,
            }.no_annotation());

            resources.push(RawResource {
                uri: QUESTION_TYPES_URI.to_string(),
                name: "question-types".to_string(),
                title: Some("Question Types".to_string()),
                description: Some("Required and optional attributes for each question type".to_string()),
                mime_type: Some("application/json".to_string()),
                size: None,
                icons: None,
                meta: None,
            }.no_annotation());

            for summary in self.service.list_surveys() {
                resources.push(RawResource {
                    uri: format!("{}{}", SURVEY_URI_PREFIX, summary.id),
                    name: summary.id.to_string(),
                    title: Some(format!("Survey: {}", summary.title)),
                    description: Some(format!(
                        "{} questions, {}",
                        summary.question_count,
                        summary.estimated_completion_time
                    )),
                    mime_type: Some("application/json".to_string()),
                    size: None,
                    icons: None,
                    meta: None,
                }.no_annotation());
            }

            Ok(ListResourcesResult {
                meta: None,
                next_cursor: None,
                resources,
            })
        }
    }

    /// Read a specific resource.
    fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            let uri = &request.uri;

            if uri == SURVEYS_URI {
                let content = to_pretty_json(&self.service.list_surveys());
                return Ok(ReadResourceResult::new(vec![ResourceContents::text(content, uri.clone())]));
            }

            if uri == QUESTION_TYPES_URI {
                let content = to_pretty_json(&question_type_catalog());
                return Ok(ReadResourceResult::new(vec![ResourceContents::text(content, uri.clone())]));
            }

            if let Some(survey_id) = uri.strip_prefix(SURVEY_URI_PREFIX) {
                let survey = self.service.get_survey(&SurveyId::from(survey_id))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                return Ok(ReadResourceResult::new(vec![ResourceContents::text(to_pretty_json(&survey), uri.clone())]));
            }

            Err(McpError::invalid_params(
                format!("Unknown resource URI: {}", uri),
                None
            ))
        }
    }

    // ========================================================================
    // Completion
    // ========================================================================

    /// Complete survey IDs in resource URIs.
    fn complete(
        &self,
        request: CompleteRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CompleteResult, McpError>> + Send + '_ {
        async move {
            let values = match &request.r#ref {
                rmcp::model::Reference::Resource(resource_ref)
                    if resource_ref.uri.starts_with(SURVEYS_URI) =>
                {
                    self.service.store().list_ids().into_iter()
                        .map(|id| format!("{}{}", SURVEY_URI_PREFIX, id))
                        .filter(|uri| uri.contains(&request.argument.value))
                        .take(10)
                        .collect()
                }
                _ => Vec::new(),
            };

            Ok(CompleteResult::new(CompletionInfo {
                values,
                total: None,
                has_more: Some(false),
            }))
        }
    }

    // ========================================================================
    // Logging
    // ========================================================================

    /// Set the logging level.
    fn set_level(
        &self,
        request: SetLevelRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), McpError>> + Send + '_ {
        async move {
            let mut level = self.server_state.log_level.lock()
                .map_err(|_| McpError::internal_error("Lock error", None))?;
            *level = request.level;
            tracing::info!("Log level set to {:?}", request.level);
            Ok(())
        }
    }

    // ========================================================================
    // Cancellation
    // ========================================================================

    /// Handle cancellation notifications.
    fn on_cancelled(
        &self,
        notification: CancelledNotificationParam,
        _context: NotificationContext<RoleServer>,
    ) -> impl std::future::Future<Output = ()> + Send + '_ {
        async move {
            // Operations are synchronous and in-memory; nothing to abort.
            tracing::info!(
                request_id = ?notification.request_id,
                reason = ?notification.reason,
                "Request cancelled"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> serde_json::Value {
        serde_json::from_str(s).unwrap()
    }

    fn create(mcp: &EnqueteMcp, title: &str) -> String {
        let result = parse(&mcp.create_survey(Parameters(CreateSurveyRequest {
            title: title.to_string(),
            description: None,
        })));
        result["survey_id"].as_str().unwrap().to_string()
    }

    fn question(survey_id: &str, question_type: &str, text: &str) -> AddQuestionRequest {
        AddQuestionRequest {
            survey_id: survey_id.to_string(),
            page_id: None,
            block_id: None,
            question_type: question_type.to_string(),
            question_text: text.to_string(),
            required: true,
            options: None,
            min_selections: None,
            max_selections: None,
            min_value: None,
            max_value: None,
            scale: None,
            display: None,
            multiline: None,
            placeholder: None,
        }
    }

    #[test]
    fn test_create_and_list() {
        let mcp = EnqueteMcp::new();

        let result = parse(&mcp.create_survey(Parameters(CreateSurveyRequest {
            title: "Onboarding".to_string(),
            description: Some("First week".to_string()),
        })));
        assert!(result["survey_id"].as_str().unwrap().starts_with("survey_"));
        assert!(result["message"].is_string());

        let result = parse(&mcp.list_surveys());
        let surveys = result["surveys"].as_array().unwrap();
        assert_eq!(surveys.len(), 1);
        assert_eq!(surveys[0]["title"], "Onboarding");
        assert_eq!(surveys[0]["description"], "First week");
        assert_eq!(surveys[0]["question_count"], 0);
        assert_eq!(surveys[0]["estimated_completion_time"], "1 minutes");
        assert!(surveys[0]["created_at"].is_string());
    }

    #[test]
    fn test_create_empty_title_is_error() {
        let mcp = EnqueteMcp::new();
        let result = parse(&mcp.create_survey(Parameters(CreateSurveyRequest {
            title: String::new(),
            description: None,
        })));
        assert!(result["error"].as_str().unwrap().contains("title"));
    }

    #[test]
    fn test_add_question_and_get() {
        let mcp = EnqueteMcp::new();
        let id = create(&mcp, "Website");

        let mut req = question(&id, "RADIO", "Did you find our website easy to navigate?");
        req.options = Some(vec![
            OptionInput { text: "Yes".to_string() },
            OptionInput { text: "No".to_string() },
        ]);
        let result = parse(&mcp.add_question(Parameters(req)));
        let qid = result["question_id"].as_str().unwrap().to_string();
        assert!(qid.starts_with("q_"));

        let result = parse(&mcp.get_survey(Parameters(GetSurveyRequest { survey_id: id })));
        let survey = &result["survey"];
        assert_eq!(survey["title"], "Website");
        let q = &survey["pages"][0]["blocks"][0]["questions"][0];
        assert_eq!(q["id"], qid.as_str());
        assert_eq!(q["type"], "single_select");
        assert_eq!(q["required"], true);
        assert_eq!(q["options"][1]["id"], "opt_1");
        assert_eq!(q["options"][1]["text"], "No");
        assert_eq!(survey["pages"][0]["blocks"][0]["randomization"]["type"], "none");
    }

    #[test]
    fn test_add_question_errors_are_tagged() {
        let mcp = EnqueteMcp::new();
        let id = create(&mcp, "Errors");

        let result = parse(&mcp.add_question(Parameters(question(&id, "matrix", "?"))));
        assert!(result["error"].as_str().unwrap().contains("invalid question_type"));

        let mut req = question(&id, "text", "Where?");
        req.page_id = Some("nonexistent".to_string());
        let result = parse(&mcp.add_question(Parameters(req)));
        assert_eq!(result["error"], "page 'nonexistent' not found");

        let result = parse(&mcp.add_question(Parameters(question("survey_missing", "text", "?"))));
        assert_eq!(result["error"], "survey 'survey_missing' not found");

        let mut req = question(&id, "single_select", "Display?");
        req.options = Some(vec![OptionInput { text: "a".to_string() }]);
        req.display = Some("diagonal".to_string());
        let result = parse(&mcp.add_question(Parameters(req)));
        assert!(result["error"].as_str().unwrap().contains("display"));

        // Nothing above landed in the survey.
        let result = parse(&mcp.list_surveys());
        assert_eq!(result["surveys"][0]["question_count"], 0);
    }

    #[test]
    fn test_add_question_missing_target_reported_first() {
        let mcp = EnqueteMcp::new();
        let id = create(&mcp, "Targets");

        // Unknown type and no options, but the page miss wins.
        let mut req = question(&id, "matrix", "?");
        req.page_id = Some("nonexistent".to_string());
        let result = parse(&mcp.add_question(Parameters(req)));
        assert_eq!(result["error"], "page 'nonexistent' not found");

        let mut req = question(&id, "single_select", "Pick");
        req.page_id = Some("nonexistent".to_string());
        let result = parse(&mcp.add_question(Parameters(req)));
        assert_eq!(result["error"], "page 'nonexistent' not found");

        let mut req = question("survey_gone", "open_text", "");
        req.display = Some("diagonal".to_string());
        let result = parse(&mcp.add_question(Parameters(req)));
        assert_eq!(result["error"], "survey 'survey_gone' not found");

        // With a valid target the request error comes through.
        let result = parse(&mcp.add_question(Parameters(question(&id, "single_select", "Pick"))));
        assert!(result["error"].as_str().unwrap().contains("at least one option"));
    }

    #[test]
    fn test_get_missing_survey() {
        let mcp = EnqueteMcp::new();
        let result = parse(&mcp.get_survey(Parameters(GetSurveyRequest {
            survey_id: "survey_nope".to_string(),
        })));
        assert_eq!(result, serde_json::json!({"error": "survey 'survey_nope' not found"}));
    }

    #[test]
    fn test_add_page_and_block_then_target_them() {
        let mcp = EnqueteMcp::new();
        let id = create(&mcp, "Sections");

        let page = parse(&mcp.add_page(Parameters(AddPageRequest {
            survey_id: id.clone(),
            title: "About you".to_string(),
        })));
        let page_id = page["page_id"].as_str().unwrap().to_string();

        let block = parse(&mcp.add_block(Parameters(AddBlockRequest {
            survey_id: id.clone(),
            page_id: Some(page_id.clone()),
            title: "Shuffled".to_string(),
            randomization: Some("full".to_string()),
            randomization_settings: None,
        })));
        let block_id = block["block_id"].as_str().unwrap().to_string();

        let mut req = question(&id, "rating", "How likely are you to recommend us?");
        req.page_id = Some(page_id.clone());
        req.block_id = Some(block_id.clone());
        req.scale = Some(10);
        let result = parse(&mcp.add_question(Parameters(req)));
        assert_eq!(result["page_id"], page_id.as_str());
        assert_eq!(result["block_id"], block_id.as_str());

        let survey = parse(&mcp.get_survey(Parameters(GetSurveyRequest { survey_id: id })));
        let b = &survey["survey"]["pages"][1]["blocks"][0];
        assert_eq!(b["randomization"]["enabled"], true);
        assert_eq!(b["randomization"]["type"], "full");
        assert_eq!(b["questions"][0]["scale"], 10);
    }

    #[test]
    fn test_add_block_bad_randomization() {
        let mcp = EnqueteMcp::new();
        let id = create(&mcp, "R");
        let result = parse(&mcp.add_block(Parameters(AddBlockRequest {
            survey_id: id,
            page_id: None,
            title: "B".to_string(),
            randomization: Some("chaotic".to_string()),
            randomization_settings: None,
        })));
        assert!(result["error"].as_str().unwrap().contains("randomization"));
    }

    #[test]
    fn test_survey_outline() {
        let mcp = EnqueteMcp::new();
        let id = create(&mcp, "Outline me");
        for text in ["One", "Two", "Three"] {
            mcp.add_question(Parameters(question(&id, "open_text", text)));
        }

        let result = mcp.survey_outline(Parameters(SurveyOutlineRequest {
            survey_id: id,
            max_depth: None,
        }));
        assert!(result.contains("\"Outline me\""));
        assert!(result.contains("[open_text*] \"Two\""));
        assert!(result.contains("3 questions, about 1 minutes"));
    }

    #[test]
    fn test_question_types_catalog() {
        let mcp = EnqueteMcp::new();
        let result = parse(&mcp.question_types());
        let types = result["question_types"].as_array().unwrap();
        assert_eq!(types.len(), 6);
        let multi = types.iter().find(|t| t["type"] == "multi_select").unwrap();
        assert_eq!(multi["required"], serde_json::json!(["options"]));
        assert_eq!(multi["choice_based"], true);
    }

    #[test]
    fn test_draft_survey_prompt() {
        let mcp = EnqueteMcp::new();
        let result = mcp.draft_survey(Parameters(DraftSurveyArgs {
            topic: "remote work".to_string(),
            question_count: Some(9),
        })).unwrap();
        let text = match &result.messages[0].content {
            rmcp::model::PromptMessageContent::Text { text } => text.clone(),
            _ => panic!("expected text content"),
        };
        assert!(text.contains("remote work"));
        assert!(text.contains("3 minutes"));
        assert!(text.contains("**rating**"));

        assert!(mcp.draft_survey(Parameters(DraftSurveyArgs {
            topic: " ".to_string(),
            question_count: None,
        })).is_err());
    }

    #[test]
    fn test_server_info_uses_settings() {
        let mcp = EnqueteMcp::with_service(
            SurveyService::default(),
            ServerSettings {
                name: "surveys-test".to_string(),
                instructions: Some("custom".to_string()),
            },
        );
        let info = mcp.get_info();
        assert_eq!(info.server_info.name, "surveys-test");
        assert_eq!(info.instructions.as_deref(), Some("custom"));
    }
}
